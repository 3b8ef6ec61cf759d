#[cfg(test)]
mod test {
    use std::{path::Path, time::Duration};

    use tokio::{
        fs::{self, File},
        io::AsyncWriteExt,
    };

    use crate::core::configuration::{
        get_configuration,
        sections::{CoreConfiguration, LogConfiguration, ServiceConfiguration},
        Configuration,
    };

    async fn create_sample_file(path: &Path, content: &str) -> Result<(), Box<dyn std::error::Error>> {
        if path.exists() {
            fs::remove_file(path)
                .await
                .expect("cannot remove sample configuration file");
        }

        let mut file = File::create(path)
            .await
            .expect("cannot create sample configuration file");

        file.write_all(content.as_bytes())
            .await
            .expect("cannot write to sample configuration file");
        file.shutdown().await?;

        Ok(())
    }

    fn with_data_directory(data_directory: Option<&str>) -> Configuration {
        Configuration {
            service: ServiceConfiguration::default(),
            core: CoreConfiguration {
                data_directory: data_directory.map(|d| d.to_string()),
            },
            log: LogConfiguration {
                level: None,
                retention: None,
            },
        }
    }

    #[tokio::test]
    async fn should_match_expected_values() {
        let path = Path::new("./test_conf_expected_values.toml");
        let content =
"[service]
cas_url = \"https://cas.example.org/cas/login\"
service_url = \"https://lms.example.org/\"
login_tool_path = \"/portal/login\"
assignments_path = \"/direct/assignment/my.json\"
probe_path = \"/direct/session/current.json\"
submit_label = \"Login\"
# timeout in seconds
timeout = 12
verify_login = false

[core]
data_directory = \".\"

[log]
level = \"Info\"
retention = 31";

        create_sample_file(path, content).await.unwrap();

        let conf = get_configuration("./test_conf_expected_values.toml".to_string())
            .await
            .expect("cannot load configuration");

        fs::remove_file(path)
            .await
            .expect("cannot cleanup sample configuration file");

        assert_eq!("https://cas.example.org/cas/login", conf.service.cas_url());
        assert_eq!("https://lms.example.org", conf.service.service_url());
        assert_eq!("https://lms.example.org/portal/login", conf.service.login_tool_url());
        assert_eq!("Login", conf.service.submit_label());
        assert_eq!(Duration::from_secs(12), conf.service.timeout());
        assert_eq!(false, conf.service.verify_login());

        assert_eq!(".", conf.core.data_directory());
        assert_eq!("Info", conf.log.level.unwrap());
        assert_eq!(31, conf.log.retention.unwrap());
    }

    #[tokio::test]
    async fn missing_sections_fall_back_to_defaults() {
        let path = Path::new("./test_conf_defaults.toml");

        create_sample_file(path, "[log]\nlevel = \"Debug\"").await.unwrap();

        let conf = get_configuration("./test_conf_defaults.toml".to_string())
            .await
            .expect("cannot load configuration");

        fs::remove_file(path)
            .await
            .expect("cannot cleanup sample configuration file");

        assert_eq!(
            "https://cas.ecs.kyoto-u.ac.jp/cas/login?service=https%3A%2F%2Fpanda.ecs.kyoto-u.ac.jp%2Fsakai-login-tool%2Fcontainer",
            conf.service.cas_login_url().unwrap().as_str()
        );
        assert_eq!(
            "https://panda.ecs.kyoto-u.ac.jp/direct/assignment/my.json",
            conf.service.assignments_url().unwrap().as_str()
        );
        assert_eq!("ログイン", conf.service.submit_label());
        assert_eq!(Duration::from_secs(30), conf.service.timeout());
        assert!(conf.service.verify_login());
        assert_eq!(".", conf.core.data_directory());
    }

    #[tokio::test]
    async fn corrupted_or_missing_file_is_an_error() {
        let path = Path::new("./test_conf_corrupted.toml");

        create_sample_file(path, "[service\ncas_url = ").await.unwrap();

        let corrupted = get_configuration("./test_conf_corrupted.toml".to_string()).await;

        fs::remove_file(path)
            .await
            .expect("cannot cleanup sample configuration file");

        assert!(corrupted.is_err());
        assert!(get_configuration("./nowhere.toml".to_string()).await.is_err());
    }

    #[tokio::test]
    async fn shipped_configuration_is_valid() {
        let conf = get_configuration("./pandora.toml".to_string())
            .await
            .expect("cannot load shipped configuration");

        assert!(conf.assert_service_urls().is_ok());
        assert!(conf.assert_timeout().is_ok());
        assert!(conf.assert_data_dir_permissions().is_ok());
        assert_eq!(
            Configuration::default().service.cas_login_url().unwrap(),
            conf.service.cas_login_url().unwrap()
        );
    }

    #[test]
    fn assert_data_dir_permissions_tests() {
        let conf = with_data_directory(Some("nowhere"));
        let conf2 = with_data_directory(Some(""));
        let conf3 = with_data_directory(Some("."));
        let conf4 = with_data_directory(None);

        assert_eq!(true, conf.assert_data_dir_permissions().is_err());
        assert_eq!(true, conf2.assert_data_dir_permissions().is_err());
        assert_eq!(true, conf3.assert_data_dir_permissions().is_ok());
        assert_eq!(true, conf4.assert_data_dir_permissions().is_ok());
    }

    #[test]
    fn assert_service_urls_tests() {
        let conf = Configuration::default();

        let mut conf2 = Configuration::default();
        conf2.service.cas_url = Some("not a url".to_string());

        let mut conf3 = Configuration::default();
        conf3.service.service_url = Some("ftp://lms.example.org".to_string());

        assert!(conf.assert_service_urls().is_ok());
        assert!(conf2.assert_service_urls().is_err());
        assert!(conf3.assert_service_urls().is_err());
    }

    #[test]
    fn assert_timeout_tests() {
        let conf = Configuration::default();

        let mut conf2 = Configuration::default();
        conf2.service.timeout = Some(0);

        let mut conf3 = Configuration::default();
        conf3.service.timeout = Some(5);

        assert!(conf.assert_timeout().is_ok());
        assert!(conf2.assert_timeout().is_err());
        assert!(conf3.assert_timeout().is_ok());
    }
}
