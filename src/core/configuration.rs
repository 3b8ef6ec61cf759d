use serde::Deserialize;
use std::{
    fs::{self},
    path::Path,
};
use tokio::{fs::File, io::AsyncReadExt};

pub mod sections;
mod tests;

use sections::{CoreConfiguration, LogConfiguration, ServiceConfiguration};

#[derive(Deserialize, Clone, Debug, Default)]
pub struct Configuration {
    #[serde(default)]
    pub service: ServiceConfiguration,
    #[serde(default)]
    pub core: CoreConfiguration,
    #[serde(default)]
    pub log: LogConfiguration,
}

impl Configuration {
    pub fn assert_data_dir_permissions(&self) -> Result<(), &str> {
        let path = Path::new(self.core.data_directory());

        if !path.try_exists().unwrap_or(false) {
            return Err("data dir does not exist");
        }

        let metadata = fs::metadata(path).map_err(|_| "cannot read data dir metadata")?;

        if !metadata.is_dir() {
            return Err("data dir is not a directory");
        }

        if metadata.permissions().readonly() {
            return Err("data_dir cannot be readonly");
        }

        Ok(())
    }

    pub fn assert_timeout(&self) -> Result<(), &str> {
        if self.service.timeout == Some(0) {
            return Err("timeout must be greater than zero");
        }

        Ok(())
    }

    /// Checks that every endpoint derived from the `[service]` section is a usable http(s) URL.
    pub fn assert_service_urls(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let urls = [
            self.service.cas_login_url()?,
            self.service.assignments_url()?,
            self.service.probe_url()?,
        ];

        for url in urls {
            if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
                return Err(format!("unsupported service url: {url}").into());
            }
        }

        Ok(())
    }
}

pub async fn get_configuration(
    file_path: String,
) -> Result<Configuration, Box<dyn std::error::Error + Send + Sync>> {
    let path = Path::new(&file_path);

    if !path.exists() {
        return Err(format!("configuration file is missing: {file_path}").into());
    }

    let mut file = File::open(path).await?;
    let mut buffer = vec![];

    file.read_to_end(&mut buffer).await?;

    let result = String::from_utf8(buffer)?;

    match toml::from_str::<Configuration>(&result) {
        Ok(c) => Ok(c),
        Err(e) => Err(format!("configuration file is corrupted: {e}").into()),
    }
}
