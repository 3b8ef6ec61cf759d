use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

pub const DEFAULT_CAS_URL: &str = "https://cas.ecs.kyoto-u.ac.jp/cas/login";
pub const DEFAULT_SERVICE_URL: &str = "https://panda.ecs.kyoto-u.ac.jp";
pub const DEFAULT_LOGIN_TOOL_PATH: &str = "/sakai-login-tool/container";
pub const DEFAULT_ASSIGNMENTS_PATH: &str = "/direct/assignment/my.json";
pub const DEFAULT_PROBE_PATH: &str = "/direct/session/current.json";
pub const DEFAULT_SUBMIT_LABEL: &str = "ログイン";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the CAS endpoint and the protected service live.
///
/// Every field is optional, accessors fall back to the Kyoto University PandA hosts.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct ServiceConfiguration {
    pub cas_url: Option<String>,
    pub service_url: Option<String>,
    pub login_tool_path: Option<String>,
    pub assignments_path: Option<String>,
    pub probe_path: Option<String>,
    pub submit_label: Option<String>,
    /// timeout in seconds applied to every request
    pub timeout: Option<u64>,
    pub verify_login: Option<bool>,
}

impl ServiceConfiguration {
    pub fn cas_url(&self) -> &str {
        self.cas_url.as_deref().unwrap_or(DEFAULT_CAS_URL)
    }

    pub fn service_url(&self) -> &str {
        self.service_url
            .as_deref()
            .unwrap_or(DEFAULT_SERVICE_URL)
            .trim_end_matches('/')
    }

    pub fn submit_label(&self) -> &str {
        self.submit_label.as_deref().unwrap_or(DEFAULT_SUBMIT_LABEL)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn verify_login(&self) -> bool {
        self.verify_login.unwrap_or(true)
    }

    /// The service page CAS should send us back to once logged in.
    pub fn login_tool_url(&self) -> String {
        self.service_path(self.login_tool_path.as_deref(), DEFAULT_LOGIN_TOOL_PATH)
    }

    /// `<cas_url>?service=<login tool url>`, the login tool url being percent-encoded.
    pub fn cas_login_url(&self) -> Result<Url, Box<dyn std::error::Error + Send + Sync>> {
        let url = Url::parse_with_params(self.cas_url(), &[("service", self.login_tool_url())])?;
        Ok(url)
    }

    pub fn assignments_url(&self) -> Result<Url, Box<dyn std::error::Error + Send + Sync>> {
        let url = Url::parse(&self.service_path(
            self.assignments_path.as_deref(),
            DEFAULT_ASSIGNMENTS_PATH,
        ))?;
        Ok(url)
    }

    pub fn probe_url(&self) -> Result<Url, Box<dyn std::error::Error + Send + Sync>> {
        let url = Url::parse(&self.service_path(self.probe_path.as_deref(), DEFAULT_PROBE_PATH))?;
        Ok(url)
    }

    fn service_path(&self, path: Option<&str>, default: &str) -> String {
        let path = path.unwrap_or(default);
        let sep = if path.starts_with('/') { "" } else { "/" };
        format!("{}{}{}", self.service_url(), sep, path)
    }
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct CoreConfiguration {
    pub data_directory: Option<String>,
}

impl CoreConfiguration {
    pub fn data_directory(&self) -> &str {
        self.data_directory.as_deref().unwrap_or(".")
    }
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct LogConfiguration {
    pub level: Option<String>,
    pub retention: Option<usize>,
}
