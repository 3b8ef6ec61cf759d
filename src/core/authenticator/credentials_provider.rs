use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, error};
use mockall::automock;
use serde::{Deserialize, Serialize};
use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncWriteExt},
};

use super::common::Credentials;

const ACCOUNT_FILE_NAME: &str = "account.toml";

/// Source and sink of the stored CAS account.
#[automock]
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    async fn store(
        &self,
        credentials: Credentials,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    async fn get(&self) -> Result<Credentials, Box<dyn std::error::Error + Send + Sync>>;
}

/// Stored account data does not hold exactly one identifier and one secret.
#[derive(Debug)]
pub struct CredentialsFormatError {
    reason: String,
}

impl CredentialsFormatError {
    pub fn new(reason: String) -> Self {
        Self { reason }
    }
}

impl std::fmt::Display for CredentialsFormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid credentials format: {}", self.reason)
    }
}

impl std::error::Error for CredentialsFormatError {}

#[derive(Serialize, Deserialize)]
struct StoredAccount {
    identifier: Option<String>,
    secret: Option<String>,
}

impl TryFrom<StoredAccount> for Credentials {
    type Error = CredentialsFormatError;

    fn try_from(value: StoredAccount) -> Result<Self, Self::Error> {
        match (value.identifier, value.secret) {
            (Some(identifier), Some(secret)) if !identifier.is_empty() && !secret.is_empty() => {
                Ok(Credentials::new(identifier, secret))
            }
            _ => Err(CredentialsFormatError::new(
                "identifier and secret are both required".to_string(),
            )),
        }
    }
}

/// Keeps the account in `<data_dir>/account.toml`, readable by the owner only.
#[derive(Clone)]
pub struct FileSystemProvider {
    path: PathBuf,
}

impl FileSystemProvider {
    pub fn new(data_dir: &str) -> Self {
        Self {
            path: FileSystemProvider::get_account_file_path(data_dir),
        }
    }

    pub fn get_account_file_path(data_dir: &str) -> PathBuf {
        Path::new(data_dir).join(ACCOUNT_FILE_NAME)
    }

    #[cfg(unix)]
    async fn restrict_permissions(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        use std::os::unix::fs::PermissionsExt;

        tokio::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600)).await?;
        Ok(())
    }

    #[cfg(not(unix))]
    async fn restrict_permissions(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
}

#[async_trait]
impl CredentialsProvider for FileSystemProvider {
    async fn store(
        &self,
        credentials: Credentials,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        debug!("storing credentials to {}", self.path.display());

        let account = StoredAccount {
            identifier: Some(credentials.identifier),
            secret: Some(credentials.secret),
        };
        let content = toml::to_string(&account)?;

        if self.path.exists() {
            tokio::fs::remove_file(&self.path).await?;
        }

        let mut file = File::create(&self.path).await?;
        self.restrict_permissions().await?;

        if let Err(e) = file.write_all(content.as_bytes()).await {
            file.shutdown().await?;
            return Err(Box::new(e));
        }

        file.shutdown().await?;

        Ok(())
    }

    async fn get(&self) -> Result<Credentials, Box<dyn std::error::Error + Send + Sync>> {
        if !self.path.exists() {
            error!(
                "file does not exist {}, did you store your credentials? See store-credentials command",
                self.path.display()
            );
            return Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("file does not exist {}", self.path.display()),
            )));
        }

        let mut file = File::open(&self.path).await?;
        let mut buffer = vec![];

        file.read_to_end(&mut buffer).await?;

        let content = String::from_utf8(buffer)
            .map_err(|e| CredentialsFormatError::new(e.to_string()))?;

        let account = toml::from_str::<StoredAccount>(&content)
            .map_err(|e| CredentialsFormatError::new(e.to_string()))?;

        Ok(Credentials::try_from(account)?)
    }
}

/// Stores new credentials, a blank field keeps the previously stored value.
pub async fn update_credentials(
    provider: &dyn CredentialsProvider,
    identifier: &str,
    secret: &str,
) -> Result<Credentials, Box<dyn std::error::Error + Send + Sync>> {
    let identifier = identifier.trim();

    let credentials = if identifier.is_empty() || secret.is_empty() {
        let previous = provider.get().await?;
        Credentials::new(
            if identifier.is_empty() { previous.identifier } else { identifier.to_string() },
            if secret.is_empty() { previous.secret } else { secret.to_string() },
        )
    } else {
        Credentials::new(identifier, secret)
    };

    provider.store(credentials.clone()).await?;

    Ok(credentials)
}
