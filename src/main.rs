use std::path::Path;

use clap::Parser;
use flexi_logger::{Age, Cleanup, Criterion, Duplicate, FileSpec, Logger, Naming, WriteMode};

mod core;

use crate::core::{
    cli::{Cli, Command},
    configuration::{get_configuration, Configuration},
    logger::IgnoreHttpInternals,
};

const DEFAULT_LOG_RETENTION: usize = 31;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    let conf = match &cli.configuration_file {
        Some(c) => get_configuration(c.to_owned()).await?,
        None => Configuration::default(),
    };

    if let Err(e) = conf.assert_data_dir_permissions() {
        return Err(e.into());
    }

    if let Err(e) = conf.assert_timeout() {
        return Err(e.into());
    }

    conf.assert_service_urls()?;

    let level = cli
        .verbosity
        .map(|v| v.to_string())
        .or_else(|| conf.log.level.clone())
        .unwrap_or_else(|| "info".to_string())
        .to_lowercase();

    let _logger = Logger::try_with_str(level)?
        .log_to_file(
            FileSpec::default()
                .directory(Path::new(conf.core.data_directory()).join("logs"))
                .basename("pandora"),
        )
        .duplicate_to_stderr(Duplicate::All)
        .filter(Box::new(IgnoreHttpInternals))
        .rotate(
            Criterion::Age(Age::Day),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(conf.log.retention.unwrap_or(DEFAULT_LOG_RETENTION)),
        )
        .write_mode(WriteMode::Async)
        .start()?;

    match &cli.command {
        Command::StoreCredentials { identifier, secret } => {
            crate::core::core::store_credentials(&conf, identifier.to_owned(), secret.to_owned()).await?;
        }
        Command::Check => {
            crate::core::core::check(&conf).await?;
        }
        Command::Fetch { output } => {
            crate::core::core::fetch(&conf, output.as_deref()).await?;
        }
    }

    Ok(())
}
