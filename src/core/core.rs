use std::path::Path;

use chrono::SecondsFormat;
use log::{debug, info};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{
    assignments::{AssignmentReport, AssignmentsAgent},
    authenticator::{
        credentials_provider::{update_credentials, CredentialsProvider, FileSystemProvider},
        Authenticator,
    },
    common::Session,
    configuration::Configuration,
};

/// ### Store credentials
/// Writes the CAS account to the data directory.
/// A missing or blank identifier or secret keeps the value stored previously,
/// the secret is read from stdin when not given on the command line.
pub async fn store_credentials(
    conf: &Configuration,
    identifier: Option<String>,
    secret: Option<String>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let secret = match secret {
        Some(s) => s,
        None => read_secret().await?,
    };

    let provider = FileSystemProvider::new(conf.core.data_directory());
    let credentials =
        update_credentials(&provider, identifier.as_deref().unwrap_or_default(), &secret).await?;

    info!("credentials stored for {}", credentials.identifier);

    Ok(())
}

/// ### Check
/// Logs in with the stored account and reports whether the service accepted it.
pub async fn check(conf: &Configuration) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let session = login(conf).await?;

    let service_url = conf.service.assignments_url()?;
    debug!(
        "session holds service cookies: {}",
        session.has_cookies_for(&service_url)
    );

    println!("login succeeded");

    Ok(())
}

/// ### Fetch
/// Logs in, fetches the assignments and prints them grouped by lesson, or writes
/// them as JSON to `output_path` when given.
pub async fn fetch(
    conf: &Configuration,
    output_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let session = login(conf).await?;

    let report = AssignmentsAgent::new(&session, &conf.service)?
        .fetch()
        .await?;

    match output_path {
        Some(p) => {
            write_report(&report, p)?;
            info!("assignments written to {p}");
        }
        None => print_report(&report),
    }

    Ok(())
}

async fn login(conf: &Configuration) -> Result<Session, Box<dyn std::error::Error + Send + Sync>> {
    let provider = FileSystemProvider::new(conf.core.data_directory());
    let credentials = provider.get().await?;

    let authenticator = Authenticator::new(&conf.service)?;
    let session = authenticator.login(&credentials).await?;

    Ok(session)
}

async fn read_secret() -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    eprint!("Password (leave blank to keep the stored one): ");

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn print_report(report: &AssignmentReport) {
    if report.assignments.is_empty() {
        println!("no assignments");
        return;
    }

    for lesson_id in &report.lesson_ids {
        println!("{lesson_id}");

        for assignment in report.assignments_for(lesson_id) {
            let close = assignment
                .close_at()
                .map(|d| d.to_rfc3339_opts(SecondsFormat::Secs, true))
                .unwrap_or_default();

            println!(
                "  {} | due {} | closes {}",
                assignment.assignment_name, assignment.due_time, close
            );
        }
    }
}

fn write_report(
    report: &AssignmentReport,
    output_path: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let path = ensure_output_writable(output_path)?;
    let file = std::fs::File::create(path)?;

    serde_json::to_writer_pretty(file, report)?;

    Ok(())
}

fn ensure_output_writable(
    output_path: &str,
) -> Result<&Path, Box<dyn std::error::Error + Send + Sync>> {
    let path = Path::new(output_path);

    if path.is_dir() {
        return Err(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "output path is a directory",
        )));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "output path parent directory does not exist",
            )));
        }
    }

    Ok(path)
}
