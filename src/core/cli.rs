use clap::{arg, command, Parser, Subcommand};

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
    #[arg(short, long)]
    pub configuration_file: Option<String>,
    #[arg(short, long)]
    pub verbosity: Option<log::LevelFilter>,
}

#[derive(Subcommand)]
pub enum Command {
    /// stores the CAS account, a blank value keeps the stored one
    StoreCredentials {
        /// the CAS identifier, e.g. the ECS-ID
        identifier: Option<String>,
        /// the password, read from stdin when omitted
        secret: Option<String>,
    },
    /// logs in with the stored account and checks the session is authenticated
    Check,
    /// logs in and lists assignments grouped by lesson
    Fetch {
        /// writes the assignments as JSON to this file instead of printing them
        #[arg(short, long)]
        output: Option<String>,
    },
}
