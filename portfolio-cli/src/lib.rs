//! Command-line front end for the teacher portfolio.
//!
//! The binary is a thin wrapper around [`run`]; everything here writes to a
//! caller-supplied sink so commands can be exercised from tests.

pub mod backend;
pub mod cli;
pub mod commands;
pub mod config;
mod output;

use anyhow::Result;
use backend::Backends;
use cli::{Cli, Command};
use config::Config;
use portfolio_reports::{Locale, ReportError};
use std::io::Write;

/// Resolves configuration, connects to the backend and runs the command.
pub async fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let config = Config::resolve(cli)?;
    let backends = Backends::connect(&config.backend).await?;
    execute(&cli.command, &backends, &config.locale, out).await
}

/// Runs one command against already connected backends.
pub async fn execute(
    command: &Command,
    backends: &Backends,
    locale: &Locale,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Command::Schema { record_type } => {
            commands::schema::run(backends, locale, record_type, out).await
        }
        Command::Report(args) => commands::report::run(backends, locale, args, out).await,
        Command::Evidence(cmd) => commands::evidence::run(backends, cmd, out).await,
        Command::Profile(cmd) => commands::profile::run(backends, cmd, out).await,
    }
}

/// Text shown to the user for a failed command.
pub fn notice(error: &anyhow::Error) -> String {
    match error.downcast_ref::<ReportError>() {
        Some(report_error) => format!("{} ({report_error})", report_error.notice()),
        None => format!("{error:#}"),
    }
}
