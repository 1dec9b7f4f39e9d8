//! meetroom - command-line client for the meeting room reservation system.
//!
//! A thin layer over `meetroom-http`: it parses arguments, opens the
//! credential file and renders results. Session expiry handling lives in
//! the library; this binary only reacts to the events it emits.

mod cli;
mod commands;
mod events;
mod output;
mod session;

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    match commands::handle(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Failures the session layer already rendered through CliEvents
            if commands::already_reported(&err) {
                debug!(error = ?err, "Command failed");
            } else {
                output::error(&format!("{:#}", err));
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so command output on stdout stays parseable
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
