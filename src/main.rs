mod config;
mod replay;
mod window;

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::replay::{ReplayError, ReplayReport};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    match run(Config::parse()) {
        Ok(report) => match print_report(&report) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(error = %e, "failed to write report");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            tracing::error!(error = %e, "replay failed");
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> Result<ReplayReport, ReplayError> {
    let config = config.validate()?;
    let mut controller = replay::build_controller(&config)?;
    tracing::info!(input = %config.input, globe_2d = config.globe_2d, "replaying input");

    if config.reads_stdin() {
        replay::replay(io::stdin().lock(), &mut controller)
    } else {
        let file = File::open(&config.input)?;
        replay::replay(BufReader::new(file), &mut controller)
    }
}

fn print_report(report: &ReplayReport) -> Result<(), ReplayError> {
    let json = serde_json::to_string_pretty(report).map_err(ReplayError::Encode)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}
