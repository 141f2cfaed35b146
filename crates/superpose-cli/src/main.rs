mod cli;
mod commands;
mod config;
mod error;
mod logging;

use crate::cli::Cli;
use crate::error::Result;
use clap::Parser;
use tracing::{debug, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("E: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!("superpose v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let command_result = commands::superpose::run(cli.args);
    log_outcome(&command_result);
    command_result
}

/// Failures stay below the default level; `main` prints the one diagnostic line.
fn log_outcome(result: &Result<()>) {
    match result {
        Ok(_) => info!("Superposition completed successfully."),
        Err(e) => debug!("Superposition failed: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::fs::File;
    use superpose::engine::config::ConfigError;
    use tracing_subscriber::{fmt, prelude::*};

    fn logged_at(verbosity: u8, result: &Result<()>) -> String {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("run.log");
        let file = File::create(&log_path).unwrap();
        let subscriber = tracing_subscriber::registry()
            .with(logging::level_filter(verbosity, false))
            .with(fmt::layer().with_writer(file).with_ansi(false));

        tracing::subscriber::with_default(subscriber, || log_outcome(result));
        std::fs::read_to_string(log_path).unwrap()
    }

    #[test]
    fn failure_is_silent_at_default_verbosity() {
        let failure = Err(CliError::Config(ConfigError::OutputPathMissing));
        assert!(logged_at(0, &failure).is_empty());
    }

    #[test]
    fn failure_is_logged_at_debug_verbosity() {
        let failure = Err(CliError::Config(ConfigError::OutputPathMissing));
        let content = logged_at(2, &failure);
        assert!(content.contains("Superposition failed: Output file is not provided"));
    }
}
