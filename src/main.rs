use std::process::ExitCode;

use clap::Parser;
use log::error;
use tabula_engine::{cli, cli::CliParser, config::Config};

fn main() -> ExitCode {
    let args = CliParser::parse();

    // `log` records from the engine are forwarded by the subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(message) => {
            error!("invalid configuration: {}", message);
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = args.database {
        config.database_path = path;
    }

    match cli::run_client(&config, args.in_memory, !args.no_splash) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("could not open the database: {}", e);
            ExitCode::FAILURE
        }
    }
}
