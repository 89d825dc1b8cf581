//! mapforge CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info, warn};

use mapforge::{ArgsError, CompileError};
use mapforge_cli::{Args, error_adapter::ErrorAdapter, usage};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    // Parse configuration first
    let args = Args::parse();

    // Initialize the logger with the specified log level
    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"); "Starting mapforge");
    debug!(args:?; "Parsed arguments");

    // Run the application
    if let Err(err) = mapforge_cli::run(&args) {
        if matches!(err, CompileError::Args(ArgsError::Usage)) {
            // A malformed invocation gets the option tables, not a report.
            print!("{}", usage());
        } else {
            let reporter = miette::GraphicalReportHandler::new();

            let mut writer = String::new();
            reporter
                .render_report(&mut writer, &ErrorAdapter(&err))
                .expect("Writing to String buffer is infallible");

            if err.is_warning() {
                warn!("{writer}");
            } else {
                error!("{writer}");
            }
        }

        process::exit(err.exit_code());
    }

    info!("Completed successfully");
}
