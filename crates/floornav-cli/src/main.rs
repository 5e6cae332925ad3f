//! floornav CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use floornav::FloornavError;
use floornav_cli::{Args, error_adapter::to_reportables};

fn report(err: &FloornavError) {
    let reporter = miette::GraphicalReportHandler::new();

    if let FloornavError::Batch { path, .. } = err {
        error!(path:? = path; "Failed to process floor plan");
    }

    // Render each diagnostic independently
    for reportable in to_reportables(err) {
        let mut writer = String::new();
        reporter
            .render_report(&mut writer, &reportable)
            .expect("Writing to String buffer is infallible");

        error!("{writer}");
    }
}

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

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

    info!(log_level:?; "Starting floornav");
    debug!(args:?; "Parsed arguments");

    match floornav_cli::run(&args) {
        Ok(outcome) if outcome.is_success() => {
            info!(documents = outcome.processed().len(); "Completed successfully");
        }
        Ok(outcome) => {
            for err in outcome.failures() {
                report(err);
            }
            process::exit(1);
        }
        Err(err) => {
            report(&err);
            process::exit(1);
        }
    }
}
