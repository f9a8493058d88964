//! Walksum CLI Binary
//!
//! Command-line interface for the recursive checksum walker.

use clap::Parser;
use std::process;
use tracing::{error, info};
use walksum::cli::{map_error, Cli};
use walksum::config::{ConfigLoader, WalksumConfig};
use walksum::error::RunError;
use walksum::logging::{init_logging, LoggingConfig};
use walksum::walk::run::WalkRun;
use walksum::walk::walker::WalkerConfig;

fn main() {
    let cli = Cli::parse();

    let file_config = load_file_config(&cli);

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli, &file_config);

    // Initialize logging early
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("{}", map_error(&e));
        process::exit(1);
    }

    info!("Walksum starting");

    let walker_config = build_walker_config(&cli, &file_config);
    let merged = WalksumConfig {
        walker: walker_config.clone(),
        logging: logging_config,
    };
    if let Err(errors) = merged.validate() {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        let e = RunError::Config(format!("Invalid configuration:\n{}", messages.join("\n")));
        error!("Run failed: {}", e);
        eprintln!("{}", map_error(&e));
        process::exit(1);
    }

    let run = WalkRun::new(cli.listing.clone(), cli.report.clone()).with_config(walker_config);
    match run.execute() {
        Ok(summary) => {
            info!(
                roots = summary.roots,
                lines = summary.lines,
                "Run completed"
            );
        }
        Err(e) => {
            error!("Run failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Load the configuration file. An explicit --config path that fails to
/// load is fatal; a missing or broken global file falls back to defaults.
fn load_file_config(cli: &Cli) -> WalksumConfig {
    match cli.config {
        Some(ref config_path) => match ConfigLoader::load_from_file(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", map_error(&e));
                process::exit(1);
            }
        },
        None => ConfigLoader::load().unwrap_or_default(),
    }
}

/// Build logging configuration from CLI args and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, file_config: &WalksumConfig) -> LoggingConfig {
    let mut config = file_config.logging.clone();

    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }

    config
}

/// Build walker configuration from CLI args and config file.
fn build_walker_config(cli: &Cli, file_config: &WalksumConfig) -> WalkerConfig {
    let mut config = file_config.walker.clone();

    if cli.follow_symlinks {
        config.follow_symlinks = true;
    }
    if let Some(size) = cli.read_buffer_size {
        config.read_buffer_size = size;
    }

    config
}
