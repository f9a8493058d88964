//! CLI parse: clap types for walksum. No behavior; definitions only.

use clap::Parser;
use std::path::PathBuf;

/// Walksum CLI - Recursive file checksum walker
#[derive(Parser)]
#[command(name = "walksum")]
#[command(about = "Recursively checksum every file reachable from listed roots")]
pub struct Cli {
    /// Input file listing one root path per line
    #[arg(value_name = "LISTING")]
    pub listing: PathBuf,

    /// Report file to write, one `<checksum> <path>` line per entry
    #[arg(value_name = "REPORT")]
    pub report: PathBuf,

    /// Follow symbolic links into directories
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Read buffer size for file hashing, in bytes
    #[arg(long)]
    pub read_buffer_size: Option<usize>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout)
    #[arg(long)]
    pub log_output: Option<String>,
}
