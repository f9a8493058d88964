//! Error types for the recursive checksum walker.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort an entire run.
///
/// Anything here reaches the user as a single diagnostic line; report lines
/// written before the failure are flushed and survive.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Failed to open input listing {path:?}: {source}")]
    OpenListing {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read input listing: {source}")]
    ReadListing { source: std::io::Error },

    #[error("Failed to create report directory {path:?}: {source}")]
    CreateReportDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create report file {path:?}: {source}")]
    CreateReport {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write report: {source}")]
    WriteReport { source: std::io::Error },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors surfaced by the traversal of a single root.
///
/// `Enumeration` abandons the current root and lets the run continue with
/// the next listing line; `Report` means the output stream itself failed
/// and is promoted to a fatal [`RunError`] by the run loop.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("Failed to enumerate directory {path:?}: {source}")]
    Enumeration {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write report line: {source}")]
    Report { source: std::io::Error },
}

impl From<config::ConfigError> for RunError {
    fn from(err: config::ConfigError) -> Self {
        RunError::Config(err.to_string())
    }
}
