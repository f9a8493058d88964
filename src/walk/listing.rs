//! Root listing input.

use crate::error::RunError;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

/// Line iterator over the root listing file.
///
/// One root per line; the final line may lack a terminator. Read and
/// decode failures are fatal to the run, so items are `Result`.
pub struct RootListing {
    lines: Lines<BufReader<File>>,
}

impl RootListing {
    /// Open a listing file for line iteration.
    pub fn open(path: &Path) -> Result<Self, RunError> {
        let file = File::open(path).map_err(|source| RunError::OpenListing {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
        })
    }
}

impl Iterator for RootListing {
    type Item = Result<String, RunError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines
            .next()
            .map(|line| line.map_err(|source| RunError::ReadListing { source }))
    }
}

/// Interpret one listing line as a root path.
///
/// Returns `None` when the line cannot name a host path (an interior NUL
/// byte); the run loop reports such lines verbatim with the sentinel
/// checksum. An empty line names the empty path and is not malformed.
pub fn parse_root(line: &str) -> Option<PathBuf> {
    if line.bytes().any(|b| b == 0) {
        return None;
    }
    Some(PathBuf::from(line))
}
