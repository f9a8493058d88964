//! Report output.

use crate::error::RunError;
use crate::walk::visitor::TreeVisitor;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Checksum reported for entries that could not be read.
pub const SENTINEL_CHECKSUM: u32 = 0;

/// Buffered writer over the report file.
///
/// Owns the output stream for the duration of a run and counts the lines
/// written. Every line has the shape `<8 hex digits> <path>`; paths are
/// written exactly as encountered, never canonicalized or escaped.
pub struct ReportWriter {
    out: BufWriter<File>,
    lines: u64,
}

impl ReportWriter {
    /// Create (truncate) the report file, creating missing parent
    /// directories first. Creating an existing directory chain is not an
    /// error.
    pub fn create(path: &Path) -> Result<Self, RunError> {
        if let Some(parent) = path.parent() {
            // A bare file name has an empty parent; nothing to create.
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| RunError::CreateReportDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        let file = File::create(path).map_err(|source| RunError::CreateReport {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            out: BufWriter::new(file),
            lines: 0,
        })
    }

    /// Write one `<checksum> <path>` line.
    pub fn write_entry(&mut self, path: &Path, checksum: u32) -> std::io::Result<()> {
        writeln!(self.out, "{:08x} {}", checksum, path.display())?;
        self.lines += 1;
        Ok(())
    }

    /// Write a sentinel line for raw listing text that never became a path.
    pub fn write_raw(&mut self, line: &str) -> std::io::Result<()> {
        writeln!(self.out, "{:08x} {}", SENTINEL_CHECKSUM, line)?;
        self.lines += 1;
        Ok(())
    }

    /// Number of lines written so far.
    pub fn lines_written(&self) -> u64 {
        self.lines
    }

    /// Flush buffered lines to the file.
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.out.flush()
    }
}

impl TreeVisitor for ReportWriter {
    fn visit_file(&mut self, path: &Path, checksum: u32) -> std::io::Result<()> {
        self.write_entry(path, checksum)
    }

    fn visit_failed(&mut self, path: &Path) -> std::io::Result<()> {
        self.write_entry(path, SENTINEL_CHECKSUM)
    }
}
