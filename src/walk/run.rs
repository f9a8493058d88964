//! Run orchestration: listing in, report out.

use crate::error::{RunError, WalkError};
use crate::walk::listing::{parse_root, RootListing};
use crate::walk::report::ReportWriter;
use crate::walk::walker::{Walker, WalkerConfig};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Counters describing one completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Listing lines that named a root and were walked to completion
    pub roots: u64,
    /// Listing lines that could not name a host path
    pub invalid_roots: u64,
    /// Roots abandoned because directory enumeration failed underneath them
    pub failed_roots: u64,
    /// Report lines written
    pub lines: u64,
}

/// One checksum run over a listing of roots.
///
/// Roots are processed in listing order, each walked to completion before
/// the next begins. A root whose directory enumeration breaks mid-stream
/// is abandoned with a warning; the run continues with the next line.
pub struct WalkRun {
    listing: PathBuf,
    report: PathBuf,
    config: WalkerConfig,
}

impl WalkRun {
    /// Create a run with the default walker configuration.
    pub fn new(listing: PathBuf, report: PathBuf) -> Self {
        Self {
            listing,
            report,
            config: WalkerConfig::default(),
        }
    }

    /// Replace the walker configuration.
    pub fn with_config(mut self, config: WalkerConfig) -> Self {
        self.config = config;
        self
    }

    /// Execute the run.
    ///
    /// The listing is opened before the report is created, so a missing
    /// listing never leaves an empty report behind. Lines written before
    /// a fatal error are flushed and survive.
    #[instrument(skip(self), fields(listing = %self.listing.display(), report = %self.report.display()))]
    pub fn execute(&self) -> Result<RunSummary, RunError> {
        let start = Instant::now();
        info!("Starting checksum run");

        let listing = RootListing::open(&self.listing)?;
        let mut report = ReportWriter::create(&self.report)?;
        let mut walker = Walker::with_config(self.config.clone());
        let mut summary = RunSummary::default();

        let result = Self::process_roots(listing, &mut report, &mut walker, &mut summary);

        // Flush before inspecting the loop result so lines written ahead
        // of a fatal error reach the file.
        let flushed = report.flush();
        summary.lines = report.lines_written();
        result?;
        flushed.map_err(|source| RunError::WriteReport { source })?;

        let duration = start.elapsed();
        info!(
            roots = summary.roots,
            invalid_roots = summary.invalid_roots,
            failed_roots = summary.failed_roots,
            lines = summary.lines,
            duration_ms = duration.as_millis(),
            "Checksum run completed"
        );

        Ok(summary)
    }

    fn process_roots(
        listing: RootListing,
        report: &mut ReportWriter,
        walker: &mut Walker,
        summary: &mut RunSummary,
    ) -> Result<(), RunError> {
        for line in listing {
            let line = line?;
            match parse_root(&line) {
                Some(root) => {
                    debug!(root = %root.display(), "Walking root");
                    match walker.walk(&root, report) {
                        Ok(()) => summary.roots += 1,
                        Err(WalkError::Enumeration { path, source }) => {
                            warn!(
                                root = %root.display(),
                                directory = %path.display(),
                                error = %source,
                                "Directory enumeration failed, abandoning root"
                            );
                            summary.failed_roots += 1;
                        }
                        Err(WalkError::Report { source }) => {
                            return Err(RunError::WriteReport { source });
                        }
                    }
                }
                None => {
                    debug!(line = %line, "Listing line cannot name a path");
                    report
                        .write_raw(&line)
                        .map_err(|source| RunError::WriteReport { source })?;
                    summary.invalid_roots += 1;
                }
            }
        }
        Ok(())
    }
}
