//! Recursive filesystem traversal with per-entry failure dispatch.

use crate::error::WalkError;
use crate::walk::hasher::{FnvHasher, DEFAULT_BUFFER_SIZE};
use crate::walk::visitor::TreeVisitor;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, trace, warn};

/// Walker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links into directories (default: false
    /// for determinism; an unfollowed link is visited as a file)
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Read buffer size for file hashing, in bytes
    #[serde(default = "default_buffer_size")]
    pub read_buffer_size: usize,
}

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            read_buffer_size: default_buffer_size(),
        }
    }
}

/// Recursive walker over root paths.
///
/// Owns the hasher (and its reusable read buffer) so consecutive roots
/// share one allocation. Failure policy per entry:
///
/// - metadata, open, and read failures become failed visits and the walk
///   continues with the next entry;
/// - a directory that cannot be opened is a failed visit and its children
///   are never produced;
/// - an enumeration error after a directory opened successfully aborts
///   this root with [`WalkError::Enumeration`].
///
/// Children are visited in sorted file-name order, so two walks over an
/// unchanged tree produce identical event sequences.
pub struct Walker {
    config: WalkerConfig,
    hasher: FnvHasher,
}

impl Walker {
    /// Create a walker with the default configuration.
    pub fn new() -> Self {
        Self::with_config(WalkerConfig::default())
    }

    /// Create a walker with a custom configuration.
    pub fn with_config(config: WalkerConfig) -> Self {
        let hasher = FnvHasher::with_buffer_size(config.read_buffer_size);
        Self { config, hasher }
    }

    /// Walk one root, dispatching every entry to the visitor in
    /// deterministic pre-order.
    pub fn walk<V: TreeVisitor>(&mut self, root: &Path, visitor: &mut V) -> Result<(), WalkError> {
        let mut ancestors = Vec::new();
        self.visit(root, visitor, &mut ancestors)
    }

    fn visit<V: TreeVisitor>(
        &mut self,
        path: &Path,
        visitor: &mut V,
        ancestors: &mut Vec<DirIdentity>,
    ) -> Result<(), WalkError> {
        let metadata = if self.config.follow_symlinks {
            fs::metadata(path)
        } else {
            fs::symlink_metadata(path)
        };
        let metadata = match metadata {
            Ok(metadata) => metadata,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Entry not accessible");
                return visitor.visit_failed(path).map_err(report_error);
            }
        };

        if metadata.is_dir() {
            self.visit_directory(path, visitor, ancestors)
        } else {
            self.visit_file(path, visitor)
        }
    }

    fn visit_file<V: TreeVisitor>(
        &mut self,
        path: &Path,
        visitor: &mut V,
    ) -> Result<(), WalkError> {
        match self.checksum_file(path) {
            Ok(checksum) => {
                trace!(path = %path.display(), checksum = checksum, "Hashed file");
                visitor.visit_file(path, checksum).map_err(report_error)
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Failed to hash file");
                visitor.visit_failed(path).map_err(report_error)
            }
        }
    }

    fn checksum_file(&mut self, path: &Path) -> std::io::Result<u32> {
        let mut file = fs::File::open(path)?;
        self.hasher.hash_reader(&mut file)
    }

    fn visit_directory<V: TreeVisitor>(
        &mut self,
        path: &Path,
        visitor: &mut V,
        ancestors: &mut Vec<DirIdentity>,
    ) -> Result<(), WalkError> {
        let identity = if self.config.follow_symlinks {
            DirIdentity::of(path)
        } else {
            None
        };
        if let Some(id) = identity {
            if ancestors.contains(&id) {
                warn!(path = %path.display(), "Symlink cycle detected");
                return visitor.visit_failed(path).map_err(report_error);
            }
        }

        let entries = match fs::read_dir(path) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Cannot open directory");
                return visitor.visit_failed(path).map_err(report_error);
            }
        };

        visitor.enter_directory(path).map_err(report_error)?;

        // Drain the name list before visiting anything so a mid-stream
        // enumeration failure aborts before any child of this directory
        // is reported.
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| WalkError::Enumeration {
                path: path.to_path_buf(),
                source,
            })?;
            names.push(entry.file_name());
        }
        names.sort();

        let pushed = match identity {
            Some(id) => {
                ancestors.push(id);
                true
            }
            None => false,
        };
        for name in &names {
            let child = path.join(name);
            if let Err(e) = self.visit(&child, visitor, ancestors) {
                if pushed {
                    ancestors.pop();
                }
                return Err(e);
            }
        }
        if pushed {
            ancestors.pop();
        }

        visitor.leave_directory(path).map_err(report_error)
    }
}

impl Default for Walker {
    fn default() -> Self {
        Self::new()
    }
}

fn report_error(source: std::io::Error) -> WalkError {
    WalkError::Report { source }
}

/// Directory identity used for cycle detection when following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DirIdentity {
    dev: u64,
    ino: u64,
}

impl DirIdentity {
    #[cfg(unix)]
    fn of(path: &Path) -> Option<Self> {
        use std::os::unix::fs::MetadataExt;
        fs::metadata(path).ok().map(|metadata| Self {
            dev: metadata.dev(),
            ino: metadata.ino(),
        })
    }

    #[cfg(not(unix))]
    fn of(_path: &Path) -> Option<Self> {
        None
    }
}
