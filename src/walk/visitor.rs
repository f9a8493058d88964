//! Traversal event dispatch.

use std::path::Path;

/// Receives traversal events for every entry under a root.
///
/// One method per entry kind. The directory hooks default to no-ops so a
/// sink that only cares about files stays small. Methods return
/// `io::Result` so a failing sink can abort the walk; the walker maps
/// those errors to its fatal report-stream variant.
pub trait TreeVisitor {
    /// Called after a directory has been opened for enumeration, before
    /// any of its children.
    fn enter_directory(&mut self, _path: &Path) -> std::io::Result<()> {
        Ok(())
    }

    /// Called for every non-directory entry with its content checksum.
    fn visit_file(&mut self, path: &Path, checksum: u32) -> std::io::Result<()>;

    /// Called for every entry that could not be read: missing paths,
    /// unreadable files, unreadable directories, symlink loops.
    fn visit_failed(&mut self, path: &Path) -> std::io::Result<()>;

    /// Called after all children of a directory have been visited.
    fn leave_directory(&mut self, _path: &Path) -> std::io::Result<()> {
        Ok(())
    }
}
