//! Recursive checksum walk
//!
//! Streams every file reachable from a set of root paths through an FNV-1
//! checksum and reports one `<checksum> <path>` line per visited entry,
//! with the sentinel checksum `00000000` for entries that cannot be read.

pub mod hasher;
pub mod listing;
pub mod report;
pub mod run;
pub mod visitor;
pub mod walker;
