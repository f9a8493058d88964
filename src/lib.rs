//! Walksum: Recursive File Checksum Walker
//!
//! Computes a 32-bit FNV-1 checksum for every file reachable from a list
//! of root paths and writes a deterministic report with one
//! `<checksum> <path>` line per visited entry. Entries that cannot be
//! read are reported with the sentinel checksum instead of aborting.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod walk;
