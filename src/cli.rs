//! CLI domain: parse and output mapping only.
//! No domain orchestration; the binary wires parsed arguments into a run.

mod output;
mod parse;

pub use output::map_error;
pub use parse::Cli;
