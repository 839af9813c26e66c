//! CLI subcommand implementations.

pub mod analyze;
pub mod check;
pub mod util;
