//! Command-line interface for math-forge.
//!
//! Provides commands for generating exercises, checking answers and
//! computing difficulty adjustments. All results are printed as JSON.

mod commands;

pub use commands::{parse_cli, run, run_with_cli, Cli, Commands};
