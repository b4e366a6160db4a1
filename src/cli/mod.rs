//! Command-line interface module.

pub mod anchors;
mod args;
pub mod check;
pub mod common;
pub mod index;

pub use args::{AnchorsArgs, CheckArgs, Cli, Commands, IndexArgs, OutputFormat};
