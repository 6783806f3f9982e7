//! Command-line interface module.

mod args;
pub mod build;
pub mod urls;

pub use args::{BuildArgs, Cli, Commands};
