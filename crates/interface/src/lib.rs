//! Scorecard Interface - command line layer
//!
//! Responsibilities:
//! - CLI argument parsing and configuration resolution
//! - Rendering results as pretty text, JSON or minimal lines
//!
//! Architecture:
//! - cli: commands and their handlers
//! - render: output formats

pub mod cli;
mod render;


pub use cli::{CliConfig, CliError, OutputFormat, run_cli};
