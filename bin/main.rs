//! Scorecard CLI Entry Point
//!
//! This binary provides the command-line interface for the security scorecard.

use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = scorecard_interface::run_cli().await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
