//! cmake-relink CLI entry point
//!
//! Parses arguments, runs the selected command and renders errors with
//! details and suggestions.

use clap::Parser;
use cmake_relink::cli;
use cmake_relink::core::user_friendly_error;

fn main() {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if let Err(e) = cli.execute() {
        let error_ctx = user_friendly_error(e);
        error_ctx.display();
        std::process::exit(1);
    }
}
