//! appname: bootstrap template for a command-line application
//!
//! Parses arguments, consolidates configuration, initialises the file logger
//! and dispatches to subcommands.

use appname::error::{exit_code, EXIT_SUCCESS};

fn main() {
    if let Err(err) = appname::cli::run(std::env::args_os()) {
        eprintln!("error encountered: {err:#}");
        std::process::exit(exit_code(&err));
    }
    std::process::exit(EXIT_SUCCESS);
}
