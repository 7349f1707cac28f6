//! appname: bootstrap template for a command-line application
//!
//! Wires the CLI argument surface, a layered configuration loader and a
//! file-based logger. The library exposes the pieces so they can be tested
//! and reused; the binary in `main.rs` only maps errors to exit codes.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

/// Application name as shown by `appname version`.
pub const APP_NAME: &str = "appname";

/// Version string, overridable at build time via `APPNAME_VERSION`.
pub const VERSION: &str = match option_env!("APPNAME_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Default log file location, overridable at build time via
/// `APPNAME_DEFAULT_LOG_PATH` (dev builds usually point this somewhere writable).
pub const DEFAULT_LOG_PATH: &str = match option_env!("APPNAME_DEFAULT_LOG_PATH") {
    Some(path) => path,
    None => "/var/log/appname/appname.log",
};
