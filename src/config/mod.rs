//! Configuration loading and merging
//!
//! Consolidates configuration from a TOML config file, a dotenv-style
//! environment file, the process environment and CLI arguments with strict
//! precedence (CLI > process env > env file > config file > defaults).
//! Missing files are treated as empty sources; malformed files are fatal.

pub mod env;
pub mod env_file;
pub mod loader;
pub mod merge;

pub use env::{apply_env, apply_env_vars, ENV_PREFIX};
pub use env_file::load_env_file;
pub use loader::load_config_file;
pub use merge::{consolidate, consolidate_with_env, resolve, Consolidation, SourceEvent};

use crate::error::ConfigError;
use std::fs;
use std::io;
use std::path::Path;

/// Read `path` to a string, mapping "not found" to `Ok(None)`.
///
/// Every other I/O failure is fatal to consolidation.
fn read_optional(path: &Path) -> Result<Option<String>, ConfigError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigError::Read { path: path.to_path_buf(), source }),
    }
}
