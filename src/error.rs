//! Error taxonomy and process exit codes.

use std::path::{Path, PathBuf};
use thiserror::Error;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_INVALID_ARGS: i32 = 2;

/// Fatal configuration errors. A missing file is never one of these.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read
    #[error("failed reading {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not a valid TOML document of the expected shape
    #[error("invalid TOML in {}{}: {message}", path.display(), location_suffix(*location))]
    Toml { path: PathBuf, location: Option<(usize, usize)>, message: String },

    /// The environment file has a line that cannot be parsed
    #[error("invalid environment file {} at line {line}: {message}", path.display())]
    EnvSyntax { path: PathBuf, line: usize, message: String },
}

impl ConfigError {
    /// Flatten a TOML parse error into a single line with its 1-based
    /// line/column resolved against `content`.
    pub fn toml(path: &Path, content: &str, err: &toml::de::Error) -> Self {
        let location = err.span().map(|span| line_column(content, span.start));
        let message = err
            .message()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("; ");
        Self::Toml { path: path.to_path_buf(), location, message }
    }
}

fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let before = content.get(..offset).unwrap_or(content);
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().unwrap_or_default().chars().count() + 1;
    (line, column)
}

fn location_suffix(location: Option<(usize, usize)>) -> String {
    location.map_or_else(String::new, |(line, column)| format!(" at line {line}, column {column}"))
}

/// An error that carries the exit code the process should terminate with.
#[derive(Error, Debug)]
#[error("{err:#}")]
pub struct ExitCodeError {
    err: anyhow::Error,
    code: i32,
}

impl ExitCodeError {
    pub fn code(&self) -> i32 {
        self.code
    }
}

/// Attach an exit code to `err`.
pub fn with_exit_code(err: impl Into<anyhow::Error>, code: i32) -> anyhow::Error {
    ExitCodeError { err: err.into(), code }.into()
}

/// Exit code carried anywhere in the chain of `err`, or `EXIT_ERROR`.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ExitCodeError>())
        .map_or(EXIT_ERROR, ExitCodeError::code)
}
