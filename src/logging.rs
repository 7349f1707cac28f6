//! File logger
//!
//! Installs a process-wide `tracing` subscriber that appends to a single log
//! file. Initialisation happens at most once: the first call picks the
//! target and later calls only report it. Failing to create or open the file
//! never surfaces as an error; log output is discarded instead.

use once_cell::sync::OnceCell;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log file permissions: owner read/write only.
const LOG_FILE_MODE: u32 = 0o600;
/// Permissions for parent directories created on demand.
const LOG_DIR_MODE: u32 = 0o755;

/// Where log records end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Discard,
}

static TARGET: OnceCell<LogTarget> = OnceCell::new();

/// Initialise the process-wide logger if that has not happened yet.
///
/// Returns the target chosen by the first call, whatever `path` is now.
pub fn init(path: &Path, verbose: bool) -> &'static LogTarget {
    TARGET.get_or_init(|| install(path, verbose))
}

/// Target chosen by the first [`init`] call, if any.
pub fn target() -> Option<&'static LogTarget> {
    TARGET.get()
}

fn install(path: &Path, verbose: bool) -> LogTarget {
    let filter = log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(), verbose);

    match open_log_file(path) {
        Ok(file) => {
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
                .with(filter)
                .try_init();
            LogTarget::File(path.to_path_buf())
        }
        Err(_) => {
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::sink))
                .with(filter)
                .try_init();
            LogTarget::Discard
        }
    }
}

/// A non-blank, valid `RUST_LOG` decides on its own; otherwise the floor is
/// INFO, or DEBUG with `--verbose`.
fn log_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::default().add_directive(level.into()))
}

/// Open `path` for appending, creating it and any missing parent directories.
///
/// On Unix the file is created `0600` and directories `0755`.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if path.as_os_str().is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty log path"));
    }
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(LOG_DIR_MODE);
        }
        builder.create(dir)?;
    }

    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(LOG_FILE_MODE);
    }
    options.open(path)
}

/// Record a CLI invocation.
pub fn log_cli_action(command: &str, args: &[String]) {
    tracing::info!(command, args = ?args, "cli action");
}
