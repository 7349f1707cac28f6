//! Merge every configuration source into the final [`Config`]

use super::env::{apply_env_map, apply_env_vars};
use super::env_file::load_env_file;
use super::loader::load_config_file;
use crate::domain::Config;
use crate::error::ConfigError;
use crate::DEFAULT_LOG_PATH;
use std::ffi::OsString;
use std::path::Path;

/// A configuration source consulted during consolidation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEvent {
    /// The config file was read; `set` tells whether it supplied a value.
    ConfigFile { path: String, set: bool },
    /// The environment file was read and these keys were applied.
    EnvFile { path: String, applied: Vec<&'static str> },
    /// The environment file path was given but no file exists there.
    EnvFileMissing { path: String },
    /// A process environment variable was applied.
    ProcessEnv { key: String },
    /// The CLI value was applied.
    Cli,
    /// No source left a value; the build-time default was used.
    Fallback,
}

/// The consolidated [`Config`] together with the sources that shaped it.
///
/// Consolidation runs before the logger exists, so the events are kept and
/// reported once it does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consolidation {
    pub config: Config,
    pub events: Vec<SourceEvent>,
}

impl Consolidation {
    /// Report every consulted source at debug level.
    pub fn log_sources(&self) {
        for event in &self.events {
            match event {
                SourceEvent::ConfigFile { path, set } => {
                    tracing::debug!(path = %path, set, "Loaded config file");
                }
                SourceEvent::EnvFile { path, applied } => {
                    tracing::debug!(path = %path, applied = ?applied, "Loaded environment file");
                }
                SourceEvent::EnvFileMissing { path } => {
                    tracing::debug!(path = %path, "Environment file not found, skipping");
                }
                SourceEvent::ProcessEnv { key } => {
                    tracing::debug!(key = %key, "Applied value from process environment");
                }
                SourceEvent::Cli => tracing::debug!("Applied value from command line"),
                SourceEvent::Fallback => tracing::debug!("Using built-in default log path"),
            }
        }
        tracing::debug!(log_path = %self.config.log_path, "Configuration consolidated");
    }
}

/// Build the final configuration from the config file, the environment file,
/// the process environment and the CLI value, in increasing precedence.
///
/// Empty arguments mean "not supplied". Parse errors from either file abort
/// the consolidation and are returned unchanged.
pub fn consolidate(
    config_path: &str,
    env_path: &str,
    default_log_path: &str,
    cli_log_path: &str,
) -> Result<Config, ConfigError> {
    consolidate_with_env(config_path, env_path, default_log_path, cli_log_path, std::env::vars_os())
}

/// [`consolidate`] with an explicit process environment.
pub fn consolidate_with_env<I>(
    config_path: &str,
    env_path: &str,
    default_log_path: &str,
    cli_log_path: &str,
    vars: I,
) -> Result<Config, ConfigError>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    resolve(config_path, env_path, default_log_path, cli_log_path, vars).map(|c| c.config)
}

/// [`consolidate_with_env`], also recording which sources were consulted.
pub fn resolve<I>(
    config_path: &str,
    env_path: &str,
    default_log_path: &str,
    cli_log_path: &str,
    vars: I,
) -> Result<Consolidation, ConfigError>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut cfg = Config::new(default_log_path);
    let mut events = Vec::new();

    // 1) Config file (TOML, lowest priority)
    if !config_path.is_empty() {
        let partial = load_config_file(Path::new(config_path))?;
        events.push(SourceEvent::ConfigFile {
            path: config_path.to_string(),
            set: !partial.is_empty(),
        });
        cfg.overlay(partial);
    }

    // 2) Environment file
    if !env_path.is_empty() {
        match load_env_file(Path::new(env_path))? {
            Some(map) => {
                let applied = apply_env_map(&mut cfg, &map);
                events.push(SourceEvent::EnvFile { path: env_path.to_string(), applied });
            }
            None => events.push(SourceEvent::EnvFileMissing { path: env_path.to_string() }),
        }
    }

    // 3) Process environment
    for key in apply_env_vars(&mut cfg, vars) {
        events.push(SourceEvent::ProcessEnv { key });
    }

    // 4) CLI args (highest priority)
    if !cli_log_path.is_empty() {
        cfg.log_path = cli_log_path.to_string();
        events.push(SourceEvent::Cli);
    }

    if cfg.log_path.is_empty() {
        if default_log_path.is_empty() {
            cfg.log_path = DEFAULT_LOG_PATH.to_string();
            events.push(SourceEvent::Fallback);
        } else {
            cfg.log_path = default_log_path.to_string();
        }
    }

    Ok(Consolidation { config: cfg, events })
}
