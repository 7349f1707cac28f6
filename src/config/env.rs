//! Environment-variable overlays
//!
//! Recognised keys live in ordered binding tables so adding a key or a field
//! is a table entry rather than another branch.

use super::env_file::EnvMap;
use crate::domain::{set_log_path, Config, FieldSetter};
use std::ffi::OsString;

/// Prefix for process environment variables (e.g. `APPNAME_LOG`).
pub const ENV_PREFIX: &str = "APPNAME_";

/// A configuration field and the variable names that may set it, highest
/// priority first.
#[derive(Clone, Copy)]
pub struct EnvBinding {
    pub keys: &'static [&'static str],
    pub set: FieldSetter,
}

/// Bindings for environment files. For each field the first key with a
/// non-empty value wins; later keys in the list are not consulted.
pub const ENV_FILE_BINDINGS: &[EnvBinding] =
    &[EnvBinding { keys: &["APPNAME_LOG", "LOG_PATH", "LOG"], set: set_log_path }];

/// Bindings for the live process environment, checked after the prefix test.
pub const PROCESS_ENV_BINDINGS: &[EnvBinding] =
    &[EnvBinding { keys: &["APPNAME_LOG"], set: set_log_path }];

/// Overlay non-empty values from an environment-file map onto `cfg`,
/// returning the keys that were applied.
pub fn apply_env_map(cfg: &mut Config, map: &EnvMap) -> Vec<&'static str> {
    let mut applied = Vec::new();
    for binding in ENV_FILE_BINDINGS {
        let found = binding
            .keys
            .iter()
            .find_map(|&key| map.get(key).filter(|v| !v.is_empty()).map(|v| (key, v)));
        if let Some((key, value)) = found {
            (binding.set)(cfg, value.clone());
            applied.push(key);
        }
    }
    applied
}

/// Overlay `APPNAME_*` variables from the process environment onto `cfg`.
pub fn apply_env(cfg: &mut Config) {
    apply_env_vars(cfg, std::env::vars_os());
}

/// Overlay `APPNAME_*` variables from `vars` onto `cfg`.
///
/// Names and values that are not valid UTF-8 are skipped, as are prefixed
/// names with no recognised meaning and values that are blank once trimmed.
/// Returns the names that were applied.
pub fn apply_env_vars<I>(cfg: &mut Config, vars: I) -> Vec<String>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut applied = Vec::new();
    for (name, value) in vars {
        let (Some(name), Some(value)) = (name.to_str(), value.to_str()) else {
            continue;
        };
        if !name.starts_with(ENV_PREFIX) {
            continue;
        }
        let name = name.to_uppercase();
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        if let Some(binding) = PROCESS_ENV_BINDINGS.iter().find(|b| b.keys.contains(&name.as_str())) {
            (binding.set)(cfg, value.to_string());
            applied.push(name);
        }
    }
    applied
}
