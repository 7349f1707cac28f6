//! Config file loading

use super::read_optional;
use crate::domain::PartialConfig;
use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Shape of the TOML config file. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    log_path: Option<String>,
}

/// Read a TOML config file into a [`PartialConfig`].
///
/// A missing file yields an empty partial config; a malformed one is an error.
pub fn load_config_file(path: &Path) -> Result<PartialConfig, ConfigError> {
    let Some(content) = read_optional(path)? else {
        return Ok(PartialConfig::default());
    };

    let parsed: FileConfig =
        toml::from_str(&content).map_err(|err| ConfigError::toml(path, &content, &err))?;

    Ok(PartialConfig { log_path: parsed.log_path.filter(|v| !v.is_empty()) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let tmp = TempDir::new().expect("tmp");
        let cfg = load_config_file(&tmp.path().join("appname.toml")).expect("config");
        assert!(cfg.is_empty());
    }

    #[test]
    fn test_reads_log_path() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("appname.toml");
        fs::write(&path, "log_path = \"/from-file.log\"\n").expect("write");

        let cfg = load_config_file(&path).expect("config");
        assert_eq!(cfg.log_path.as_deref(), Some("/from-file.log"));
    }

    #[test]
    fn test_empty_log_path_is_unset() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("appname.toml");
        fs::write(&path, "log_path = \"\"\n").expect("write");

        let cfg = load_config_file(&path).expect("config");
        assert!(cfg.log_path.is_none());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("appname.toml");
        fs::write(&path, "theme = \"dark\"\n[extra]\nx = 1\n").expect("write");

        let cfg = load_config_file(&path).expect("config");
        assert!(cfg.is_empty());
    }

    #[test]
    fn test_malformed_file_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("appname.toml");
        fs::write(&path, "log_path = \"unterminated\n").expect("write");

        let err = load_config_file(&path).expect_err("malformed TOML should fail");
        assert!(matches!(err, ConfigError::Toml { .. }));
    }

    #[test]
    fn test_wrong_type_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("appname.toml");
        fs::write(&path, "log_path = 5\n").expect("write");

        assert!(load_config_file(&path).is_err(), "integer log_path should fail");
    }

    #[test]
    fn test_directory_is_a_read_error() {
        let tmp = TempDir::new().expect("tmp");
        let err = load_config_file(tmp.path()).expect_err("directory is not a config file");
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
