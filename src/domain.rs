//! Configuration records

/// Final, fully-populated application configuration.
///
/// Built once per invocation by [`crate::config::consolidate`] and treated as
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    /// Path to the log file.
    pub log_path: String,
}

/// One source's contribution to [`Config`]. `None` means the source did not
/// set the field; readers never produce `Some("")`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartialConfig {
    pub log_path: Option<String>,
}

/// Writes a value into the matching field of a [`Config`].
pub type FieldSetter = fn(&mut Config, String);

pub fn set_log_path(cfg: &mut Config, value: String) {
    cfg.log_path = value;
}

impl Config {
    pub fn new(log_path: impl Into<String>) -> Self {
        Self { log_path: log_path.into() }
    }

    /// Overlay every field `partial` sets.
    pub fn overlay(&mut self, partial: PartialConfig) {
        if let Some(log_path) = partial.log_path.filter(|v| !v.is_empty()) {
            self.log_path = log_path;
        }
    }
}

impl PartialConfig {
    pub fn is_empty(&self) -> bool {
        self.log_path.is_none()
    }
}
