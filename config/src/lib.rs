//! Configuration for Knack, read from `~/.knack/config.toml`.
//!
//! Every section and field is optional. A missing file is not an error: callers
//! get `Ok(None)` and fall back to [`KnackConfig::default`].
//!
//! ```toml
//! [storage]
//! backend = "file"
//! path = "${HOME}/.knack/store.json"
//!
//! [clipboard]
//! mode = "auto"
//! hold_ms = 2000
//!
//! [timing]
//! debounce_ms = 300
//! throttle_ms = 100
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs, io};

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_DEBOUNCE_MS: u64 = 300;
const DEFAULT_THROTTLE_MS: u64 = 100;
const DEFAULT_CLIPBOARD_HOLD_MS: u64 = 2000;

// Default value functions for serde
const fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

const fn default_throttle_ms() -> u64 {
    DEFAULT_THROTTLE_MS
}

const fn default_clipboard_hold_ms() -> u64 {
    DEFAULT_CLIPBOARD_HOLD_MS
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KnackConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub clipboard: ClipboardConfig,
    #[serde(default)]
    pub timing: TimingConfig,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON file on disk.
    #[default]
    File,
    /// Process memory; nothing survives exit.
    Memory,
    /// No store at all. Reads return their fallback, writes are dropped.
    None,
}

impl StorageBackend {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Memory => "memory",
            Self::None => "none",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Store file for the `file` backend. `${VAR}` references are expanded.
    /// Default: `~/.knack/store.json`.
    pub path: Option<String>,
    /// Byte cap for the `memory` backend. Unlimited when absent.
    pub quota_bytes: Option<usize>,
}

impl StorageConfig {
    /// Store file location after env expansion, or the default location.
    ///
    /// `None` only when no path is configured and no home directory exists.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        match self.path.as_deref() {
            Some(raw) => Some(PathBuf::from(expand_env_vars(raw))),
            None => config_dir().map(|dir| dir.join("store.json")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardMode {
    /// OS clipboard when reachable, OSC 52 escape otherwise.
    #[default]
    Auto,
    /// Always use the OSC 52 terminal escape.
    Osc52,
    /// Never touch a clipboard.
    None,
}

#[derive(Debug, Deserialize)]
pub struct ClipboardConfig {
    #[serde(default)]
    pub mode: ClipboardMode,
    /// Upper bound on how long a copy keeps owning the X11/Wayland selection
    /// when no clipboard manager takes it over. Default: 2000.
    #[serde(default = "default_clipboard_hold_ms")]
    pub hold_ms: u64,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            mode: ClipboardMode::default(),
            hold_ms: DEFAULT_CLIPBOARD_HOLD_MS,
        }
    }
}

impl ClipboardConfig {
    pub fn hold(&self) -> Duration {
        Duration::from_millis(self.hold_ms)
    }
}

#[derive(Debug, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            throttle_ms: DEFAULT_THROTTLE_MS,
        }
    }
}

impl TimingConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }
}

/// Replace `${VAR}` with the value of `VAR`, or nothing if it is unset.
///
/// An unclosed `${` is kept literally.
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(open) = rest.find("${") {
        let after = &rest[open + 2..];
        let Some(close) = after.find('}') else {
            break;
        };
        out.push_str(&rest[..open]);
        let var = &after[..close];
        if !var.is_empty() {
            out.push_str(&env::var(var).unwrap_or_default());
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

impl KnackConfig {
    /// Load the config from [`config_path`]. `Ok(None)` when there is no file.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    /// Load from an explicit path. `Ok(None)` when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    pub fn path() -> Option<PathBuf> {
        config_path()
    }
}

/// `~/.knack`, home of the config file, the default store, and logs.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".knack"))
}

pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::{ClipboardMode, ConfigError, KnackConfig, StorageBackend, expand_env_vars};

    fn parse(toml: &str) -> KnackConfig {
        toml::from_str(toml).expect("valid config")
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse("");
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.clipboard.mode, ClipboardMode::Auto);
        assert_eq!(config.clipboard.hold_ms, 2000);
        assert_eq!(config.timing.debounce_ms, 300);
        assert_eq!(config.timing.throttle_ms, 100);
    }

    #[test]
    fn partial_timing_keeps_other_default() {
        let config = parse("[timing]\ndebounce_ms = 50\n");
        assert_eq!(config.timing.debounce_ms, 50);
        assert_eq!(config.timing.throttle_ms, 100);
    }

    #[test]
    fn full_config_parses() {
        let config = parse(
            r#"
[storage]
backend = "memory"
quota_bytes = 1024

[clipboard]
mode = "osc52"
hold_ms = 250

[timing]
debounce_ms = 10
throttle_ms = 20
"#,
        );
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.quota_bytes, Some(1024));
        assert_eq!(config.clipboard.mode, ClipboardMode::Osc52);
        assert_eq!(config.clipboard.hold().as_millis(), 250);
        assert_eq!(config.timing.throttle().as_millis(), 20);
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let err = toml::from_str::<KnackConfig>("[storage]\nbackend = \"redis\"\n");
        assert!(err.is_err());
    }

    #[test]
    fn configured_path_is_expanded() {
        unsafe {
            std::env::set_var("KNACK_TEST_STORE_DIR", "/tmp/knack-test");
        }
        let config = parse("[storage]\npath = \"${KNACK_TEST_STORE_DIR}/kv.json\"\n");
        assert_eq!(
            config.storage.resolved_path(),
            Some(PathBuf::from("/tmp/knack-test/kv.json"))
        );
        unsafe {
            std::env::remove_var("KNACK_TEST_STORE_DIR");
        }
    }

    #[test]
    fn load_from_missing_file_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let loaded = KnackConfig::load_from(&dir.path().join("config.toml")).expect("load");
        assert!(loaded.is_none());
    }

    #[test]
    fn load_from_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[timing\n").expect("write");

        let err = KnackConfig::load_from(&path).expect_err("invalid toml");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), path.as_path());
    }

    #[test]
    fn expand_env_vars_no_vars() {
        assert_eq!(expand_env_vars("hello world"), "hello world");
    }

    #[test]
    fn expand_env_vars_missing_var_becomes_empty() {
        unsafe {
            std::env::remove_var("KNACK_MISSING_VAR_FOR_TEST");
        }
        let result = expand_env_vars("before ${KNACK_MISSING_VAR_FOR_TEST} after");
        assert_eq!(result, "before  after");
    }

    #[test]
    fn expand_env_vars_adjacent_vars() {
        unsafe {
            std::env::set_var("KNACK_ADJ_A", "X");
            std::env::set_var("KNACK_ADJ_B", "Y");
        }
        assert_eq!(expand_env_vars("${KNACK_ADJ_A}${KNACK_ADJ_B}"), "XY");
        unsafe {
            std::env::remove_var("KNACK_ADJ_A");
            std::env::remove_var("KNACK_ADJ_B");
        }
    }

    #[test]
    fn expand_env_vars_unclosed_brace_preserved() {
        assert_eq!(expand_env_vars("test ${UNCLOSED"), "test ${UNCLOSED");
    }

    #[test]
    fn expand_env_vars_empty_var_name_dropped() {
        assert_eq!(expand_env_vars("test ${} more"), "test  more");
    }
}
