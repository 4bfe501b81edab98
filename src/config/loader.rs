//! Configuration file loading with precedence handling.

use super::EngineConfig;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG: &str = "FEEDWALL_CONFIG";
/// Environment variable overriding the column count.
pub const ENV_COLUMNS: &str = "FEEDWALL_COLUMNS";
/// Environment variable overriding the batch size.
pub const ENV_BATCH_SIZE: &str = "FEEDWALL_BATCH_SIZE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A setting parsed but has a value the engine cannot run with.
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/feedwall/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Number of render columns.
    #[serde(default)]
    pub columns: Option<usize>,

    /// Items appended per load.
    #[serde(default)]
    pub batch_size: Option<usize>,

    /// Upward margin of the visibility window.
    #[serde(default)]
    pub extra_top: Option<f64>,

    /// Downward margin of the visibility window.
    #[serde(default)]
    pub extra_bottom: Option<f64>,

    /// Distance below the viewport that triggers the next load.
    #[serde(default)]
    pub load_lookahead: Option<f64>,

    /// Distance below the viewport where media monitoring starts.
    #[serde(default)]
    pub monitor_lookahead: Option<f64>,

    /// Floor between visibility passes, in milliseconds.
    #[serde(default)]
    pub min_pass_interval_ms: Option<u64>,

    /// Quiet period before a media remeasure, in milliseconds.
    #[serde(default)]
    pub remeasure_debounce_ms: Option<u64>,

    /// Visible fraction that starts a video.
    #[serde(default)]
    pub video_threshold: Option<f64>,

    /// Width of a render column.
    #[serde(default)]
    pub column_width: Option<f64>,

    /// Gap between stacked items.
    #[serde(default)]
    pub item_gap: Option<f64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Engine tunables.
    pub engine: EngineConfig,
    /// Width of a render column.
    pub column_width: f64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            column_width: 360.0,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Check the merged settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` when an engine setting is out of range
    /// or the column width is not positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        if !(self.column_width.is_finite() && self.column_width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "column_width must be positive, got {}",
                self.column_width
            )));
        }
        Ok(())
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/feedwall/feedwall.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("feedwall").join("feedwall.log")
    } else {
        PathBuf::from("feedwall.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/feedwall/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("feedwall").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `FEEDWALL_CONFIG` environment variable
/// 3. Default path `~/.config/feedwall/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let engine = defaults.engine;
    ResolvedConfig {
        engine: EngineConfig {
            columns: config.columns.unwrap_or(engine.columns),
            batch_size: config.batch_size.unwrap_or(engine.batch_size),
            extra_top: config.extra_top.unwrap_or(engine.extra_top),
            extra_bottom: config.extra_bottom.unwrap_or(engine.extra_bottom),
            load_lookahead: config.load_lookahead.unwrap_or(engine.load_lookahead),
            monitor_lookahead: config
                .monitor_lookahead
                .unwrap_or(engine.monitor_lookahead),
            min_pass_interval_ms: config
                .min_pass_interval_ms
                .unwrap_or(engine.min_pass_interval_ms),
            remeasure_debounce_ms: config
                .remeasure_debounce_ms
                .unwrap_or(engine.remeasure_debounce_ms),
            video_threshold: config.video_threshold.unwrap_or(engine.video_threshold),
            item_gap: config.item_gap.unwrap_or(engine.item_gap),
        },
        column_width: config.column_width.unwrap_or(defaults.column_width),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `FEEDWALL_COLUMNS`: Override column count
/// - `FEEDWALL_BATCH_SIZE`: Override batch size
///
/// # Errors
///
/// Returns `ConfigError::Invalid` when a variable is set but is not a
/// non-negative integer.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Some(columns) = env_usize(ENV_COLUMNS)? {
        config.engine.columns = columns;
    }
    if let Some(batch_size) = env_usize(ENV_BATCH_SIZE)? {
        config.engine.batch_size = batch_size;
    }
    Ok(config)
}

fn env_usize(name: &str) -> Result<Option<usize>, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{name}={raw:?} is not a count"))),
        Err(_) => Ok(None),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    columns_override: Option<usize>,
    batch_size_override: Option<usize>,
) -> ResolvedConfig {
    if let Some(columns) = columns_override {
        config.engine.columns = columns;
    }

    if let Some(batch_size) = batch_size_override {
        config.engine.batch_size = batch_size;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
