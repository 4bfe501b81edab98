//! Error types for feedwall.
//!
//! The virtualization engine itself never returns errors: missing elements,
//! an exhausted store, rejected playback and out-of-range ids are all normal
//! conditions that the next re-evaluation pass corrects. Errors exist only at
//! the edges of the program.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned by the binary
//!   - [`InputError`] - Feed file reading and decoding failures
//!   - [`ConfigError`] - Config file reading, parsing and validation failures
//!   - [`LoggingError`] - Tracing subscriber setup failures
//! - [`PlaybackError`] - Returned by a surface when video playback cannot
//!   start. The engine swallows it.
//!
//! [`ConfigError`]: crate::config::loader::ConfigError
//! [`LoggingError`]: crate::logging::LoggingError

use crate::config::loader::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all fatal failure modes.
///
/// # Examples
///
/// ```no_run
/// use feedwall::model::error::{AppError, InputError};
///
/// fn run() -> Result<(), AppError> {
///     let _store = read_feed()?;
///     Ok(())
/// }
/// # fn read_feed() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// The feed file could not be read or decoded.
    #[error("Failed to read feed: {0}")]
    Input(#[from] InputError),

    /// The configuration could not be loaded.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized.
    #[error("Failed to initialize logging: {0}")]
    Logging(#[from] LoggingError),

    /// Writing the session report failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    /// The session report could not be serialized.
    #[error("Failed to serialize report: {0}")]
    Report(#[source] serde_json::Error),
}

/// Errors encountered when loading a feed file.
#[derive(Debug, Error)]
pub enum InputError {
    /// The feed file does not exist.
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use feedwall::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound { path: PathBuf::from("/tmp/missing.json") };
    /// assert!(err.to_string().contains("/tmp/missing.json"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was attempted.
        path: PathBuf,
    },

    /// The feed file exists but could not be read.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// The path being read.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The feed is not a JSON array of items nor an object with a `tweets` array.
    #[error("Malformed feed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Video playback could not start, typically because autoplay is blocked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The environment refused to start playback without a user gesture.
    #[error("autoplay blocked by the environment")]
    AutoplayBlocked,

    /// The video element no longer exists.
    #[error("video element is detached")]
    Detached,
}
