//! Error types for the registry.
//!
//! Responsibilities:
//! - Define error variants for reading, parsing, and writing config files.
//! - Classify not-found failures (missing file or directory path).
//!
//! Does NOT handle:
//! - Coercion failures in typed accessors (those collapse to zero values).
//!
//! Invariants:
//! - All error variants carry the config file path.
//! - Parse errors NEVER include raw line contents to prevent secret leakage.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or saving a config file.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The config file does not exist or is a directory.
    #[error("Config file not found at {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A malformed line was found while parsing in strict mode.
    ///
    /// SAFETY: Only the 1-based line number is reported, never the line text.
    #[error("Failed to parse config file at {path}: malformed line {line}")]
    Parse { path: PathBuf, line: usize },

    #[error("Failed to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl RegistryError {
    /// Returns true if the config file is missing or is a directory.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::NotFound { .. })
    }
}
