//! Environment variable access for key resolution.
//!
//! Responsibilities:
//! - Read a single environment variable and classify it as unset, empty, or set.
//!
//! Does NOT handle:
//! - Key normalization or prefixing (see `registry`).
//! - Deciding whether an empty variable counts as a value (see `registry::resolve`).
//!
//! Invariants:
//! - Values are returned verbatim; no trimming is applied.
//! - Non-UTF-8 values are converted lossily rather than treated as unset.

/// The state of one environment variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EnvVar {
    Unset,
    Empty,
    Set(String),
}

/// Read an environment variable, distinguishing unset from set-but-empty.
pub(crate) fn read_env_var(key: &str) -> EnvVar {
    match std::env::var_os(key) {
        None => EnvVar::Unset,
        Some(raw) if raw.is_empty() => EnvVar::Empty,
        Some(raw) => EnvVar::Set(raw.to_string_lossy().into_owned()),
    }
}
