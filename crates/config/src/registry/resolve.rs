//! Key resolution across the environment and the cached file.
//!
//! Precedence, highest first:
//! 1. The environment variable named by the normalized key. A non-empty
//!    value always wins. An empty value wins as a real value when empty env
//!    vars are allowed; otherwise it short-circuits to "empty" without
//!    falling through to the file.
//! 2. The cached file entry, populated from disk on a miss.
//! 3. Nothing.

use super::Registry;
use crate::env::{EnvVar, read_env_var};
use crate::value::Value;

/// Where a key resolved from.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Set in the environment (possibly empty when empty values are allowed).
    Env(String),
    /// Set but empty in the environment while empty values are disallowed.
    /// Shadows the file value.
    EmptyEnv,
    /// Found in the config file or set programmatically.
    File(Value),
    /// Not found anywhere, or the file could not be read.
    Absent,
}

impl Resolution {
    /// True for `Env` and `File`.
    pub fn is_present(&self) -> bool {
        matches!(self, Resolution::Env(_) | Resolution::File(_))
    }

    /// Collapse to a value, using the empty string for `EmptyEnv` and `Absent`.
    pub fn into_value(self) -> Value {
        match self {
            Resolution::Env(value) => Value::String(value),
            Resolution::File(value) => value,
            Resolution::EmptyEnv | Resolution::Absent => Value::empty(),
        }
    }
}

impl Registry {
    /// Resolve `key` and report which source it came from.
    pub fn resolve(&self, key: &str) -> Resolution {
        if key.is_empty() {
            return Resolution::Absent;
        }
        let key = self.normalize_key(key);

        match read_env_var(&key) {
            EnvVar::Set(value) => return Resolution::Env(value),
            EnvVar::Empty if self.allow_empty_env => return Resolution::Env(String::new()),
            EnvVar::Empty => return Resolution::EmptyEnv,
            EnvVar::Unset => {}
        }

        match self
            .cache
            .lookup(&self.config_file, &key, &self.separator, self.parse_mode)
        {
            Ok(Some(value)) => Resolution::File(value),
            Ok(None) => Resolution::Absent,
            Err(e) => {
                tracing::debug!(key = %key, error = %e, "Config file unavailable during resolve");
                Resolution::Absent
            }
        }
    }

    /// Resolve `key` to a raw value, or the empty string if it is absent.
    ///
    /// Never fails: read errors are treated as absence. Use [`Registry::lookup`]
    /// or [`Registry::load_config`] to observe them.
    pub fn get(&self, key: &str) -> Value {
        self.resolve(key).into_value()
    }
}
