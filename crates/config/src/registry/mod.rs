//! Registry instances binding a config file to a shared cache.
//!
//! Responsibilities:
//! - Provide a builder-pattern `RegistryBuilder` for file path, separator,
//!   prefix, empty-env policy, parse mode, and cache handle.
//! - Normalize keys (prefix + uppercase) before every lookup or store.
//! - Expose load, set, save, write, and invalidate over the shared cache.
//!
//! Does NOT handle:
//! - The precedence algorithm itself (see `resolve.rs`).
//! - Coercion to typed values (see `typed.rs`).
//! - Parsing or writing files (see `store`).
//!
//! Invariants / Assumptions:
//! - The prefix is stored uppercase with a trailing `_`, or not at all.
//! - Two registries share cached state iff they hold the same `CacheStore`
//!   and point at the same path.
//! - The separator of whichever registry first populates an entry is the one
//!   used to parse that file.

mod resolve;
mod typed;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::CacheStore;
use crate::constants::{DEFAULT_CONFIG_FILE, DEFAULT_SEPARATOR};
use crate::error::RegistryError;
use crate::store::ParseMode;
use crate::value::Value;

pub use resolve::Resolution;

/// A prioritized configuration registry for one config file.
///
/// Values resolve from the environment first, then from the cached file.
/// `Registry` is cheap to clone; clones share the same cache handle.
#[derive(Debug, Clone)]
pub struct Registry {
    config_file: PathBuf,
    separator: String,
    prefix: Option<String>,
    allow_empty_env: bool,
    parse_mode: ParseMode,
    cache: Arc<CacheStore>,
}

/// Builder for [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    config_file: Option<PathBuf>,
    separator: Option<String>,
    prefix: Option<String>,
    allow_empty_env: bool,
    parse_mode: ParseMode,
    cache: Option<Arc<CacheStore>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the config file path (defaults to `.env`).
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Set the key/value separator (defaults to `=`).
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Set the prefix prepended to every key, e.g. `app` → `APP_PORT`.
    ///
    /// Trailing underscores collapse into the single separator, so `app`,
    /// `app_`, and `app__` all yield `APP_PORT`.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Treat set-but-empty environment variables as real values.
    pub fn with_allow_empty_env(mut self, allow: bool) -> Self {
        self.allow_empty_env = allow;
        self
    }

    pub fn with_parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = mode;
        self
    }

    /// Share a cache with other registries. Without this, the registry
    /// gets a private cache.
    pub fn with_cache(mut self, cache: Arc<CacheStore>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            config_file: self
                .config_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
            separator: self
                .separator
                .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string()),
            prefix: self.prefix.as_deref().and_then(normalize_prefix),
            allow_empty_env: self.allow_empty_env,
            parse_mode: self.parse_mode,
            cache: self.cache.unwrap_or_default(),
        }
    }
}

impl Registry {
    /// Create a registry for `config_file` backed by `cache`, with default
    /// separator, no prefix, and empty env vars disallowed.
    pub fn new(config_file: impl Into<PathBuf>, cache: Arc<CacheStore>) -> Self {
        RegistryBuilder::new()
            .with_config_file(config_file)
            .with_cache(cache)
            .build()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// The prefix without its trailing underscore, if one is set.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref().and_then(|p| p.strip_suffix('_'))
    }

    /// Replace the key prefix. An empty prefix clears it.
    ///
    /// Trailing underscores are collapsed as in [`RegistryBuilder::with_prefix`].
    pub fn set_prefix(&mut self, prefix: &str) {
        self.prefix = normalize_prefix(prefix);
    }

    pub fn allow_empty_env(&self) -> bool {
        self.allow_empty_env
    }

    pub fn set_allow_empty_env(&mut self, allow: bool) {
        self.allow_empty_env = allow;
    }

    pub fn parse_mode(&self) -> ParseMode {
        self.parse_mode
    }

    pub fn cache(&self) -> &Arc<CacheStore> {
        &self.cache
    }

    /// Uppercase `key` and prepend the prefix unless it is already there.
    pub fn normalize_key(&self, key: &str) -> String {
        let key = key.to_uppercase();
        match &self.prefix {
            Some(prefix) if !key.starts_with(prefix.as_str()) => format!("{prefix}{key}"),
            _ => key,
        }
    }

    /// Parse the config file and replace its cache entry.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if the file is missing or is a
    /// directory, and `RegistryError::Read`/`Parse` on read or strict-mode
    /// parse failures.
    pub fn load_config(&self) -> Result<(), RegistryError> {
        self.cache
            .load(&self.config_file, &self.separator, self.parse_mode)
    }

    /// Look `key` up in the config file only, ignoring the environment.
    ///
    /// Returns `Ok(None)` if the file has no such key.
    pub fn lookup(&self, key: &str) -> Result<Option<Value>, RegistryError> {
        let key = self.normalize_key(key);
        self.cache
            .lookup(&self.config_file, &key, &self.separator, self.parse_mode)
    }

    /// Store `value` under `key` in the cache without touching disk.
    ///
    /// The stored value takes effect for `get` immediately unless an
    /// environment variable shadows it.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<(), RegistryError> {
        let key = self.normalize_key(key);
        self.cache.set(
            &self.config_file,
            key,
            value.into(),
            &self.separator,
            self.parse_mode,
        )
    }

    /// Write every cached entry for this file to disk, then invalidate the
    /// entry so the next read re-parses the file.
    pub fn save(&self) -> Result<(), RegistryError> {
        self.cache
            .save(&self.config_file, &self.separator, self.parse_mode)
    }

    /// `set` followed by `save`.
    pub fn write(&self, key: &str, value: impl Into<Value>) -> Result<(), RegistryError> {
        self.set(key, value)?;
        self.save()
    }

    /// Drop this file's cache entry.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate(&self.config_file);
    }

    /// Sorted snapshot of every key/value pair cached for this file.
    pub fn entries(&self) -> Result<Vec<(String, Value)>, RegistryError> {
        self.cache
            .entries(&self.config_file, &self.separator, self.parse_mode)
    }
}

fn normalize_prefix(prefix: &str) -> Option<String> {
    let prefix = prefix.trim().trim_end_matches('_');
    if prefix.is_empty() {
        None
    } else {
        Some(format!("{}_", prefix.to_uppercase()))
    }
}
