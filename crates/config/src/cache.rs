//! Shared cache of parsed config files.
//!
//! Responsibilities:
//! - Map each config file path to its parsed key/value entries.
//! - Populate entries lazily from disk on first access.
//! - Serialize all mutations (set, save, invalidate, populate) behind one lock.
//!
//! Does NOT handle:
//! - Environment variable precedence (see `registry::resolve`).
//! - Key normalization; callers pass already-uppercased keys.
//!
//! Invariants:
//! - An entry exists for a path iff the file was loaded or had a value set
//!   since the last invalidation.
//! - Keys inside an entry are uppercase.
//! - A single `RwLock` guards every file. Readers share it; populate-on-miss
//!   upgrades to exclusive and re-checks before parsing.
//! - `save` holds the exclusive lock across serialize, write, and invalidate.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use parking_lot::{RwLock, RwLockUpgradableReadGuard, RwLockWriteGuard};

use crate::error::RegistryError;
use crate::store::{ParseMode, read_config_file, serialize_entries, write_config_file};
use crate::value::Value;

type Entries = BTreeMap<String, Value>;
type Files = HashMap<PathBuf, Entries>;

/// Cache of parsed config files, shared by every registry holding a handle.
///
/// Registries that point at the same path through the same store see the
/// same entries; different paths are isolated.
#[derive(Debug, Default)]
pub struct CacheStore {
    files: RwLock<Files>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the file at `path` and replaces its entry wholesale.
    pub fn load(&self, path: &Path, separator: &str, mode: ParseMode) -> Result<(), RegistryError> {
        let mut files = self.files.write();
        let entries = read_entries(path, separator, mode)?;
        tracing::debug!(
            path = %path.display(),
            keys = entries.len(),
            "Config file loaded into cache"
        );
        files.insert(path.to_path_buf(), entries);
        Ok(())
    }

    /// Returns the value stored for `key`, populating the entry on a miss.
    pub fn lookup(
        &self,
        path: &Path,
        key: &str,
        separator: &str,
        mode: ParseMode,
    ) -> Result<Option<Value>, RegistryError> {
        self.with_entries(path, separator, mode, |entries| entries.get(key).cloned())
    }

    /// Returns a sorted snapshot of the entry for `path`.
    pub fn entries(
        &self,
        path: &Path,
        separator: &str,
        mode: ParseMode,
    ) -> Result<Vec<(String, Value)>, RegistryError> {
        self.with_entries(path, separator, mode, |entries| {
            entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        })
    }

    /// Stores `value` under `key` without touching disk.
    ///
    /// A missing file starts an empty entry so the value can later be saved
    /// to a new file. Other read failures are returned, leaving the cache
    /// unchanged.
    pub fn set(
        &self,
        path: &Path,
        key: String,
        value: Value,
        separator: &str,
        mode: ParseMode,
    ) -> Result<(), RegistryError> {
        let mut files = self.files.write();
        let entries = populate_for_write(&mut files, path, separator, mode)?;
        entries.insert(key, value);
        Ok(())
    }

    /// Writes the entry for `path` to disk, then invalidates it.
    ///
    /// The invalidation runs whether or not the write succeeds.
    pub fn save(&self, path: &Path, separator: &str, mode: ParseMode) -> Result<(), RegistryError> {
        let mut guard = InvalidateOnDrop {
            files: self.files.write(),
            path,
        };
        let entries = populate_for_write(&mut guard.files, path, separator, mode)?;
        let content = serialize_entries(entries.iter(), separator);
        write_config_file(path, &content)
    }

    /// Drops the entry for `path`; the next access re-reads the file.
    pub fn invalidate(&self, path: &Path) {
        let removed = self.files.write().remove(path).is_some();
        if removed {
            tracing::debug!(path = %path.display(), "Config cache invalidated");
        }
    }

    /// Returns true if an entry is cached for `path`.
    pub fn is_cached(&self, path: &Path) -> bool {
        self.files.read().contains_key(path)
    }

    fn with_entries<R>(
        &self,
        path: &Path,
        separator: &str,
        mode: ParseMode,
        f: impl FnOnce(&Entries) -> R,
    ) -> Result<R, RegistryError> {
        {
            let files = self.files.read();
            if let Some(entries) = files.get(path) {
                return Ok(f(entries));
            }
        }

        // Only one upgradable guard exists at a time, so re-checking here
        // prevents a second parse when another caller populated first.
        let files = self.files.upgradable_read();
        if let Some(entries) = files.get(path) {
            return Ok(f(entries));
        }

        let mut files = RwLockUpgradableReadGuard::upgrade(files);
        let entries = read_entries(path, separator, mode)?;
        tracing::debug!(
            path = %path.display(),
            keys = entries.len(),
            "Config file cached on first access"
        );
        let entries = files.entry(path.to_path_buf()).or_insert(entries);
        Ok(f(entries))
    }
}

/// Removes a file's entry when dropped, holding the write lock until then.
struct InvalidateOnDrop<'a> {
    files: RwLockWriteGuard<'a, Files>,
    path: &'a Path,
}

impl Drop for InvalidateOnDrop<'_> {
    fn drop(&mut self) {
        self.files.remove(self.path);
        tracing::debug!(path = %self.path.display(), "Config cache invalidated after save");
    }
}

fn read_entries(path: &Path, separator: &str, mode: ParseMode) -> Result<Entries, RegistryError> {
    let parsed = read_config_file(path, separator, mode)?;
    Ok(parsed
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect())
}

fn populate_for_write<'a>(
    files: &'a mut Files,
    path: &Path,
    separator: &str,
    mode: ParseMode,
) -> Result<&'a mut Entries, RegistryError> {
    if !files.contains_key(path) {
        let entries = match read_entries(path, separator, mode) {
            Ok(entries) => entries,
            Err(RegistryError::NotFound { .. }) => {
                tracing::debug!(
                    path = %path.display(),
                    "Config file missing, starting an empty cache entry"
                );
                Entries::new()
            }
            Err(e) => return Err(e),
        };
        files.insert(path.to_path_buf(), entries);
    }
    Ok(files.entry(path.to_path_buf()).or_default())
}
