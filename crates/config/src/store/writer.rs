//! Config file serialization and atomic writes.

use std::fs::{File, Permissions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::constants::TEMP_FILE_SUFFIX;
use crate::error::RegistryError;
use crate::value::Value;

/// Renders entries as `KEY<sep>value\n` lines, in iteration order.
pub(crate) fn serialize_entries<'a, I>(entries: I, separator: &str) -> String
where
    I: IntoIterator<Item = (&'a String, &'a Value)>,
{
    let mut content = String::new();
    for (key, value) in entries {
        content.push_str(key);
        content.push_str(separator);
        content.push_str(&value.to_string());
        content.push('\n');
    }
    content
}

/// Writes `content` to `path`, creating the parent directory if needed.
///
/// Writes to a sibling temporary file first, then renames it over the
/// target so readers never observe a partially written file. A symlinked
/// `path` is followed so the link's target receives the update, and an
/// existing file keeps its permissions.
pub(crate) fn write_config_file(path: &Path, content: &str) -> Result<(), RegistryError> {
    let target = resolve_symlink(path);

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| RegistryError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let write_error = |source| RegistryError::Write {
        path: path.to_path_buf(),
        source,
    };

    let Some(temp_path) = temp_path_for(&target) else {
        return std::fs::write(&target, content).map_err(write_error);
    };

    let permissions = std::fs::metadata(&target)
        .ok()
        .filter(|m| m.is_file())
        .map(|m| m.permissions());
    let result = write_temp_file(&temp_path, content, permissions)
        .and_then(|()| std::fs::rename(&temp_path, &target));
    if let Err(source) = result {
        let _ = std::fs::remove_file(&temp_path);
        return Err(write_error(source));
    }

    tracing::debug!(
        path = %target.display(),
        bytes = content.len(),
        "Config file written"
    );

    Ok(())
}

/// Returns the file a symlink points at, or `path` itself.
///
/// Dangling links resolve to `path`, so the save replaces the link.
fn resolve_symlink(path: &Path) -> PathBuf {
    let is_symlink = std::fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);
    if is_symlink {
        std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
    } else {
        path.to_path_buf()
    }
}

// Permissions are applied before any content is written.
fn write_temp_file(
    temp_path: &Path,
    content: &str,
    permissions: Option<Permissions>,
) -> io::Result<()> {
    let mut file = File::create(temp_path)?;
    if let Some(permissions) = permissions {
        file.set_permissions(permissions)?;
    }
    file.write_all(content.as_bytes())?;
    file.sync_all()
}

fn temp_path_for(path: &Path) -> Option<PathBuf> {
    let mut name = path.file_name()?.to_os_string();
    name.push(TEMP_FILE_SUFFIX);
    Some(path.with_file_name(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn test_serialize_uses_separator_and_display_form() {
        let mut entries = BTreeMap::new();
        entries.insert("B".to_string(), Value::from(true));
        entries.insert("A".to_string(), Value::from("my string"));
        entries.insert("C".to_string(), Value::from(3i64));

        assert_eq!(
            serialize_entries(&entries, "="),
            "A=my string\nB=true\nC=3\n"
        );
        assert_eq!(serialize_entries(&entries, ": "), "A: my string\nB: true\nC: 3\n");
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("deeper").join("app.env");

        write_config_file(&path, "A=1\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "A=1\n");
        assert!(!temp_path_for(&path).unwrap().exists());
    }

    #[test]
    fn test_write_replaces_existing_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        std::fs::write(&path, "OLD=1\nLONGER_CONTENT=abcdefghijkl\n").unwrap();

        write_config_file(&path, "NEW=2\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "NEW=2\n");
    }

    #[test]
    fn test_write_to_directory_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("taken");
        std::fs::create_dir(&dir).unwrap();

        let result = write_config_file(&dir, "A=1\n");
        assert!(matches!(result, Err(RegistryError::Write { .. })));
        assert!(!temp_path_for(&dir).unwrap().exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_preserves_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        std::fs::write(&path, "SECRET=1\n").unwrap();
        std::fs::set_permissions(&path, Permissions::from_mode(0o600)).unwrap();

        write_config_file(&path, "SECRET=2\n").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "SECRET=2\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_through_symlink_updates_target() {
        let temp_dir = TempDir::new().unwrap();
        let real = temp_dir.path().join("real.env");
        let link = temp_dir.path().join("link.env");
        std::fs::write(&real, "X=1\n").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        write_config_file(&link, "X=2\n").unwrap();

        assert!(
            std::fs::symlink_metadata(&link)
                .unwrap()
                .file_type()
                .is_symlink()
        );
        assert_eq!(std::fs::read_to_string(&real).unwrap(), "X=2\n");
        assert!(!temp_dir.path().join("link.env.tmp").exists());
        assert!(!temp_dir.path().join("real.env.tmp").exists());
    }

    #[test]
    fn test_temp_path_is_sibling_of_target() {
        let path = Path::new("/etc/app/.env");
        assert_eq!(temp_path_for(path).unwrap(), Path::new("/etc/app/.env.tmp"));
    }
}
