//! Config file parsing.
//!
//! The grammar is deliberately small: one `KEY<sep>VALUE` assignment per
//! line, an optional leading `export ` before the key, and at most one
//! matching pair of `'` or `"` quotes around the value. Blank lines and
//! `#` comments are ignored. There is no escape, multiline, or
//! interpolation support.
//!
//! Keys come out uppercase. Lines that are not valid UTF-8 are malformed.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

use crate::constants::{COMMENT_MARKER, EXPORT_TOKEN};
use crate::error::RegistryError;

/// How malformed lines are handled while parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Skip malformed lines and keep the rest of the file.
    #[default]
    Lenient,
    /// Fail the whole load on the first malformed line.
    Strict,
}

/// Result of parsing file content.
#[derive(Debug, Default)]
pub(crate) struct ParsedConfig {
    pub entries: BTreeMap<String, String>,
    /// 1-based numbers of lines skipped in lenient mode.
    pub skipped: Vec<usize>,
}

/// Reads and parses the config file at `path`.
///
/// Returns `RegistryError::NotFound` if the path does not exist or is a
/// directory, `RegistryError::Read` on other I/O failures, and
/// `RegistryError::Parse` for a malformed line in strict mode.
pub fn read_config_file(
    path: &Path,
    separator: &str,
    mode: ParseMode,
) -> Result<BTreeMap<String, String>, RegistryError> {
    let not_found = || RegistryError::NotFound {
        path: path.to_path_buf(),
    };
    let read_error = |source: std::io::Error| {
        if source.kind() == ErrorKind::NotFound {
            not_found()
        } else {
            RegistryError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    };

    let metadata = std::fs::metadata(path).map_err(read_error)?;
    if metadata.is_dir() {
        return Err(not_found());
    }

    let content = std::fs::read(path).map_err(read_error)?;
    let parsed = parse_config(&content, separator, mode).map_err(|line| RegistryError::Parse {
        path: path.to_path_buf(),
        line,
    })?;

    if !parsed.skipped.is_empty() {
        tracing::warn!(
            path = %path.display(),
            lines = ?parsed.skipped,
            "Skipped malformed lines in config file"
        );
    }

    Ok(parsed.entries)
}

/// Parses raw config file content.
///
/// Keys are uppercased as they are read, so when two lines differ only in
/// key case the later line wins. A line that is not valid UTF-8 counts as
/// malformed.
///
/// On failure in strict mode, returns the 1-based number of the first
/// malformed line.
pub(crate) fn parse_config(
    content: &[u8],
    separator: &str,
    mode: ParseMode,
) -> Result<ParsedConfig, usize> {
    let mut parsed = ParsedConfig::default();

    for (index, raw) in content.split(|&b| b == b'\n').enumerate() {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let entry = match std::str::from_utf8(raw) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
                    continue;
                }
                parse_line(trimmed, separator)
            }
            Err(_) => None,
        };

        match entry {
            Some((key, value)) => {
                parsed.entries.insert(key.to_uppercase(), value.to_string());
            }
            None if mode == ParseMode::Strict => return Err(index + 1),
            None => parsed.skipped.push(index + 1),
        }
    }

    Ok(parsed)
}

fn parse_line<'a>(line: &'a str, separator: &str) -> Option<(&'a str, &'a str)> {
    if separator.is_empty() {
        return None;
    }
    let (key, value) = line.split_once(separator)?;

    let key = key.trim();
    let key = key
        .strip_prefix(EXPORT_TOKEN)
        .map(str::trim_start)
        .unwrap_or(key);
    if key.is_empty() {
        return None;
    }

    Some((key, unquote(value.trim())))
}

/// Strips one level of matching single or double quotes.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(&first), Some(&last))
            if bytes.len() >= 2 && first == last && (first == b'"' || first == b'\'') =>
        {
            &value[1..value.len() - 1]
        }
        _ => value,
    }
}
