//! Centralized defaults for the registry.
//!
//! These values are used by [`crate::RegistryBuilder`] when the caller does
//! not override them.

// =============================================================================
// File Defaults
// =============================================================================

/// Config file used when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = ".env";

/// Symbol separating a key from its value on each line.
pub const DEFAULT_SEPARATOR: &str = "=";

// =============================================================================
// Parsing
// =============================================================================

/// Token that may precede a key (`export KEY=value`).
pub const EXPORT_TOKEN: &str = "export ";

/// Lines starting with this marker (after leading whitespace) are comments.
pub const COMMENT_MARKER: char = '#';

/// Suffix appended to the file name for the temporary file used during save.
pub const TEMP_FILE_SUFFIX: &str = ".tmp";
