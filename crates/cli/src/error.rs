//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `RegistryError` variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.

use std::path::PathBuf;

use envreg_config::RegistryError;

/// A key that `lookup` could not find in the config file.
#[derive(Debug, thiserror::Error)]
#[error("Key '{key}' not found in {}", .path.display())]
pub struct KeyNotFound {
    pub key: String,
    pub path: PathBuf,
}

/// Structured exit codes for envreg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Not found - the config file or the requested key does not exist.
    NotFound = 4,

    /// Validation error - the config file has a malformed line (strict mode).
    ValidationError = 5,

    /// Permission denied - the config file or its directory is not accessible.
    PermissionDenied = 6,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&RegistryError> for ExitCode {
    fn from(err: &RegistryError) -> Self {
        match err {
            RegistryError::NotFound { .. } => ExitCode::NotFound,
            RegistryError::Parse { .. } => ExitCode::ValidationError,
            RegistryError::Read { source, .. }
            | RegistryError::CreateDir { source, .. }
            | RegistryError::Write { source, .. } => {
                if source.kind() == std::io::ErrorKind::PermissionDenied {
                    ExitCode::PermissionDenied
                } else {
                    ExitCode::GeneralError
                }
            }
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(registry_err) = cause.downcast_ref::<RegistryError>() {
                return ExitCode::from(registry_err);
            }
            if cause.downcast_ref::<KeyNotFound>().is_some() {
                return ExitCode::NotFound;
            }
        }

        ExitCode::GeneralError
    }
}
