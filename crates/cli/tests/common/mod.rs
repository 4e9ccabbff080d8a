//! Shared test utilities for envreg integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory.
//!
//! Invariants / Assumptions:
//! - `ENVREG_FILE` and `ENVREG_PREFIX` are cleared so host settings never leak in.
//! - Logging is silenced so stderr only carries error messages.

use assert_cmd::Command;

/// Returns a hermetic `envreg` command for integration testing.
pub fn envreg_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("envreg");

    cmd.env_remove("ENVREG_FILE")
        .env_remove("ENVREG_PREFIX")
        .env("RUST_LOG", "off");

    cmd
}
