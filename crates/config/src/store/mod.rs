//! On-disk representation of config files.
//!
//! Responsibilities:
//! - Parse `KEY<sep>value` text into a flat mapping (`reader`).
//! - Serialize a mapping back to text and write it to disk (`writer`).
//!
//! Does NOT handle:
//! - Caching parsed files or locking (see `cache`).
//! - Environment variable precedence (see `registry`).
//!
//! Invariants:
//! - Directories are never treated as config files.
//! - Quotes stripped on read are never re-added on write.

mod reader;
mod writer;

pub use reader::{ParseMode, read_config_file};
pub(crate) use writer::{serialize_entries, write_config_file};
