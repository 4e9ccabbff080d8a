//! Prioritized configuration registry.
//!
//! This crate resolves configuration values by key across the process
//! environment and an on-disk `KEY=value` file, caching parsed files in a
//! shared [`CacheStore`] and writing updated values back to disk.

mod cache;
pub mod constants;
mod env;
mod error;
mod registry;
mod store;
mod value;

pub use cache::CacheStore;
pub use error::RegistryError;
pub use registry::{Registry, RegistryBuilder, Resolution};
pub use store::{ParseMode, read_config_file};
pub use value::Value;
