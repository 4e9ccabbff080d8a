//! CLI command implementations.

pub mod get;
pub mod list;
pub mod lookup;
pub mod set;
