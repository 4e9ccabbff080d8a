//! `envreg lookup`: file-only lookup that fails when the key is absent.

use anyhow::{Context, Result};
use envreg_config::Registry;
use serde_json::json;

use crate::args::OutputFormat;
use crate::error::KeyNotFound;

pub fn run(registry: &Registry, key: &str, output: OutputFormat) -> Result<()> {
    let value = registry
        .lookup(key)
        .context("Failed to read config file")?
        .ok_or_else(|| KeyNotFound {
            key: registry.normalize_key(key),
            path: registry.config_file().to_path_buf(),
        })?;

    match output {
        OutputFormat::Plain => println!("{value}"),
        OutputFormat::Json => {
            let body = json!({ "key": registry.normalize_key(key), "value": value });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(())
}
