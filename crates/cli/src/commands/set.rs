//! `envreg set`: store a value and write the config file.

use anyhow::{Context, Result};
use envreg_config::Registry;
use serde_json::json;

use crate::args::OutputFormat;

pub fn run(registry: &Registry, key: &str, value: String, output: OutputFormat) -> Result<()> {
    let normalized = registry.normalize_key(key);
    registry
        .write(key, value.as_str())
        .with_context(|| format!("Failed to write {normalized}"))?;

    tracing::info!(
        key = %normalized,
        file = %registry.config_file().display(),
        "Config value written"
    );

    if output == OutputFormat::Json {
        let body = json!({ "key": normalized, "value": value });
        println!("{}", serde_json::to_string_pretty(&body)?);
    }

    Ok(())
}
