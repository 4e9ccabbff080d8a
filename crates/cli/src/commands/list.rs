//! `envreg list`: print every entry in the config file.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use envreg_config::Registry;

use crate::args::OutputFormat;

pub fn run(registry: &Registry, output: OutputFormat) -> Result<()> {
    let entries = registry
        .entries()
        .context("Failed to read config file")?;

    match output {
        OutputFormat::Plain => {
            for (key, value) in &entries {
                println!("{key}{}{value}", registry.separator());
            }
        }
        OutputFormat::Json => {
            let map: BTreeMap<_, _> = entries.into_iter().collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
    }

    Ok(())
}
