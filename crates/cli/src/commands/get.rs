//! `envreg get`: resolve a key with full precedence.

use anyhow::Result;
use envreg_config::{Registry, Resolution};
use serde_json::json;

use crate::args::OutputFormat;

pub fn run(registry: &Registry, key: &str, output: OutputFormat) -> Result<()> {
    let resolution = registry.resolve(key);
    let source = match &resolution {
        Resolution::Env(_) => Some("env"),
        Resolution::File(_) => Some("file"),
        Resolution::EmptyEnv | Resolution::Absent => None,
    };
    let present = resolution.is_present();
    let value = resolution.into_value();

    match output {
        OutputFormat::Plain => {
            if present {
                println!("{value}");
            }
        }
        OutputFormat::Json => {
            let body = json!({
                "key": registry.normalize_key(key),
                "value": present.then_some(value),
                "source": source,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(())
}
