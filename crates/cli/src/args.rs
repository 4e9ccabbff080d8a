//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Build a `Registry` from the global options.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).

use clap::{Parser, Subcommand, ValueEnum};
use envreg_config::constants::{DEFAULT_CONFIG_FILE, DEFAULT_SEPARATOR};
use envreg_config::{ParseMode, Registry};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "envreg")]
#[command(about = "envreg - Resolve and update values in a KEY=value config file", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  envreg get DATABASE_URL\n  envreg --prefix app set port 8080\n  envreg -f config/prod.env list --output json\n  envreg lookup API_TOKEN || echo missing\n"
)]
pub struct Cli {
    /// Path to the config file
    #[arg(
        short,
        long,
        global = true,
        env = "ENVREG_FILE",
        default_value = DEFAULT_CONFIG_FILE,
        value_name = "FILE"
    )]
    pub file: PathBuf,

    /// Separator between key and value on each line
    #[arg(long, global = true, default_value = DEFAULT_SEPARATOR)]
    pub separator: String,

    /// Prefix prepended to every key (e.g. `app` reads APP_PORT for `port`)
    #[arg(long, global = true, env = "ENVREG_PREFIX")]
    pub prefix: Option<String>,

    /// Treat set-but-empty environment variables as values
    #[arg(long, global = true)]
    pub allow_empty_env: bool,

    /// Fail on malformed lines instead of skipping them
    #[arg(long, global = true)]
    pub strict: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Plain)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a key from the environment, then the config file
    Get {
        /// Key to resolve (case-insensitive)
        key: String,
    },

    /// Look a key up in the config file only, failing if it is absent
    Lookup {
        /// Key to look up (case-insensitive)
        key: String,
    },

    /// Set a key and write the config file
    Set {
        /// Key to set (case-insensitive)
        key: String,

        /// Value to store
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// List every key/value pair in the config file
    List,
}

impl Cli {
    /// Build the registry described by the global options.
    pub fn registry(&self) -> Registry {
        let mut builder = Registry::builder()
            .with_config_file(self.file.clone())
            .with_separator(self.separator.clone())
            .with_allow_empty_env(self.allow_empty_env)
            .with_parse_mode(if self.strict {
                ParseMode::Strict
            } else {
                ParseMode::Lenient
            });
        if let Some(prefix) = &self.prefix {
            builder = builder.with_prefix(prefix.clone());
        }
        builder.build()
    }
}
