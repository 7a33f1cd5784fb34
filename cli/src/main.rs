//! Knack CLI - runs each helper from the command line.
//!
//! ```text
//! main() -> init_tracing() -> load config -> Cli::parse() -> commands::run()
//! ```
//!
//! Command output goes to stdout; logs go to stderr, filtered by `RUST_LOG`
//! (default `warn`).

mod commands;
mod demo;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use knack_config::KnackConfig;

#[derive(Parser)]
#[command(name = "knack")]
#[command(about = "Formatting, storage, clipboard and timing helpers")]
struct Cli {
    /// Config file to use instead of ~/.knack/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Format a byte count with base-1024 units
    Bytes {
        bytes: u64,
        #[arg(long, default_value_t = knack_types::DEFAULT_BYTE_DECIMALS)]
        decimals: usize,
    },
    /// Turn text into a URL slug
    Slug { text: String },
    /// Keep the first MAX characters and append "..."
    Truncate { text: String, max: usize },
    /// Up to two initials from a name
    Initials { name: String },
    /// Upper-case the first character
    Capitalize { text: String },
    /// Check that text looks like an email address (exit 1 if not)
    Email { text: String },
    /// Print short pseudo-random ids
    Id {
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Print a random integer in [MIN, MAX]
    Random {
        #[arg(allow_hyphen_values = true)]
        min: i64,
        #[arg(allow_hyphen_values = true)]
        max: i64,
    },
    /// Print a date (YYYY-MM-DD, default today) in long US form
    Date { date: Option<String> },
    /// Decode JSON, printing the fallback if it does not parse
    Json {
        text: String,
        #[arg(long, default_value = "null")]
        fallback: String,
    },
    /// Read and write the configured key-value store
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
    /// Copy text to the clipboard
    Copy { text: String },
    /// Feed a scripted burst of events through a debouncer and a throttle
    Demo {
        #[arg(long)]
        debounce_ms: Option<u64>,
        #[arg(long)]
        throttle_ms: Option<u64>,
    },
}

#[derive(Subcommand)]
enum StoreAction {
    /// Print the value under KEY, or the fallback
    Get {
        key: String,
        #[arg(long, default_value = "null")]
        fallback: String,
    },
    /// Store VALUE (JSON, or a plain string if it is not JSON) under KEY
    Set { key: String, value: String },
    /// Remove KEY
    Rm { key: String },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn load_config(explicit: Option<&PathBuf>) -> Result<KnackConfig> {
    let loaded = match explicit {
        Some(path) => KnackConfig::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => match KnackConfig::load() {
            Ok(config) => config,
            Err(e) => {
                // A broken default config should not block one-off commands.
                tracing::warn!("Ignoring config: {e}");
                None
            }
        },
    };
    Ok(loaded.unwrap_or_default())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    tracing::debug!(
        backend = config.storage.backend.as_str(),
        "Configuration loaded"
    );

    commands::run(cli.command, &config).await
}
