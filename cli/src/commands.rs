use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use serde_json::Value;

use knack_config::{ClipboardConfig, ClipboardMode, KnackConfig, StorageBackend, StorageConfig};
use knack_types::{
    capitalize, format_bytes_with_precision, format_date, generate_id, get_initials,
    is_valid_email, parse_json_value, random_between, slugify, truncate,
};
use knack_utils::{
    Clipboard, FileStore, KeyValueStore, MemoryStore, Storage, UnavailableStore,
};

use crate::{Command, StoreAction, demo};

pub(crate) async fn run(command: Command, config: &KnackConfig) -> Result<ExitCode> {
    match command {
        Command::Bytes { bytes, decimals } => {
            println!("{}", format_bytes_with_precision(bytes, decimals));
        }
        Command::Slug { text } => println!("{}", slugify(&text)),
        Command::Truncate { text, max } => println!("{}", truncate(&text, max)),
        Command::Initials { name } => println!("{}", get_initials(&name)),
        Command::Capitalize { text } => println!("{}", capitalize(&text)),
        Command::Email { text } => {
            if is_valid_email(&text) {
                println!("valid");
            } else {
                println!("invalid");
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Id { count } => {
            for _ in 0..count {
                println!("{}", generate_id());
            }
        }
        Command::Random { min, max } => println!("{}", random_between(min, max)),
        Command::Date { date } => {
            let date = match date {
                Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .with_context(|| format!("invalid date '{raw}', expected YYYY-MM-DD"))?,
                None => Local::now().date_naive(),
            };
            println!("{}", format_date(&date));
        }
        Command::Json { text, fallback } => {
            let fallback = parse_fallback(&fallback)?;
            println!("{}", render(&parse_json_value(&text, fallback)));
        }
        Command::Store { action } => return run_store(action, &config.storage),
        Command::Copy { text } => {
            let clipboard = clipboard_for(&config.clipboard);
            clipboard
                .copy_to_clipboard(&text)
                .context("failed to copy to clipboard")?;
            if clipboard.has_native() {
                println!("copied {} characters", text.chars().count());
            }
        }
        Command::Demo {
            debounce_ms,
            throttle_ms,
        } => {
            let debounce = debounce_ms.map_or(config.timing.debounce(), Duration::from_millis);
            let throttle = throttle_ms.map_or(config.timing.throttle(), Duration::from_millis);
            for line in demo::run(debounce, throttle).await {
                println!("{line}");
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_store(action: StoreAction, config: &StorageConfig) -> Result<ExitCode> {
    let storage = Storage::new(open_store(config)?);
    match action {
        StoreAction::Get { key, fallback } => {
            let fallback = parse_fallback(&fallback)?;
            println!("{}", render(&storage.get_item(&key, fallback)));
        }
        StoreAction::Set { key, value } => {
            let value = serde_json::from_str(&value).unwrap_or(Value::String(value));
            if !storage.set_item(&key, &value) {
                eprintln!("value for '{key}' was not stored");
                return Ok(ExitCode::FAILURE);
            }
        }
        StoreAction::Rm { key } => {
            if !storage.remove_item(&key) {
                eprintln!("'{key}' was not removed");
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn open_store(config: &StorageConfig) -> Result<Box<dyn KeyValueStore>> {
    let store: Box<dyn KeyValueStore> = match config.backend {
        StorageBackend::File => {
            let Some(path) = config.resolved_path() else {
                bail!("no store path configured and no home directory found");
            };
            Box::new(FileStore::open(path))
        }
        StorageBackend::Memory => match config.quota_bytes {
            Some(quota) => Box::new(MemoryStore::with_quota(quota)),
            None => Box::new(MemoryStore::new()),
        },
        StorageBackend::None => Box::new(UnavailableStore),
    };
    Ok(store)
}

fn clipboard_for(config: &ClipboardConfig) -> Clipboard {
    match config.mode {
        ClipboardMode::Auto => Clipboard::detect(config.hold()),
        ClipboardMode::Osc52 => Clipboard::osc52_only(),
        ClipboardMode::None => Clipboard::unavailable(),
    }
}

fn parse_fallback(raw: &str) -> Result<Value> {
    serde_json::from_str(raw).with_context(|| format!("--fallback must be JSON, got '{raw}'"))
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
