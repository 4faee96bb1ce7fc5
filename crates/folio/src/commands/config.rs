use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "(not created yet, showing defaults)".dimmed());
    }
    println!();
    println!("  defaults.theme       = {}", config.theme());
    println!(
        "  defaults.recipient   = {}",
        config
            .recipient()
            .unwrap_or(crate::contact::DEFAULT_RECIPIENT)
    );
    println!(
        "  defaults.interval_ms = {}",
        config
            .interval()
            .map(|d| d.as_millis().to_string())
            .unwrap_or_else(|| crate::slideshow::Timing::default().interval.as_millis().to_string())
    );
    println!(
        "  defaults.reveal      = {}",
        config
            .defaults
            .as_ref()
            .and_then(|d| d.reveal.as_deref())
            .unwrap_or("intersection")
    );
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let path = Config::path()?;
    set_in(&path, key, value)?;
    println!(
        "{} {key} = {value} ({})",
        "Saved".green().bold(),
        path.display()
    );
    Ok(())
}

/// Update one key in the config file at `path`, keeping every other key.
pub fn set_in(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_for_update(path)?;
    config.set(key, value)?;
    config.save_to(path)
}
