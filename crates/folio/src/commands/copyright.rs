use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::copyright::{current_year, update_markup};

/// Outcome for a single file.
#[derive(Debug, PartialEq, Eq)]
pub enum FileStatus {
    Current,
    Stale(usize),
}

pub fn process_file(path: &Path, year: i32, write: bool) -> Result<FileStatus> {
    let html = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let update = update_markup(&html, year);
    if update.changed == 0 {
        return Ok(FileStatus::Current);
    }
    if write {
        std::fs::write(path, &update.html)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("Rewrote {} year(s) in {}", update.changed, path.display());
    }
    Ok(FileStatus::Stale(update.changed))
}

/// Bring copyright years current, or with `check` only report stale files.
pub fn run(files: &[PathBuf], year: Option<i32>, check: bool, quiet: bool) -> Result<()> {
    let year = year.unwrap_or_else(current_year);
    let mut stale = 0;

    for file in files {
        match process_file(file, year, !check)? {
            FileStatus::Current => {
                if !quiet {
                    println!("  {} {}", "ok".green(), file.display());
                }
            }
            FileStatus::Stale(n) => {
                stale += 1;
                let label = if check { "stale".yellow() } else { "updated".green() };
                println!("  {label} {} ({n} year(s) -> {year})", file.display());
            }
        }
    }

    if check && stale > 0 {
        anyhow::bail!("{stale} file(s) have an outdated copyright year");
    }
    if !quiet {
        println!(
            "{}",
            format!("{} file(s) checked, {stale} stale", files.len()).bold()
        );
    }
    Ok(())
}
