use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::reveal::Strategy;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "folio";
const MIN_INTERVAL_MS: u64 = 1000;

const KEYS: [&str; 4] = [
    "defaults.theme",
    "defaults.recipient",
    "defaults.interval_ms",
    "defaults.reveal",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Contact recipient used when a site file does not name one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_ms: Option<u64>,

    /// Reveal strategy: `intersection` or `scroll`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal: Option<String>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                anyhow::bail!("No config found. Run `folio config show` to see defaults.")
            }
            Err(e) => anyhow::bail!("Failed to read config {}: {e}", path.display()),
        };
        serde_yaml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Config to modify and save back: defaults only when no file exists yet.
    /// A file that fails to parse is an error, so its keys are never lost.
    pub fn load_for_update(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# folio configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn theme(&self) -> &str {
        self.defaults
            .as_ref()
            .and_then(|d| d.theme.as_deref())
            .unwrap_or("light")
    }

    pub fn recipient(&self) -> Option<&str> {
        self.defaults.as_ref().and_then(|d| d.recipient.as_deref())
    }

    pub fn interval(&self) -> Option<Duration> {
        self.defaults
            .as_ref()
            .and_then(|d| d.interval_ms)
            .map(Duration::from_millis)
    }

    pub fn reveal_strategy(&self) -> Strategy {
        self.defaults
            .as_ref()
            .and_then(|d| d.reveal.as_deref())
            .map(Strategy::from_name)
            .unwrap_or_default()
    }

    fn defaults_mut(&mut self) -> &mut DefaultsConfig {
        self.defaults.get_or_insert_with(DefaultsConfig::default)
    }

    /// Validate and store one `defaults.*` key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let owned = Some(value.to_string());
        match key {
            "defaults.theme" => {
                if !matches!(value, "light" | "dark") {
                    anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'.");
                }
                self.defaults_mut().theme = owned;
            }
            "defaults.recipient" => {
                if !crate::contact::is_valid_email(value) {
                    anyhow::bail!("Invalid recipient: {value}. Must be an email address.");
                }
                self.defaults_mut().recipient = owned;
            }
            "defaults.interval_ms" => {
                let ms: u64 = value
                    .parse()
                    .ok()
                    .filter(|ms| *ms >= MIN_INTERVAL_MS)
                    .ok_or_else(|| {
                        anyhow::anyhow!(
                            "Invalid interval_ms: {value}. Must be a number of milliseconds, at least {MIN_INTERVAL_MS}."
                        )
                    })?;
                self.defaults_mut().interval_ms = Some(ms);
            }
            "defaults.reveal" => {
                if !matches!(value, "intersection" | "scroll") {
                    anyhow::bail!("Invalid reveal: {value}. Must be 'intersection' or 'scroll'.");
                }
                self.defaults_mut().reveal = owned;
            }
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {}", KEYS.join(", ")),
        }
        Ok(())
    }
}
