use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::contact::{DEFAULT_RECIPIENT, Field};
use crate::slideshow::Timing;

/// A page described in YAML: what the preview renders and the behaviors act on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Site {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Lines of animated hero text, in page order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hero: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slides: Vec<SlideContent>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keypoints: Vec<Keypoints>,

    #[serde(default)]
    pub contact: ContactSettings,

    /// Footer markup. Years next to a copyright sign are kept current.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<Timing>,

    /// Set by [`Site::load`]; image paths resolve against it.
    #[serde(skip)]
    pub base_path: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlideContent {
    #[serde(default)]
    pub heading: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Keypoints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSettings {
    #[serde(default = "default_recipient")]
    pub recipient: String,

    /// Per-field hint text, used in place of the built-in blur messages.
    #[serde(default)]
    pub titles: FieldTitles,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            recipient: default_recipient(),
            titles: FieldTitles::default(),
        }
    }
}

fn default_recipient() -> String {
    DEFAULT_RECIPIENT.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldTitles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FieldTitles {
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Subject => self.subject.as_deref(),
            Field::Message => self.message.as_deref(),
        }
    }
}

impl Site {
    pub fn parse(content: &str, base_path: &Path) -> Result<Self> {
        let mut site: Site = serde_yaml::from_str(content)?;
        site.base_path = base_path.to_path_buf();
        Ok(site)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let base_path = path.parent().unwrap_or(Path::new("."));
        Self::parse(&content, base_path)
            .with_context(|| format!("Invalid site file {}", path.display()))
    }

    pub fn image_path(&self, slide: &SlideContent) -> Option<PathBuf> {
        slide.image.as_ref().map(|p| self.base_path.join(p))
    }

    /// Problems worth reporting before a page goes live.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.slides.is_empty() {
            warnings.push("No slides: the slideshow will stay inert".to_string());
        }
        for (i, slide) in self.slides.iter().enumerate() {
            if slide.heading.trim().is_empty() && slide.image.is_none() {
                warnings.push(format!("Slide {} has neither heading nor image", i + 1));
            }
            if let Some(path) = self.image_path(slide) {
                if !path.exists() {
                    warnings.push(format!(
                        "Slide {} image not found: {}",
                        i + 1,
                        path.display()
                    ));
                }
            }
        }
        for (i, list) in self.keypoints.iter().enumerate() {
            if list.items.is_empty() {
                warnings.push(format!("Keypoint list {} has no items", i + 1));
            }
        }
        if !crate::contact::is_valid_email(&self.contact.recipient) {
            warnings.push(format!(
                "Contact recipient is not a valid email address: {}",
                self.contact.recipient
            ));
        }
        if let Some(timing) = &self.timing {
            if timing.interval <= timing.settle + timing.transition {
                warnings.push(
                    "Autoplay interval is shorter than a full transition; some ticks will be skipped"
                        .to_string(),
                );
            }
        }
        warnings
    }
}
