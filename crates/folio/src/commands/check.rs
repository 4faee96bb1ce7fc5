use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::site::Site;

/// Validate a site file and print what the preview would mount.
pub fn run(file: &Path) -> Result<()> {
    let site = Site::load(file)?;
    let timing = site.timing.unwrap_or_default();

    println!("{} {}", "Site:".bold(), file.display());
    if let Some(title) = &site.title {
        println!("  Title:      {title}");
    }
    println!("  Hero lines: {}", site.hero.len());
    println!(
        "  Slides:     {} (interval {} ms, transition {} ms)",
        site.slides.len(),
        timing.interval.as_millis(),
        timing.transition.as_millis()
    );
    let items: usize = site.keypoints.iter().map(|k| k.items.len()).sum();
    println!(
        "  Key points: {} list(s), {items} item(s)",
        site.keypoints.len()
    );
    println!("  Recipient:  {}", site.contact.recipient);

    let warnings = site.warnings();
    if warnings.is_empty() {
        println!("{}", "No problems found.".green().bold());
        return Ok(());
    }

    println!();
    for warning in &warnings {
        println!("  {} {warning}", "warning:".yellow().bold());
    }
    anyhow::bail!("{} problem(s) found in {}", warnings.len(), file.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_site(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.yaml");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_clean_site_passes() {
        let (_dir, path) = write_site(
            "title: Year Zero\nslides:\n  - heading: Portfolio\n  - heading: Team\nkeypoints:\n  - items: [Early]\n",
        );
        assert!(run(&path).is_ok());
    }

    #[test]
    fn test_warnings_fail_the_check() {
        let (_dir, path) = write_site("slides:\n  - heading: Portfolio\n    image: missing.png\n");
        let err = run(&path).unwrap_err();
        assert!(err.to_string().contains("1 problem(s) found"));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let (_dir, path) = write_site("slides: [unclosed\n");
        let err = run(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid site file"));
    }
}
