//! Init command - write an example config into a corpus directory

use crate::config::{example_config, CONFIG_FILE_NAMES};
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

/// Run the init command
pub fn run(path: &Path) -> Result<()> {
    let dir = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", dir.display());
    }

    if let Some(existing) = CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
    {
        println!(
            "{} Config already exists at {}",
            style("✓").green(),
            style(existing.display()).cyan()
        );
        return Ok(());
    }

    let config_path = dir.join(CONFIG_FILE_NAMES[0]);
    std::fs::write(&config_path, example_config())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );

    println!("\nNext steps:");
    println!("  {} Edit labels and cues", style(config_path.display()).cyan());
    println!(
        "  {} Extract features",
        style(format!("phishlex extract {} -f csv", path.display())).cyan()
    );

    Ok(())
}
