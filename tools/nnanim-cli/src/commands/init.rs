//! Write a default config file.

use std::path::PathBuf;

use nnanim_common::config::AppConfig;

pub fn run(config: &AppConfig, path: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(AppConfig::default_path);

    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    config
        .save_to(&path)
        .map_err(|e| anyhow::anyhow!("Failed to write config: {e}"))?;

    println!("Wrote config: {}", path.display());
    println!("  Renderer: {} ({})", config.renderer.program, config.renderer.quality);
    println!("  Pattern: {}", config.renderer.pattern);
    Ok(())
}
