//! Check renderer availability and the scene directory.

use std::path::Path;

use nnanim_batch::{discover, ProcessRenderer, Renderer};
use nnanim_common::config::AppConfig;

use crate::SceneArgs;

pub fn run(config: &AppConfig, config_path: &Path, args: SceneArgs) -> anyhow::Result<()> {
    println!("nnanim System Check");
    println!("{}", "=".repeat(50));

    if config_path.exists() {
        println!("[OK] Config: {}", config_path.display());
    } else {
        println!("[OK] Config: defaults ({} not present)", config_path.display());
    }

    let renderer = ProcessRenderer::from_config(&config.renderer);
    let renderer_ok = renderer.is_available();
    if renderer_ok {
        println!("[OK] Renderer: {}", renderer.name());
    } else {
        println!("[MISSING] Renderer: {} not found on PATH", renderer.name());
        println!("     Install it (e.g. `pip install manim`) or set renderer.program in the config.");
    }

    let dir = super::resolve_scene_dir(&args, config);
    let options = super::batch_options(&args, config)?;
    let scenes_ok = match discover(&dir, &options.pattern) {
        Ok(scenes) if scenes.is_empty() => {
            println!(
                "[WARN] Scene directory: {} has no *.{} files",
                dir.display(),
                options.pattern.extension()
            );
            false
        }
        Ok(scenes) => {
            println!(
                "[OK] Scene directory: {} ({} scenes)",
                dir.display(),
                scenes.len()
            );
            true
        }
        Err(e) => {
            println!("[MISSING] Scene directory: {e}");
            false
        }
    };

    println!();
    if renderer_ok && scenes_ok {
        println!("Everything needed to render is available.");
    } else {
        println!("Some requirements are missing. See above for fixes.");
    }

    Ok(())
}
