//! List the scenes a render would process.

use nnanim_batch::{BatchDriver, ProcessRenderer};
use nnanim_common::config::AppConfig;

use crate::SceneArgs;

pub fn run(config: &AppConfig, args: SceneArgs) -> anyhow::Result<()> {
    let dir = super::resolve_scene_dir(&args, config);
    let options = super::batch_options(&args, config)?;
    let driver = BatchDriver::new(ProcessRenderer::from_config(&config.renderer), options);

    let scenes = driver
        .plan(&dir)
        .map_err(|e| anyhow::anyhow!("Failed to list scenes: {e}"))?;

    println!("Scenes in: {}", dir.display());
    if scenes.is_empty() {
        println!("  No animation files found.");
        return Ok(());
    }

    for scene in &scenes {
        println!("  {}", scene.name);
    }
    println!("\n{} scene(s) would be rendered.", scenes.len());

    Ok(())
}
