pub mod check;
pub mod init;
pub mod list;
pub mod render;

use std::path::{Path, PathBuf};

use nnanim_batch::{BatchOptions, ScenePattern};
use nnanim_common::config::AppConfig;

use crate::SceneArgs;

/// Name of the scene directory looked up next to the executable.
pub const DEFAULT_SCENE_DIR: &str = "animations";

/// Scene directory: `--dir`, then the config, then `animations/` next to
/// the executable, then `./animations`.
pub fn resolve_scene_dir(args: &SceneArgs, config: &AppConfig) -> PathBuf {
    if let Some(dir) = args.dir.as_ref().or(config.animations_dir.as_ref()) {
        return dir.clone();
    }

    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join(DEFAULT_SCENE_DIR)));
    select_default_dir(beside_exe.as_deref())
}

fn select_default_dir(beside_exe: Option<&Path>) -> PathBuf {
    match beside_exe {
        Some(dir) if dir.is_dir() => dir.to_path_buf(),
        _ => PathBuf::from(DEFAULT_SCENE_DIR),
    }
}

/// Batch options from config, with command-line overrides applied.
pub fn batch_options(args: &SceneArgs, config: &AppConfig) -> anyhow::Result<BatchOptions> {
    let mut options = BatchOptions::from_config(config)?;
    if let Some(pattern) = &args.pattern {
        options.pattern = ScenePattern::parse(pattern)?;
    }
    options.only = args.only.clone();
    Ok(options)
}
