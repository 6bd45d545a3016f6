//! Scene file discovery.
//!
//! Discovery is a pure read of one directory level: no recursion, no
//! parsing of file contents. Results are sorted by file name so that a
//! batch renders in the same order on every filesystem.

use std::path::{Path, PathBuf};

use nnanim_common::error::{NnanimError, NnanimResult};
use serde::Serialize;

/// A scene file the driver will hand to the renderer. Opaque to nnanim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneFile {
    /// Full path, as passed to the renderer.
    pub path: PathBuf,

    /// File name, used in reports.
    pub name: String,
}

impl SceneFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }

    /// File name without its extension.
    pub fn stem(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&self.name)
    }

    /// Matches either the stem or the full file name.
    pub fn is_named(&self, name: &str) -> bool {
        name == self.stem() || name == self.name
    }
}

/// Extension-based file pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenePattern {
    extension: String,
}

impl ScenePattern {
    /// Accepts `py`, `.py` or `*.py`.
    pub fn parse(pattern: &str) -> NnanimResult<Self> {
        let trimmed = pattern.trim();
        let extension = trimmed
            .strip_prefix("*.")
            .or_else(|| trimmed.strip_prefix('.'))
            .unwrap_or(trimmed);

        if extension.is_empty() || extension.contains(&['*', '?', '/', '.'][..]) {
            return Err(NnanimError::config(format!(
                "Unsupported scene pattern '{pattern}'. Use an extension such as 'py' or '*.py'"
            )));
        }

        Ok(Self {
            extension: extension.to_string(),
        })
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.extension)
    }
}

impl Default for ScenePattern {
    fn default() -> Self {
        Self {
            extension: "py".to_string(),
        }
    }
}

/// List the scene files directly inside `dir` that match `pattern`.
pub fn discover(dir: &Path, pattern: &ScenePattern) -> NnanimResult<Vec<SceneFile>> {
    let entries = std::fs::read_dir(dir).map_err(|e| NnanimError::discovery(dir, e))?;

    let mut scenes = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| NnanimError::discovery(dir, e))?;
        let path = entry.path();

        // Follows symlinks, so a link to a scene file still counts.
        if !path.is_file() || !pattern.matches(&path) {
            continue;
        }
        scenes.push(SceneFile::new(path));
    }

    scenes.sort_by(|a, b| a.name.cmp(&b.name));

    tracing::debug!(
        dir = %dir.display(),
        pattern = pattern.extension(),
        count = scenes.len(),
        "Scene discovery finished"
    );

    Ok(scenes)
}

/// Keep only scenes whose stem or file name is listed in `names`.
/// An empty list keeps everything. Names that match nothing are logged.
pub fn filter_by_name(scenes: Vec<SceneFile>, names: &[String]) -> Vec<SceneFile> {
    if names.is_empty() {
        return scenes;
    }
    for name in unmatched_names(&scenes, names) {
        tracing::warn!(name, "No scene matches --only name");
    }
    scenes
        .into_iter()
        .filter(|scene| names.iter().any(|name| scene.is_named(name)))
        .collect()
}

/// Names from `names` that select none of `scenes`.
pub fn unmatched_names<'a>(scenes: &[SceneFile], names: &'a [String]) -> Vec<&'a str> {
    names
        .iter()
        .filter(|name| !scenes.iter().any(|scene| scene.is_named(name)))
        .map(String::as_str)
        .collect()
}
