//! Sequential batch rendering.
//!
//! The driver discovers scenes once, then renders them strictly one at a
//! time in discovery order. A failing scene is recorded and the batch
//! moves on; only a discovery error ends the run early.

use std::path::{Path, PathBuf};

use nnanim_common::config::{AppConfig, Quality};
use nnanim_common::error::NnanimResult;

use crate::discovery::{discover, filter_by_name, SceneFile, ScenePattern};
use crate::renderer::Renderer;
use crate::report::{BatchReport, BatchSummary, RenderResult};

/// Progress notification emitted while a batch runs.
#[derive(Debug, Clone, Copy)]
pub enum BatchEvent<'a> {
    /// Discovery finished and found `count` scenes to render.
    Discovered { dir: &'a Path, count: usize },

    /// Discovery finished and found nothing to render.
    NoScenes { dir: &'a Path },

    /// About to render scene `index` (1-based) of `total`.
    Started {
        index: usize,
        total: usize,
        scene: &'a SceneFile,
    },

    /// Scene `index` of `total` finished, successfully or not.
    Finished {
        index: usize,
        total: usize,
        result: &'a RenderResult,
    },

    /// Every scene has been attempted.
    Completed { summary: &'a BatchSummary },
}

/// Progress callback for batch rendering.
pub type ProgressCallback = Box<dyn Fn(&BatchEvent<'_>) + Send>;

/// What to render and how.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Which files in the directory count as scenes.
    pub pattern: ScenePattern,

    /// Quality passed to every renderer invocation.
    pub quality: Quality,

    /// Scene names (stem or file name) to restrict the batch to.
    /// Empty renders everything.
    pub only: Vec<String>,
}

impl BatchOptions {
    pub fn from_config(config: &AppConfig) -> NnanimResult<Self> {
        Ok(Self {
            pattern: ScenePattern::parse(&config.renderer.pattern)?,
            quality: config.renderer.quality,
            only: Vec::new(),
        })
    }
}

/// Drives one renderer over every scene in a directory.
pub struct BatchDriver<R: Renderer> {
    renderer: R,
    options: BatchOptions,
    progress: Option<ProgressCallback>,
}

impl<R: Renderer> BatchDriver<R> {
    pub fn new(renderer: R, options: BatchOptions) -> Self {
        Self {
            renderer,
            options,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Scenes a batch over `dir` would render, in order.
    pub fn plan(&self, dir: &Path) -> NnanimResult<Vec<SceneFile>> {
        let scenes = discover(dir, &self.options.pattern)?;
        Ok(filter_by_name(scenes, &self.options.only))
    }

    /// Discover scenes in `dir` and render each of them.
    ///
    /// Returns an error only when the directory cannot be listed. Per-scene
    /// failures end up in the report.
    pub fn run_batch(&mut self, dir: &Path) -> NnanimResult<BatchReport> {
        let started_at = chrono::Utc::now().to_rfc3339();
        tracing::info!(
            dir = %dir.display(),
            renderer = self.renderer.name(),
            quality = %self.options.quality,
            "Starting batch"
        );

        let scenes = match self.plan(dir) {
            Ok(scenes) => scenes,
            Err(e) => {
                tracing::error!(dir = %dir.display(), error = %e, "Scene discovery failed");
                return Err(e);
            }
        };

        if scenes.is_empty() {
            tracing::warn!(dir = %dir.display(), "No scene files found");
            self.emit(BatchEvent::NoScenes { dir });
        } else {
            self.emit(BatchEvent::Discovered {
                dir,
                count: scenes.len(),
            });
        }

        let results = self.render_all(&scenes);
        let summary = BatchSummary::from_results(&results);
        self.emit(BatchEvent::Completed { summary: &summary });

        tracing::info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Batch finished"
        );

        Ok(BatchReport {
            dir: PathBuf::from(dir),
            started_at,
            finished_at: chrono::Utc::now().to_rfc3339(),
            summary,
            results,
        })
    }

    /// Render already-discovered scenes in order, one result per scene.
    pub fn render_all(&mut self, scenes: &[SceneFile]) -> Vec<RenderResult> {
        let total = scenes.len();
        let mut results = Vec::with_capacity(total);

        for (i, scene) in scenes.iter().enumerate() {
            let index = i + 1;
            self.emit(BatchEvent::Started {
                index,
                total,
                scene,
            });

            let result = self.renderer.render(scene, self.options.quality);
            if !result.success() {
                tracing::warn!(
                    scene = %scene.name,
                    exit_code = ?result.exit_code(),
                    "Scene failed to render, continuing with the rest of the batch"
                );
            }

            self.emit(BatchEvent::Finished {
                index,
                total,
                result: &result,
            });
            results.push(result);
        }

        results
    }

    fn emit(&self, event: BatchEvent<'_>) {
        if let Some(cb) = &self.progress {
            cb(&event);
        }
    }
}
