//! Per-scene render results and the batch report.

use std::path::{Path, PathBuf};
use std::time::Duration;

use nnanim_common::error::NnanimResult;
use serde::Serialize;

use crate::discovery::SceneFile;

/// How a single renderer invocation ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderOutcome {
    /// Renderer exited with status 0.
    Rendered,

    /// Renderer ran but exited non-zero, or was killed by a signal
    /// (`exit_code` is `None` then).
    Failed {
        exit_code: Option<i32>,
        stderr: String,
    },

    /// Renderer process could not be started.
    SpawnFailed { message: String },
}

/// Outcome of rendering one scene file.
#[derive(Debug, Clone, Serialize)]
pub struct RenderResult {
    pub scene: SceneFile,

    #[serde(flatten)]
    pub outcome: RenderOutcome,

    /// Captured renderer stdout. Kept for diagnostics, never interpreted.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stdout: String,

    pub duration_ms: u64,
}

impl RenderResult {
    pub fn rendered(scene: SceneFile, stdout: String, duration: Duration) -> Self {
        Self {
            scene,
            outcome: RenderOutcome::Rendered,
            stdout,
            duration_ms: duration.as_millis() as u64,
        }
    }

    pub fn failed(
        scene: SceneFile,
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            scene,
            outcome: RenderOutcome::Failed { exit_code, stderr },
            stdout,
            duration_ms: duration.as_millis() as u64,
        }
    }

    pub fn spawn_failed(scene: SceneFile, message: impl Into<String>) -> Self {
        Self {
            scene,
            outcome: RenderOutcome::SpawnFailed {
                message: message.into(),
            },
            stdout: String::new(),
            duration_ms: 0,
        }
    }

    pub fn success(&self) -> bool {
        matches!(self.outcome, RenderOutcome::Rendered)
    }

    /// Captured stderr for a failed render, the spawn error for a scene
    /// that never started, empty on success.
    pub fn diagnostic(&self) -> &str {
        match &self.outcome {
            RenderOutcome::Rendered => "",
            RenderOutcome::Failed { stderr, .. } => stderr,
            RenderOutcome::SpawnFailed { message } => message,
        }
    }

    pub fn exit_code(&self) -> Option<i32> {
        match &self.outcome {
            RenderOutcome::Rendered => Some(0),
            RenderOutcome::Failed { exit_code, .. } => *exit_code,
            RenderOutcome::SpawnFailed { .. } => None,
        }
    }
}

/// Success/failure counts for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[RenderResult]) -> Self {
        let succeeded = results.iter().filter(|r| r.success()).count();
        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Everything one batch run produced, in discovery order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Directory the scenes were discovered in.
    pub dir: PathBuf,

    /// RFC 3339 timestamp taken before discovery.
    pub started_at: String,

    /// RFC 3339 timestamp taken after the last render.
    pub finished_at: String,

    pub summary: BatchSummary,

    pub results: Vec<RenderResult>,
}

impl BatchReport {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn failures(&self) -> impl Iterator<Item = &RenderResult> {
        self.results.iter().filter(|r| !r.success())
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> NnanimResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
