//! Application configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{NnanimError, NnanimResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the scene files. `None` means the `animations`
    /// directory next to the executable.
    pub animations_dir: Option<PathBuf>,

    /// External renderer settings.
    pub renderer: RendererConfig,

    /// How per-file failures map to the process exit code.
    pub exit_policy: ExitPolicy,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// External renderer invocation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Renderer executable, resolved through `PATH`.
    pub program: String,

    /// Render quality passed to every invocation.
    pub quality: Quality,

    /// Arguments placed before the scene path.
    pub extra_args: Vec<String>,

    /// Scene file extension pattern (`py`, `.py` or `*.py`).
    pub pattern: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "nnanim_batch=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

/// Renderer quality preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// 854x480 @ 15fps.
    Low,
    /// 1280x720 @ 30fps.
    Medium,
    /// 1920x1080 @ 60fps.
    #[default]
    High,
    /// 2560x1440 @ 60fps.
    Production,
    /// 3840x2160 @ 60fps.
    FourK,
}

impl Quality {
    pub const ALL: [Quality; 5] = [
        Quality::Low,
        Quality::Medium,
        Quality::High,
        Quality::Production,
        Quality::FourK,
    ];

    /// Command-line flag understood by the renderer.
    pub fn flag(self) -> &'static str {
        match self {
            Quality::Low => "-ql",
            Quality::Medium => "-qm",
            Quality::High => "-qh",
            Quality::Production => "-qp",
            Quality::FourK => "-qk",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Quality::Low => "low",
            Quality::Medium => "medium",
            Quality::High => "high",
            Quality::Production => "production",
            Quality::FourK => "fourk",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "low" | "480p" => Ok(Quality::Low),
            "m" | "medium" | "720p" => Ok(Quality::Medium),
            "h" | "high" | "1080p" => Ok(Quality::High),
            "p" | "production" | "1440p" => Ok(Quality::Production),
            "k" | "fourk" | "4k" | "2160p" => Ok(Quality::FourK),
            other => Err(format!(
                "Unknown quality: {other}. Use: low, medium, high, production, fourk"
            )),
        }
    }
}

/// Mapping from batch outcome to process exit code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitPolicy {
    /// Exit non-zero when any scene failed to render.
    #[default]
    ReflectFailures,
    /// Always exit zero; failures only show up in the report.
    AlwaysZero,
}

impl ExitPolicy {
    pub fn exit_code(self, failed: usize) -> i32 {
        match self {
            ExitPolicy::ReflectFailures if failed > 0 => 1,
            _ => 0,
        }
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            program: "manim".to_string(),
            quality: Quality::default(),
            extra_args: Vec::new(),
            pattern: "py".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    ///
    /// A file that exists but cannot be read or parsed yields the defaults
    /// together with the error, so the caller can report it once logging
    /// is up.
    pub fn load() -> (Self, Option<NnanimError>) {
        Self::load_or_default(&config_file_path())
    }

    /// Same as [`AppConfig::load`] for an arbitrary path.
    pub fn load_or_default(path: &Path) -> (Self, Option<NnanimError>) {
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::load_from(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Load config from an explicit path. Missing or malformed files are errors.
    pub fn load_from(path: &Path) -> NnanimResult<Self> {
        if !path.exists() {
            return Err(NnanimError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| NnanimError::config(format!("{}: {e}", path.display())))
    }

    /// Save config to the given path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> NnanimResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Standard config file location.
    pub fn default_path() -> PathBuf {
        config_file_path()
    }
}

fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("nnanim").join("config.json")
}
