//! Error types shared across nnanim crates.

use std::path::PathBuf;

/// Top-level error type for nnanim operations.
#[derive(Debug, thiserror::Error)]
pub enum NnanimError {
    #[error("Cannot read scene directory {path}: {source}")]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to start renderer '{program}': {message}")]
    Spawn { program: String, message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using NnanimError.
pub type NnanimResult<T> = Result<T, NnanimError>;

impl NnanimError {
    pub fn discovery(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Discovery {
            path: path.into(),
            source,
        }
    }

    pub fn spawn(program: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Spawn {
            program: program.into(),
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_error_names_directory() {
        let err = NnanimError::discovery(
            "/nope/animations",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/nope/animations"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_spawn_error_names_program() {
        let err = NnanimError::spawn("manim", "No such file or directory (os error 2)");
        assert_eq!(
            err.to_string(),
            "Failed to start renderer 'manim': No such file or directory (os error 2)"
        );
    }
}
