//! External renderer invocation.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::Instant;

use nnanim_common::config::{Quality, RendererConfig};
use nnanim_common::error::NnanimError;

use crate::discovery::SceneFile;
use crate::report::RenderResult;

/// Something that turns one scene file into rendered media.
///
/// Implementations never fail outright: every problem, including a
/// renderer that cannot be started, is folded into the returned
/// [`RenderResult`] so the batch can move on to the next scene.
pub trait Renderer: Send {
    /// Render one scene, blocking until the renderer is done.
    fn render(&mut self, scene: &SceneFile, quality: Quality) -> RenderResult;

    /// Check if this renderer is available on the system.
    fn is_available(&self) -> bool;

    /// Renderer name.
    fn name(&self) -> &str;
}

/// Runs an external renderer executable once per scene:
/// `program [extra_args..] <scene> <quality flag>`.
#[derive(Debug, Clone)]
pub struct ProcessRenderer {
    program: String,
    extra_args: Vec<String>,
}

impl ProcessRenderer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            extra_args: Vec::new(),
        }
    }

    pub fn from_config(config: &RendererConfig) -> Self {
        Self::new(config.program.clone()).with_args(config.extra_args.clone())
    }

    /// Arguments inserted before the scene path.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments for one invocation, program excluded.
    pub fn args_for(&self, scene: &SceneFile, quality: Quality) -> Vec<String> {
        let mut args = self.extra_args.clone();
        args.push(scene.path.display().to_string());
        args.push(quality.flag().to_string());
        args
    }

    fn command(&self, scene: &SceneFile, quality: Quality) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.extra_args)
            .arg(&scene.path)
            .arg(quality.flag())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl Renderer for ProcessRenderer {
    fn render(&mut self, scene: &SceneFile, quality: Quality) -> RenderResult {
        tracing::debug!(
            program = %self.program,
            args = ?self.args_for(scene, quality),
            "Running renderer"
        );

        let start = Instant::now();
        let output = match self.command(scene, quality).output() {
            Ok(output) => output,
            Err(e) => {
                let err = NnanimError::spawn(&self.program, e.to_string());
                tracing::warn!(scene = %scene.name, error = %err, "Renderer did not start");
                return RenderResult::spawn_failed(scene.clone(), err.to_string());
            }
        };

        let result = result_from_output(scene.clone(), output, start);
        tracing::info!(
            scene = %scene.name,
            success = result.success(),
            exit_code = ?result.exit_code(),
            duration_ms = result.duration_ms,
            "Renderer finished"
        );
        result
    }

    fn is_available(&self) -> bool {
        command_exists(&self.program)
    }

    fn name(&self) -> &str {
        &self.program
    }
}

fn result_from_output(scene: SceneFile, output: Output, start: Instant) -> RenderResult {
    let elapsed = start.elapsed();
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if output.status.success() {
        return RenderResult::rendered(scene, stdout, elapsed);
    }

    let exit_code = output.status.code();
    let stderr = if exit_code.is_none() && stderr.trim().is_empty() {
        NnanimError::render(format!(
            "renderer terminated without an exit code ({})",
            output.status
        ))
        .to_string()
    } else {
        stderr
    };
    RenderResult::failed(scene, exit_code, stdout, stderr, elapsed)
}

/// Whether `program` resolves to an existing file, either directly
/// (when it contains a path separator) or through `PATH`.
pub fn command_exists(program: &str) -> bool {
    let direct = Path::new(program);
    if direct.components().count() > 1 {
        return direct.is_file();
    }

    let Some(paths) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&paths).any(|dir| candidates(&dir, program).any(|p| p.is_file()))
}

fn candidates<'a>(dir: &'a Path, program: &'a str) -> impl Iterator<Item = PathBuf> + 'a {
    let plain = std::iter::once(dir.join(program));
    #[cfg(windows)]
    let plain = plain.chain(std::iter::once(dir.join(format!("{program}.exe"))));
    plain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_put_scene_then_quality_flag() {
        let renderer = ProcessRenderer::new("manim");
        let scene = SceneFile::new("/anim/what_is_nn.py");
        assert_eq!(
            renderer.args_for(&scene, Quality::High),
            vec!["/anim/what_is_nn.py".to_string(), "-qh".to_string()]
        );
    }

    #[test]
    fn test_extra_args_come_first() {
        let config = RendererConfig {
            program: "python3".to_string(),
            extra_args: vec!["-m".to_string(), "manim".to_string()],
            ..RendererConfig::default()
        };
        let renderer = ProcessRenderer::from_config(&config);
        let scene = SceneFile::new("/anim/a.py");
        assert_eq!(renderer.program(), "python3");
        assert_eq!(
            renderer.args_for(&scene, Quality::Low),
            vec!["-m", "manim", "/anim/a.py", "-ql"]
        );
    }

    #[test]
    fn test_missing_program_becomes_spawn_failure() {
        let mut renderer = ProcessRenderer::new("nnanim-no-such-renderer-7f3a");
        let scene = SceneFile::new("/anim/a.py");
        let result = renderer.render(&scene, Quality::High);

        assert!(!result.success());
        assert!(result
            .diagnostic()
            .contains("Failed to start renderer 'nnanim-no-such-renderer-7f3a'"));
        assert!(!renderer.is_available());
    }

    #[test]
    fn test_command_exists_with_direct_path() {
        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("renderer");
        std::fs::write(&tool, "").unwrap();
        assert!(command_exists(tool.to_str().unwrap()));
        assert!(!command_exists(dir.path().join("absent").to_str().unwrap()));
    }

    #[cfg(unix)]
    mod process {
        use super::*;

        fn script(dir: &Path, name: &str, body: &str) -> SceneFile {
            let path = dir.join(name);
            std::fs::write(&path, body).unwrap();
            SceneFile::new(path)
        }

        #[test]
        fn test_exit_zero_is_success_with_empty_diagnostic() {
            let dir = tempfile::tempdir().unwrap();
            let scene = script(dir.path(), "ok.sh", "echo \"rendered $1\"\necho noise >&2\n");
            let mut renderer = ProcessRenderer::new("sh");

            let result = renderer.render(&scene, Quality::High);
            assert!(result.success());
            assert_eq!(result.diagnostic(), "");
            assert_eq!(result.stdout.trim(), "rendered -qh");
        }

        #[test]
        fn test_non_zero_exit_keeps_stderr() {
            let dir = tempfile::tempdir().unwrap();
            let scene = script(
                dir.path(),
                "broken.sh",
                "echo partial\necho 'Traceback: scene crashed' >&2\nexit 3\n",
            );
            let mut renderer = ProcessRenderer::new("sh");

            let result = renderer.render(&scene, Quality::Low);
            assert!(!result.success());
            assert_eq!(result.exit_code(), Some(3));
            assert_eq!(result.diagnostic(), "Traceback: scene crashed\n");
            assert_eq!(result.stdout, "partial\n");
        }

        #[test]
        fn test_signal_without_stderr_gets_message() {
            let dir = tempfile::tempdir().unwrap();
            let scene = script(dir.path(), "killed.sh", "kill -9 $$\n");
            let mut renderer = ProcessRenderer::new("sh");

            let result = renderer.render(&scene, Quality::High);
            assert!(!result.success());
            assert_eq!(result.exit_code(), None);
            assert!(result.diagnostic().contains("without an exit code"));
        }

        #[test]
        fn test_sh_is_available() {
            assert!(ProcessRenderer::new("sh").is_available());
        }
    }
}
