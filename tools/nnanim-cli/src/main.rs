//! nnanim CLI — Batch renderer for the neural network explainer animations.
//!
//! Usage:
//!   nnanim                     Render every scene in ./animations (next to the binary)
//!   nnanim render [OPTIONS]    Same, with overrides
//!   nnanim list [OPTIONS]      Show which scenes a render would pick up
//!   nnanim check               Check renderer and scene directory
//!   nnanim init                Write a default config file

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use nnanim_common::config::{AppConfig, Quality};

mod commands;

#[derive(Parser)]
#[command(
    name = "nnanim",
    about = "Batch-render neural network explainer animations",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/nnanim/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Where to look for scenes.
#[derive(Args, Debug, Default, Clone)]
pub struct SceneArgs {
    /// Scene directory
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Scene file pattern (e.g. "py" or "*.py")
    #[arg(long)]
    pub pattern: Option<String>,

    /// Only these scenes (file stem or name); repeatable
    #[arg(long)]
    pub only: Vec<String>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub scenes: SceneArgs,

    /// Render quality: low, medium, high, production, fourk
    #[arg(short, long)]
    pub quality: Option<Quality>,

    /// Renderer executable
    #[arg(long)]
    pub renderer: Option<String>,

    /// Write a JSON batch report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Exit 0 even when some scenes fail
    #[arg(long)]
    pub always_succeed: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every scene in the scene directory (default)
    Render(RenderArgs),

    /// List the scenes a render would process
    List(SceneArgs),

    /// Check renderer availability and the scene directory
    Check(SceneArgs),

    /// Write a default config file
    Init {
        /// Where to write it (defaults to the standard config location)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let (config, config_error) = match &cli.config {
        Some(path) => {
            let config = AppConfig::load_from(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            (config, None)
        }
        None => AppConfig::load(),
    };

    nnanim_common::logging::init_logging(&config.logging, cli.verbose);

    if let Some(e) = config_error {
        tracing::warn!("Failed to load config, using defaults: {e}");
    }

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_path);

    match cli.command.unwrap_or_else(|| Commands::Render(RenderArgs::default())) {
        Commands::Render(args) => commands::render::run(&config, args),
        Commands::List(args) => commands::list::run(&config, args).map(|_| ExitCode::SUCCESS),
        Commands::Check(args) => {
            commands::check::run(&config, &config_path, args).map(|_| ExitCode::SUCCESS)
        }
        Commands::Init { path, force } => {
            commands::init::run(&config, path, force).map(|_| ExitCode::SUCCESS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_is_valid() {
        let cli = Cli::try_parse_from(["nnanim"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_render_flags_parse() {
        let cli = Cli::try_parse_from([
            "nnanim",
            "render",
            "--quality",
            "4k",
            "--only",
            "what_is_nn",
            "--only",
            "learning_process",
            "--always-succeed",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Render(args)) => {
                assert_eq!(args.quality, Some(Quality::FourK));
                assert_eq!(args.scenes.only, vec!["what_is_nn", "learning_process"]);
                assert!(args.always_succeed);
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_unknown_quality_is_rejected() {
        assert!(Cli::try_parse_from(["nnanim", "render", "--quality", "ultra"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["nnanim", "list", "-v", "--config", "cfg.json"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("cfg.json")));
    }
}
