//! Render every scene in the scene directory.

use std::process::ExitCode;

use anyhow::Context as _;
use nnanim_batch::{BatchDriver, BatchEvent, ProcessRenderer, ProgressCallback, RenderOutcome};
use nnanim_common::config::{AppConfig, ExitPolicy};

use crate::RenderArgs;

pub fn run(config: &AppConfig, args: RenderArgs) -> anyhow::Result<ExitCode> {
    let dir = super::resolve_scene_dir(&args.scenes, config);

    let mut options = super::batch_options(&args.scenes, config)?;
    if let Some(quality) = args.quality {
        options.quality = quality;
    }

    let mut renderer_config = config.renderer.clone();
    if let Some(program) = args.renderer {
        renderer_config.program = program;
    }
    let renderer = ProcessRenderer::from_config(&renderer_config);

    let exit_policy = if args.always_succeed {
        ExitPolicy::AlwaysZero
    } else {
        config.exit_policy
    };

    println!("Starting animation rendering process...");
    println!("  Scenes: {}", dir.display());
    println!("  Renderer: {} ({})", renderer.program(), options.quality);

    let mut driver = BatchDriver::new(renderer, options).with_progress(progress_printer());
    let report = driver
        .run_batch(&dir)
        .context("Nothing to render: scene directory could not be read")?;

    if let Some(path) = &args.report {
        report
            .write_json(path)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        println!("  Report: {}", path.display());
    }

    let code = exit_policy.exit_code(report.summary.failed);
    tracing::debug!(?exit_policy, code, "Exiting");
    Ok(ExitCode::from(code as u8))
}

fn progress_printer() -> ProgressCallback {
    Box::new(|event| match event {
        BatchEvent::Discovered { count, .. } => {
            println!("Found {count} animation files to render.");
        }
        BatchEvent::NoScenes { dir } => {
            println!("No animation files found in {}!", dir.display());
        }
        BatchEvent::Started {
            index,
            total,
            scene,
        } => {
            println!("\n[{index}/{total}] Rendering {}...", scene.name);
        }
        BatchEvent::Finished { result, .. } => match &result.outcome {
            RenderOutcome::Rendered => {
                println!("✓ Successfully rendered {}", result.scene.name);
            }
            RenderOutcome::Failed { exit_code, stderr } => {
                let name = &result.scene.name;
                match exit_code {
                    Some(code) => println!("✗ Failed to render {name} (exit code {code})"),
                    None => println!("✗ Failed to render {name}"),
                }
                println!("Error: {}", stderr.trim_end());
            }
            RenderOutcome::SpawnFailed { message } => {
                println!("✗ Error processing {}: {message}", result.scene.name);
            }
        },
        BatchEvent::Completed { summary } => {
            println!(
                "\nRendering process completed! {} succeeded, {} failed ({} total).",
                summary.succeeded, summary.failed, summary.total
            );
        }
    })
}
