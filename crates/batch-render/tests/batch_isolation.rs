#![cfg(unix)]

use std::path::Path;

use nnanim_batch::{BatchDriver, BatchOptions, ProcessRenderer, RenderOutcome, ScenePattern};
use nnanim_common::config::Quality;

fn write_scene(dir: &Path, name: &str, body: &str) {
    std::fs::write(dir.join(name), body).unwrap();
}

fn shell_options() -> BatchOptions {
    BatchOptions {
        pattern: ScenePattern::parse("*.sh").unwrap(),
        quality: Quality::Low,
        only: Vec::new(),
    }
}

#[test]
fn failing_scene_in_the_middle_does_not_stop_later_scenes() {
    let dir = tempfile::tempdir().unwrap();
    let marks = dir.path().join("marks");
    std::fs::create_dir(&marks).unwrap();

    let mark = |name: &str| format!("touch '{}'\n", marks.join(name).display());
    write_scene(dir.path(), "01_neuron.sh", &mark("01"));
    write_scene(
        dir.path(),
        "02_layers.sh",
        &format!("{}echo 'layer scene crashed' >&2\nexit 1\n", mark("02")),
    );
    write_scene(dir.path(), "03_training.sh", &mark("03"));
    write_scene(dir.path(), "README.md", "not a scene");

    let mut driver = BatchDriver::new(ProcessRenderer::new("sh"), shell_options());
    let report = driver.run_batch(dir.path()).unwrap();

    let names: Vec<_> = report.results.iter().map(|r| r.scene.name.as_str()).collect();
    assert_eq!(names, vec!["01_neuron.sh", "02_layers.sh", "03_training.sh"]);

    let outcomes: Vec<_> = report.results.iter().map(|r| r.success()).collect();
    assert_eq!(outcomes, vec![true, false, true]);
    assert_eq!(report.results[1].diagnostic(), "layer scene crashed\n");
    assert_eq!(report.results[1].exit_code(), Some(1));

    for name in ["01", "02", "03"] {
        assert!(marks.join(name).exists(), "scene {name} was never rendered");
    }

    assert_eq!(report.summary.total, 3);
    assert_eq!(report.summary.succeeded, 2);
    assert_eq!(report.summary.failed, 1);
}

#[test]
fn quality_flag_reaches_the_renderer() {
    let dir = tempfile::tempdir().unwrap();
    write_scene(
        dir.path(),
        "flag.sh",
        "[ \"$1\" = \"-ql\" ] || { echo \"unexpected flag: $1\" >&2; exit 2; }\n",
    );

    let mut driver = BatchDriver::new(ProcessRenderer::new("sh"), shell_options());
    let report = driver.run_batch(dir.path()).unwrap();
    assert!(report.summary.all_succeeded(), "{:?}", report.results);
}

#[test]
fn unspawnable_renderer_fails_every_scene_without_aborting() {
    let dir = tempfile::tempdir().unwrap();
    write_scene(dir.path(), "a.sh", "exit 0\n");
    write_scene(dir.path(), "b.sh", "exit 0\n");

    let mut driver = BatchDriver::new(
        ProcessRenderer::new("nnanim-missing-renderer-for-tests"),
        shell_options(),
    );
    let report = driver.run_batch(dir.path()).unwrap();

    assert_eq!(report.results.len(), 2);
    for result in &report.results {
        assert!(matches!(result.outcome, RenderOutcome::SpawnFailed { .. }));
        assert!(result.diagnostic().contains("nnanim-missing-renderer-for-tests"));
    }
    assert_eq!(report.summary.failed, 2);
}

#[test]
fn report_round_trips_through_json_file() {
    let dir = tempfile::tempdir().unwrap();
    write_scene(dir.path(), "ok.sh", "echo done\n");

    let mut driver = BatchDriver::new(ProcessRenderer::new("sh"), shell_options());
    let report = driver.run_batch(dir.path()).unwrap();

    let out = dir.path().join("out").join("report.json");
    report.write_json(&out).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["results"][0]["status"], "rendered");
    assert_eq!(value["results"][0]["stdout"], "done\n");
    assert!(chrono::DateTime::parse_from_rfc3339(value["started_at"].as_str().unwrap()).is_ok());
}
