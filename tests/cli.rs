use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TRACE: &str = r#"
[[nodes]]
name = "button"
bounds = [0.0, 0.0, 100.0, 40.0]
accepts_focus = true
handles = ["click"]

[[frames]]
states = [{ mouse = { x = 10.0, y = 10.0 } }]

[[frames]]
states = [{ mouse = { x = 10.0, y = 10.0, buttons = ["left"] } }]

[[frames]]
states = [{ mouse = { x = 10.0, y = 10.0 } }]
"#;

fn scene_input_cmd() -> Command {
    Command::cargo_bin("scene-input").expect("binary exists")
}

fn write_trace(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("trace.toml");
    std::fs::write(&path, TRACE).unwrap();
    path
}

#[test]
fn help_prints_about() {
    scene_input_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Replay input traces against a scene graph",
        ));
}

#[test]
fn without_trace_prints_usage() {
    scene_input_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn replays_trace_as_text() {
    let temp = TempDir::new().unwrap();
    let trace = write_trace(&temp);

    scene_input_cmd()
        .env("SCENE_INPUT_CONFIG", temp.path().join("missing.toml"))
        .arg("--trace")
        .arg(&trace)
        .assert()
        .success()
        .stdout(predicate::str::contains("[2] button click (handled)"))
        .stdout(predicate::str::contains("focused: button"));
}

#[test]
fn replays_trace_as_json_lines() {
    let temp = TempDir::new().unwrap();
    let trace = write_trace(&temp);

    scene_input_cmd()
        .env("SCENE_INPUT_CONFIG", temp.path().join("missing.toml"))
        .args(["--json", "--trace"])
        .arg(&trace)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"frame":2,"node":"button","event":"click","handled":true}"#,
        ))
        .stdout(predicate::str::contains("focused:").not());
}

#[test]
fn demo_trace_replays() {
    let temp = TempDir::new().unwrap();
    let demo = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/form.toml");

    scene_input_cmd()
        .env("SCENE_INPUT_CONFIG", temp.path().join("missing.toml"))
        .arg("--trace")
        .arg(demo)
        .assert()
        .success()
        .stdout(predicate::str::contains("field click (handled)"))
        .stdout(predicate::str::contains("slider drag_start (handled)"))
        .stdout(predicate::str::contains("focused: none"));
}

#[test]
fn explicit_config_is_loaded() {
    let temp = TempDir::new().unwrap();
    let trace = write_trace(&temp);
    let config = temp.path().join("config.toml");
    std::fs::write(&config, "[mouse]\ndouble_click_time_ms = 100\n").unwrap();

    scene_input_cmd()
        .args(["--config"])
        .arg(&config)
        .arg("--trace")
        .arg(&trace)
        .assert()
        .success();
}

#[test]
fn broken_config_fails_with_context() {
    let temp = TempDir::new().unwrap();
    let trace = write_trace(&temp);
    let config = temp.path().join("config.toml");
    std::fs::write(&config, "[mouse\n").unwrap();

    scene_input_cmd()
        .arg("--config")
        .arg(&config)
        .arg("--trace")
        .arg(&trace)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn missing_trace_fails() {
    let temp = TempDir::new().unwrap();

    scene_input_cmd()
        .env("SCENE_INPUT_CONFIG", temp.path().join("missing.toml"))
        .arg("--trace")
        .arg(temp.path().join("nope.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read trace"));
}

#[test]
fn init_config_writes_defaults_once() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("nested").join("config.toml");

    scene_input_cmd()
        .env("SCENE_INPUT_CONFIG", &config)
        .arg("--init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created default config"));

    let written = std::fs::read_to_string(&config).unwrap();
    assert!(written.contains("repeat_tick_rate_ms = 70"));

    scene_input_cmd()
        .env("SCENE_INPUT_CONFIG", &config)
        .arg("--init-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn schema_dump_is_json() {
    Command::cargo_bin("dump_config_schema")
        .expect("binary exists")
        .assert()
        .success()
        .stdout(predicate::str::contains("repeat_tick_rate_ms"));
}
