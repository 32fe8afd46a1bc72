use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn diagrammer_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("diagrammer").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd
}

fn write_script(dir: &TempDir, name: &str, source: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, source).unwrap();
    path
}

#[test]
fn help_prints_about_text() {
    let temp = TempDir::new().unwrap();
    diagrammer_cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Render diagram scripts as SVG"));
}

#[test]
fn missing_script_argument_is_a_usage_error() {
    let temp = TempDir::new().unwrap();
    diagrammer_cmd(&temp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn renders_named_shapes_to_stdout() {
    let temp = TempDir::new().unwrap();
    let script = write_script(
        &temp,
        "plate.dg",
        "plate = Rect(0, 0, 10, 10)\nhole = Circle(5, 5, 3)\npart = subtract(plate, hole)\n_tmp = Rect(50, 50, 1, 1)\n",
    );

    diagrammer_cmd(&temp)
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<svg"))
        .stdout(predicate::str::contains("viewBox=\"0 0 297 210\""))
        .stdout(predicate::str::contains("<!-- part -->"))
        .stdout(predicate::str::contains("fill-rule=\"evenodd\""))
        .stdout(predicate::str::contains("<circle cx=\"5\" cy=\"5\" r=\"3\""))
        .stdout(predicate::str::contains("_tmp").not())
        .stdout(predicate::str::contains("</svg>"));
}

#[test]
fn writes_output_file() {
    let temp = TempDir::new().unwrap();
    let script = write_script(&temp, "square.dg", "sq = Rect(1, 2, 3, 4)\n");
    let output = temp.path().join("out.svg");

    diagrammer_cmd(&temp)
        .arg(&script)
        .args(["--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains("M 1.000000 2.000000 L 4.000000 2.000000 L 4.000000 6.000000 L 1.000000 6.000000 z"));
}

#[test]
fn script_errors_abort_without_output() {
    let temp = TempDir::new().unwrap();
    let script = write_script(&temp, "bad.dg", "a = Rect(0, 0, 1, 1)\nb = Polygon([[0, 0], [1, 1]])\n");

    diagrammer_cmd(&temp)
        .arg(&script)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn deeply_nested_script_fails_cleanly() {
    let temp = TempDir::new().unwrap();
    let source = format!("a = {}1{}\n", "(".repeat(100_000), ")".repeat(100_000));
    let script = write_script(&temp, "deep.dg", &source);

    diagrammer_cmd(&temp)
        .arg(&script)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("expression nested too deeply"));
}

#[test]
fn shapes_off_the_clipping_grid_are_an_error() {
    let temp = TempDir::new().unwrap();
    let script = write_script(
        &temp,
        "huge.dg",
        "plate = Rect(0, 0, 1e17, 1e17)\npart = subtract(plate, Circle(5, 5, 3))\n",
    );

    diagrammer_cmd(&temp)
        .arg(&script)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("line 2"))
        .stderr(predicate::str::contains("outside the clipping grid"));
}

#[test]
fn order_flag_sorts_by_z() {
    let temp = TempDir::new().unwrap();
    let script = write_script(
        &temp,
        "order.dg",
        "first = Rect(0, 0, 1, 1)\nsecond = Circle(5, 5, 1)\ntmp = first\nfirst = second\nsecond = tmp\n",
    );

    let output = diagrammer_cmd(&temp)
        .arg(&script)
        .args(["--order", "z-order"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let svg = String::from_utf8(output.stdout).unwrap();
    let path = svg.find("<path").unwrap();
    let circle = svg.find("<circle").unwrap();
    assert!(path < circle, "lower z must come first:\n{svg}");
}

#[test]
fn config_file_overrides_defaults() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("custom.toml");
    fs::write(
        &config,
        "[document]\nwidth = 100.0\nheight = 50.0\n\n[render]\nname_comments = false\n\n[style]\nfill = \"orange\"\n",
    )
    .unwrap();
    let script = write_script(&temp, "c.dg", "c = Circle(1, 1, 1)\n");

    diagrammer_cmd(&temp)
        .arg(&script)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("viewBox=\"0 0 100 50\""))
        .stdout(predicate::str::contains("fill=\"orange\""))
        .stdout(predicate::str::contains("<!--").not());
}

#[test]
fn missing_script_file_reports_path() {
    let temp = TempDir::new().unwrap();
    diagrammer_cmd(&temp)
        .arg(temp.path().join("nope.dg"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read script"));
}
