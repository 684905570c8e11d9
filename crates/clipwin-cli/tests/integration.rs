//! Integration tests for clipwin CLI commands.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use serde_json::Value;

fn clipwin(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_clipwin"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Path to a file in the repo's test_assets directory.
fn test_asset(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // Go up from clipwin-cli to crates
    path.pop(); // Go up from crates to repo root
    path.push("test_assets");
    path.push(name);
    path
}

fn temp_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("clipwin-{}-{}", std::process::id(), name))
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON")
}

fn point(value: &Value) -> (f64, f64) {
    (value["x"].as_f64().unwrap(), value["y"].as_f64().unwrap())
}

#[test]
fn help_lists_commands() {
    let output = clipwin(&["help"]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    for command in ["line", "polygon", "scene", "demo"] {
        assert!(stderr.contains(command), "usage should mention '{}'", command);
    }
}

#[test]
fn no_arguments_prints_usage_and_fails() {
    let output = clipwin(&[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage:"));
}

#[test]
fn unknown_command_fails() {
    let output = clipwin(&["frobnicate"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error: Unknown command"));
}

#[test]
fn demo_text_output() {
    let output = clipwin(&["demo"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4, "3 segments + 1 polygon:\n{}", stdout);
    assert!(lines[0].ends_with("(2.0000, 2.2857)-(7.0000, 3.7143)"), "{}", lines[0]);
    assert!(lines[2].ends_with("(3.3750, 2.0000)-(4.8750, 6.0000)"), "{}", lines[2]);
    assert!(lines[3].starts_with("polygon quad: 4 -> 6 vertices"), "{}", lines[3]);
}

#[test]
fn line_json_output() {
    let output = clipwin(&[
        "line", "--window", "2,2,7,6", "--segment", "1,2,8,4", "--segment", "0,8,10,9", "--json",
    ]);
    let json = stdout_json(&output);

    let segments = json["segments"].as_array().unwrap();
    assert_eq!(segments.len(), 2);

    let first = &segments[0];
    assert_eq!(first["visible"], Value::Bool(true));
    assert_eq!(first["clipped"]["x1"].as_f64(), Some(2.0));
    assert!((first["clipped"]["y1"].as_f64().unwrap() - 16.0 / 7.0).abs() < 1e-12);
    assert_eq!(first["clipped"]["x2"].as_f64(), Some(7.0));

    assert_eq!(segments[1]["visible"], Value::Bool(false));
    assert!(segments[1]["clipped"].is_null());
}

#[test]
fn line_outside_window_text() {
    let output = clipwin(&["line", "-w", "0,0,1,1", "-s", "2,2,3,3"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("outside"));
}

#[test]
fn line_inverted_window_is_an_error() {
    let output = clipwin(&["line", "--window", "7,2,2,6", "--segment", "1,2,8,4"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error: invalid clip window"));
}

#[test]
fn line_requires_window() {
    let output = clipwin(&["line", "--segment", "1,2,8,4"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--window"));
}

#[test]
fn polygon_json_output() {
    let output = clipwin(&[
        "polygon", "--window", "2,2,7,6", "--subject", "3,3 5,8 8,5 6,2", "--json",
    ]);
    let json = stdout_json(&output);

    let clipped: Vec<(f64, f64)> = json["polygons"][0]["clipped"]
        .as_array()
        .unwrap()
        .iter()
        .map(point)
        .collect();
    assert_eq!(
        clipped,
        vec![(6.0, 2.0), (3.0, 3.0), (4.2, 6.0), (7.0, 6.0), (7.0, 3.5), (6.0, 2.0)]
    );
}

#[test]
fn polygon_clockwise_region_needs_no_validate() {
    let region = "2,2 2,6 7,6 7,2";
    let subject = "3,3 5,8 8,5 6,2";

    let output = clipwin(&["polygon", "--region", region, "--subject", subject]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("clockwise"));

    let output = clipwin(&[
        "polygon", "--region", region, "--subject", subject, "--no-validate", "--json",
    ]);
    let json = stdout_json(&output);
    assert!(json["polygons"][0]["clipped"].as_array().unwrap().is_empty());
}

#[test]
fn polygon_with_path_data() {
    let output = clipwin(&[
        "polygon", "--region-path", "M0,0 H10 V10 H0 Z", "--subject-path", "M2,2 L8,2 L5,10 Z",
        "--json",
    ]);
    let json = stdout_json(&output);
    assert_eq!(json["polygons"][0]["clipped"].as_array().unwrap().len(), 4);
    assert_eq!(json["region"].as_array().unwrap().len(), 4);
}

#[test]
fn polygon_from_svg_files() {
    let svg = test_asset("shapes.svg");
    let svg = svg.to_str().unwrap();

    let output = clipwin(&["polygon", "--region-svg", svg, "--subject-svg", svg, "--json"]);
    let json = stdout_json(&output);

    let polygons = json["polygons"].as_array().unwrap();
    assert_eq!(polygons.len(), 2);
    // The triangle clipped to itself keeps its area.
    let triangle = &polygons[0];
    let input_area = triangle["input_area"].as_f64().unwrap();
    let clipped_area = triangle["clipped_area"].as_f64().unwrap();
    assert!((input_area - clipped_area).abs() < 1e-6, "{} vs {}", input_area, clipped_area);
}

#[test]
fn scene_yaml_file() {
    let scene = test_asset("demo_scene.yaml");
    let output = clipwin(&["scene", scene.to_str().unwrap(), "--json"]);
    let json = stdout_json(&output);

    assert_eq!(json["name"], Value::String("demo".to_string()));

    let segments = json["segments"].as_array().unwrap();
    assert_eq!(segments.len(), 4);
    assert_eq!(segments.iter().filter(|s| s["visible"] == Value::Bool(true)).count(), 3);

    let polygons = json["polygons"].as_array().unwrap();
    assert_eq!(polygons[0]["clipped"].as_array().unwrap().len(), 6);
    assert!(polygons[1]["clipped"].as_array().unwrap().is_empty());
}

#[test]
fn scene_json_file_with_region() {
    let scene = test_asset("diamond_scene.json");
    let output = clipwin(&["scene", scene.to_str().unwrap(), "--json"]);
    let json = stdout_json(&output);

    let square = &json["polygons"][0];
    assert!((square["clipped_area"].as_f64().unwrap() - 50.0).abs() < 1e-9);

    let triangle = &json["polygons"][1];
    assert!(!triangle["clipped"].as_array().unwrap().is_empty());
}

#[test]
fn scene_from_stdin() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_clipwin"))
        .args(["scene", "-", "--json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"window: [0, 0, 10, 10]\nsegments:\n  - [-5, 5, 15, 5]\n")
        .unwrap();

    let output = child.wait_with_output().unwrap();
    let json = stdout_json(&output);
    let clipped = &json["segments"][0]["clipped"];
    assert_eq!(clipped["x1"].as_f64(), Some(0.0));
    assert_eq!(clipped["x2"].as_f64(), Some(10.0));
}

#[test]
fn scene_missing_file_fails() {
    let output = clipwin(&["scene", "does/not/exist.yaml"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}

#[test]
fn demo_svg_and_png_files() {
    let svg_path = temp_file("demo.svg");
    let png_path = temp_file("demo.png");

    let output = clipwin(&[
        "demo",
        "--svg",
        "-o",
        svg_path.to_str().unwrap(),
        "--png",
        png_path.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "demo failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let svg = std::fs::read_to_string(&svg_path).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("stroke=\"red\""));
    assert!(svg.contains("stroke=\"blue\""));

    let png = std::fs::read(&png_path).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let _ = std::fs::remove_file(svg_path);
    let _ = std::fs::remove_file(png_path);
}

#[test]
fn epsilon_flag_is_validated() {
    let output = clipwin(&["demo", "--epsilon", "abc"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid epsilon"));
}
