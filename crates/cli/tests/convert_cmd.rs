//! CLI regression tests for parse/check/convert/explain.

use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

use assert_cmd::cargo;

const SAMPLE_MARKUP: &str = "^FO50,50^CF30,30^FN1^FS^XZ^FN1^FDHello^FS";

fn preview_cmd() -> Command {
    Command::new(cargo::cargo_bin!("zpl-preview"))
}

fn write_temp_markup(content: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("label.zpl");
    fs::write(&path, content).expect("write temp markup");
    (dir, path.to_string_lossy().to_string())
}

/// Font-file bytes are embedded verbatim, so any content makes a usable
/// existing-`.ttf` selector.
fn write_temp_font(dir: &tempfile::TempDir) -> String {
    let path = dir.path().join("fixture.ttf");
    fs::write(&path, b"\0\x01\0\0glyphs").expect("write temp font");
    path.to_string_lossy().to_string()
}

fn run_with_stdin(args: &[&str], stdin_body: &str) -> std::process::Output {
    let mut child = preview_cmd()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn zpl-preview command");

    {
        let stdin = child.stdin.as_mut().expect("stdin handle");
        stdin
            .write_all(stdin_body.as_bytes())
            .expect("write stdin body");
    }

    child.wait_with_output().expect("wait for output")
}

#[test]
fn parse_supports_stdin_dash_path() {
    let output = run_with_stdin(&["parse", "-", "--output", "json"], SAMPLE_MARKUP);
    assert!(
        output.status.success(),
        "parse stdin should succeed, stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid parse json");
    let commands = json["commands"].as_array().expect("commands array");
    // FO, CF, FN, FS, XZ, FN, FD, FS
    assert_eq!(commands.len(), 8);
    assert_eq!(commands[0]["kind"], "position");
}

#[test]
fn check_reports_ok_for_clean_markup() {
    let (_dir, path) = write_temp_markup(SAMPLE_MARKUP);
    let output = preview_cmd()
        .args(["check", &path, "--output", "json"])
        .output()
        .expect("run check");

    assert!(
        output.status.success(),
        "check should succeed, stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid check json");
    assert_eq!(json["ok"], true);
}

#[test]
fn check_surfaces_unknown_commands_without_failing() {
    let (_dir, path) = write_temp_markup("^ZZnope^FS");
    let output = preview_cmd()
        .args(["check", &path, "--output", "json"])
        .output()
        .expect("run check");

    // Unknown commands are warnings, not errors.
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid check json");
    let diags = json["diagnostics"].as_array().expect("diagnostics array");
    assert!(
        diags
            .iter()
            .any(|d| d.get("id").and_then(|v| v.as_str()) == Some("LBL1001"))
    );
}

#[test]
fn convert_writes_svg_with_requested_dimensions() {
    let (dir, path) = write_temp_markup(SAMPLE_MARKUP);
    let font = write_temp_font(&dir);
    let out = dir.path().join("label.svg");

    let output = preview_cmd()
        .args([
            "convert",
            &path,
            "--width",
            "4",
            "--height",
            "6",
            "--dpi",
            "203",
            "--font",
            &font,
            "-o",
            &out.to_string_lossy(),
            "--output",
            "json",
        ])
        .output()
        .expect("run convert");

    assert!(
        output.status.success(),
        "convert should succeed, stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let svg = fs::read_to_string(&out).expect("read svg output");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("width=\"812\" height=\"1218\""));
    assert!(svg.contains(">Hello</text>"));
}

#[test]
fn convert_keeps_stdout_pure_svg() {
    let (dir, path) = write_temp_markup("^ZZbogus^FO10,10^FDhi^FS");
    let font = write_temp_font(&dir);

    let output = preview_cmd()
        .args(["convert", &path, "--font", &font, "--output", "json"])
        .output()
        .expect("run convert");

    assert!(output.status.success());
    // Diagnostics (the unknown ^ZZ) go to stderr; stdout is the document.
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("<svg"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("LBL1001"));
}

#[test]
fn convert_fails_when_text_needs_an_unresolvable_font() {
    let (_dir, path) = write_temp_markup("^FN1^FDHello^FS");

    let output = preview_cmd()
        .args(["convert", &path, "--font", "no-such-selector"])
        .output()
        .expect("run convert");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no-such-selector"));
}

#[test]
fn convert_of_empty_markup_yields_blank_document() {
    let (_dir, path) = write_temp_markup("");

    let output = preview_cmd()
        .args([
            "convert",
            &path,
            "--width",
            "2",
            "--height",
            "1",
            "--output",
            "json",
        ])
        .output()
        .expect("run convert");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("width=\"406\" height=\"203\""));
}

#[cfg(unix)]
#[test]
fn png_rasterizer_exhaustion_reports_tools_in_order() {
    let (dir, path) = write_temp_markup(SAMPLE_MARKUP);
    let font = write_temp_font(&dir);
    let png = dir.path().join("label.png");
    let empty_path = dir.path().join("no-tools");
    fs::create_dir(&empty_path).expect("create empty PATH dir");

    let output = preview_cmd()
        .args([
            "convert",
            &path,
            "--font",
            &font,
            "--png",
            &png.to_string_lossy(),
            "--output",
            "json",
        ])
        .env("PATH", &empty_path)
        .output()
        .expect("run convert");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no SVG rasterizer succeeded"));
    // Preference order is part of the contract.
    let rsvg = stderr.find("rsvg-convert").expect("rsvg-convert attempted");
    let inkscape = stderr.find("inkscape").expect("inkscape attempted");
    let magick = stderr.find("magick").expect("magick attempted");
    assert!(rsvg < inkscape);
    assert!(inkscape < magick);
}

#[cfg(unix)]
#[test]
fn png_rasterizer_prefers_the_first_available_tool() {
    use std::os::unix::fs::PermissionsExt;

    let (dir, path) = write_temp_markup(SAMPLE_MARKUP);
    let font = write_temp_font(&dir);
    let png = dir.path().join("label.png");

    // A stub converter: rsvg-convert is invoked as `-o <png> <svg>`.
    let tools = dir.path().join("tools");
    fs::create_dir(&tools).expect("create tools dir");
    let stub = tools.join("rsvg-convert");
    fs::write(&stub, "#!/bin/sh\n: > \"$2\"\n").expect("write stub converter");
    fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).expect("mark executable");

    let output = preview_cmd()
        .args([
            "convert",
            &path,
            "--font",
            &font,
            "--png",
            &png.to_string_lossy(),
            "--output",
            "json",
        ])
        .env("PATH", &tools)
        .output()
        .expect("run convert");

    assert!(
        output.status.success(),
        "stub converter should satisfy --png, stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("rasterized with rsvg-convert"));
    assert!(png.exists());
}

#[test]
fn explain_known_code_prints_explanation() {
    let output = preview_cmd()
        .args(["explain", "LBL2002", "--output", "json"])
        .output()
        .expect("run explain");

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid explain json");
    assert_eq!(json["id"], "LBL2002");
    assert!(json["explanation"].is_string());
}
