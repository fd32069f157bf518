//! Optional PNG rasterization via external converters.
//!
//! SVG output is the primary artifact; rasterization shells out to whichever
//! converter is installed. Tools are tried in order and a tool that is
//! missing or fails is skipped, so a partial toolbox still works.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};

/// One external converter invocation: program name plus an argument builder.
struct Converter {
    program: &'static str,
    args: fn(svg: &Path, png: &Path) -> Vec<String>,
}

/// Converters in preference order. rsvg-convert produces the most faithful
/// output for embedded fonts, so it goes first.
const CONVERTERS: &[Converter] = &[
    Converter {
        program: "rsvg-convert",
        args: |svg, png| {
            vec![
                "-o".into(),
                png.display().to_string(),
                svg.display().to_string(),
            ]
        },
    },
    Converter {
        program: "inkscape",
        args: |svg, png| {
            vec![
                svg.display().to_string(),
                format!("--export-filename={}", png.display()),
            ]
        },
    },
    Converter {
        program: "magick",
        args: |svg, png| vec![svg.display().to_string(), png.display().to_string()],
    },
    Converter {
        program: "convert",
        args: |svg, png| vec![svg.display().to_string(), png.display().to_string()],
    },
];

/// Rasterize an SVG string to a PNG file using the first available external
/// converter. Returns the name of the tool that succeeded.
pub(crate) fn rasterize(svg: &str, png_path: &Path) -> Result<&'static str> {
    let dir = tempfile::tempdir().context("failed to create a scratch directory")?;
    let svg_path = dir.path().join("label.svg");
    std::fs::write(&svg_path, svg)
        .with_context(|| format!("failed to write {}", svg_path.display()))?;

    let mut attempted = Vec::new();
    for converter in CONVERTERS {
        let status = Command::new(converter.program)
            .args((converter.args)(&svg_path, png_path))
            .status();
        match status {
            Ok(s) if s.success() => return Ok(converter.program),
            Ok(s) => attempted.push(format!("{} (exit {})", converter.program, s)),
            // Not installed, or not runnable. Try the next one.
            Err(e) => attempted.push(format!("{} ({})", converter.program, e)),
        }
    }

    bail!(
        "no SVG rasterizer succeeded; tried: {}",
        attempted.join(", ")
    )
}
