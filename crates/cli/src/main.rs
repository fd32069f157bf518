mod raster;
mod render;

use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use zpl_preview_core::{convert_to_document, parse_str, to_pretty_json};
use zpl_preview_diagnostics::{self as diag, Diagnostic, Severity};

use crate::render::{Format, print_summary, render_diagnostics};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "zpl-preview",
    version,
    about = "zpl-preview — render ZPL-subset label markup to SVG previews"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    // ── File analysis commands ──────────────────────────────────────
    /// Parse a markup file and print its command stream.
    Parse { file: String },

    /// Check a markup file: print diagnostics, exit 1 on errors.
    Check { file: String },

    // ── Rendering ───────────────────────────────────────────────────
    /// Render a markup file to an SVG preview (and optionally a PNG).
    Convert {
        file: String,

        #[command(flatten)]
        label: LabelOptions,

        /// Write the SVG here instead of stdout.
        #[arg(long, short)]
        out: Option<PathBuf>,

        /// Also rasterize to a PNG at this path. Requires an external
        /// converter (rsvg-convert, inkscape, or ImageMagick).
        #[arg(long)]
        png: Option<PathBuf>,
    },

    /// Explain a diagnostic ID (e.g. LBL1001).
    Explain { id: String },
}

/// Physical label geometry and font selection.
#[derive(Args, Debug)]
struct LabelOptions {
    /// Label width in physical units (inches at the default DPI).
    #[arg(long, default_value_t = 4.0)]
    width: f64,

    /// Label height in physical units.
    #[arg(long, default_value_t = 6.0)]
    height: f64,

    /// Dots per physical unit.
    #[arg(long, default_value_t = 203)]
    dpi: u32,

    /// Font selector: a preset name ("default", "bold", "mono", "0") or a
    /// path to an existing .ttf file.
    #[arg(long, default_value = "default")]
    font: String,
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let format = Format::resolve_or_detect(cli.output.as_deref());

    match cli.cmd {
        Cmd::Parse { file } => cmd_parse(&file, format)?,
        Cmd::Check { file } => cmd_check(&file, format)?,
        Cmd::Convert {
            file,
            label,
            out,
            png,
        } => cmd_convert(&file, &label, out.as_deref(), png.as_deref(), format)?,
        Cmd::Explain { id } => cmd_explain(&id, format),
    }

    Ok(())
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_parse(file: &str, format: Format) -> Result<()> {
    let input = read_input(file)?;
    let res = parse_str(&input);

    match format {
        Format::Json => {
            // Single valid JSON object to stdout.
            let out = serde_json::json!({
                "commands": res.commands,
                "diagnostics": res.diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            // Command stream to stdout, diagnostics to stderr.
            println!("{}", to_pretty_json(&res.commands)?);
            if !res.diagnostics.is_empty() {
                render_diagnostics(&input, file, &res.diagnostics, format);
                print_summary(&res.diagnostics);
            }
        }
    }

    exit_on_errors(&res.diagnostics);
    Ok(())
}

fn cmd_check(file: &str, format: Format) -> Result<()> {
    let input = read_input(file)?;
    let res = parse_str(&input);
    let ok = !res
        .diagnostics
        .iter()
        .any(|d| matches!(d.severity, Severity::Error));

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "ok": ok,
                "diagnostics": res.diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            render_diagnostics(&input, file, &res.diagnostics, format);
            print_summary(&res.diagnostics);
            if ok {
                eprintln!("check ok");
            }
        }
    }

    exit_on_errors(&res.diagnostics);
    Ok(())
}

fn cmd_convert(
    file: &str,
    label: &LabelOptions,
    out: Option<&std::path::Path>,
    png: Option<&std::path::Path>,
    format: Format,
) -> Result<()> {
    let input = read_input(file)?;
    let result = convert_to_document(&input, label.width, label.height, label.dpi, &label.font)
        .with_context(|| format!("failed to render '{file}'"))?;

    if !result.diagnostics.is_empty() {
        render_diagnostics(&input, file, &result.diagnostics, format);
        if format == Format::Pretty {
            print_summary(&result.diagnostics);
        }
    }

    let svg = result.document.to_svg();

    match out {
        Some(path) => {
            fs::write(path, &svg)
                .with_context(|| format!("failed to write {}", path.display()))?
        }
        None => print!("{svg}"),
    }

    if let Some(png_path) = png {
        let tool = raster::rasterize(&svg, png_path)?;
        eprintln!("rasterized with {tool}: {}", png_path.display());
    }

    exit_on_errors(&result.diagnostics);
    Ok(())
}

fn cmd_explain(id: &str, format: Format) {
    match format {
        Format::Json => {
            let text = diag::codes::explain(id);
            let out = serde_json::json!({
                "id": id,
                "explanation": text,
            });
            match serde_json::to_string_pretty(&out) {
                Ok(s) => println!("{s}"),
                Err(e) => eprintln!("error: {e}"),
            }
        }
        Format::Pretty => {
            // Explanation is the expected output — write to stdout, not stderr.
            if let Some(text) = diag::codes::explain(id) {
                use ariadne::Fmt;
                println!("{}: {}", id.fg(ariadne::Color::Cyan), text);
            } else {
                println!("{id}: (no explanation available)");
            }
        }
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Read markup from a file, or from stdin when the path is `-`.
fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut buf = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)
            .context("failed to read stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(file).with_context(|| format!("failed to read '{file}'"))
    }
}

/// Exit with code 1 if any diagnostic is an error.
/// Warnings and info do not cause a non-zero exit.
fn exit_on_errors(diagnostics: &[Diagnostic]) {
    if diagnostics
        .iter()
        .any(|d| matches!(d.severity, Severity::Error))
    {
        process::exit(1);
    }
}
