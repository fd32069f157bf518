//! zpl-preview core library.
//!
//! Interprets a subset of ZPL-style label markup (text fields, graphic
//! boxes, and one simplified linear barcode symbology) and produces an SVG
//! vector document at a caller-specified physical size and resolution. The
//! main entry points are [`convert`] for one-shot string output and
//! [`convert_to_document`] when the caller wants the primitive list and the
//! diagnostics alongside it.
//!
//! Conversion is synchronous and self-contained: font-file reads are the
//! only I/O, and no state is shared between conversions, so independent
//! inputs may be converted in parallel without coordination.

#![warn(missing_docs)]

/// Simplified linear barcode symbol encoding.
pub mod barcode;
/// Fatal conversion errors.
pub mod error;
/// Font selector resolution.
pub mod font;
/// Markup grammar: lexer, typed commands, serialization helpers.
pub mod grammar;
/// The four interpreter passes.
pub mod interpret;
/// Vector document builder and SVG serialization.
pub mod svg;

use interpret::{fields::extract_fields, layout::resolve_layouts, render::render};

// ── Convenience re-exports ──────────────────────────────────────────────────
// Flat imports for the most common entry points. The full module paths
// remain available for less common types.

// Parser
pub use grammar::command::{Command, ParseResult, ParsedCommand, parse_str};

// Diagnostics (re-exported from the diagnostics crate)
pub use zpl_preview_diagnostics::{Diagnostic, LineIndex, Severity, Span, codes};

// Errors
pub use error::{Error, Result};

// Document
pub use svg::{Color, Primitive, SvgDocument};

// Serialization helpers
pub use grammar::dump::to_pretty_json;

/// Result of converting a markup string to a vector document.
#[derive(Debug)]
pub struct ConvertResult {
    /// The accumulated vector document.
    pub document: SvgDocument,
    /// Diagnostics produced while parsing and rendering.
    pub diagnostics: Vec<Diagnostic>,
}

/// Convert markup to an SVG string at the given physical size.
///
/// Pixel dimensions are `round(width_units × dpi)` by
/// `round(height_units × dpi)`. Empty markup produces a valid, blank,
/// correctly-sized document. The only fatal failures are font resolution
/// and font-file reads, and only when a text primitive is actually drawn.
pub fn convert(
    markup: &str,
    width_units: f64,
    height_units: f64,
    dpi: u32,
    font_selector: &str,
) -> Result<String> {
    convert_to_document(markup, width_units, height_units, dpi, font_selector)
        .map(|r| r.document.to_svg())
}

/// Convert markup to a vector document, keeping diagnostics.
pub fn convert_to_document(
    markup: &str,
    width_units: f64,
    height_units: f64,
    dpi: u32,
    font_selector: &str,
) -> Result<ConvertResult> {
    let width_px = (width_units * f64::from(dpi)).round().max(0.0) as u32;
    let height_px = (height_units * f64::from(dpi)).round().max(0.0) as u32;

    let parsed = parse_str(markup);
    let mut diagnostics = parsed.diagnostics;

    let fields = extract_fields(&parsed.commands);
    let layouts = resolve_layouts(&parsed.commands);

    let mut document = SvgDocument::new(width_px, height_px);
    render(
        &parsed.commands,
        &fields,
        &layouts,
        font_selector,
        &mut document,
        &mut diagnostics,
    )?;

    Ok(ConvertResult {
        document,
        diagnostics,
    })
}
