//! Font selector resolution.
//!
//! Maps a renderer selector (named preset or explicit file path) to a font
//! file path. Pure lookup, no font parsing: the resolved path is only read
//! when a text primitive first requests it, and a missing file at that point
//! is fatal (see [`crate::svg::SvgDocument::register_font`]).

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Named font presets available as selectors.
///
/// Paths follow the conventional Debian TrueType layout; an explicit `.ttf`
/// path bypasses the table entirely.
pub const PRESETS: &[(&str, &str)] = &[
    ("default", "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
    ("0", "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
    ("bold", "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"),
    ("mono", "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf"),
];

/// Resolve a font selector to a font file path.
///
/// An already-existing `.ttf` path is accepted verbatim; otherwise the
/// preset table is consulted. Preset paths are *not* checked for existence
/// here — presence is re-validated at draw time, where a missing file is a
/// fatal error.
pub fn resolve(selector: &str) -> Result<PathBuf> {
    let candidate = Path::new(selector);
    if selector.to_ascii_lowercase().ends_with(".ttf") && candidate.is_file() {
        return Ok(candidate.to_path_buf());
    }
    PRESETS
        .iter()
        .find(|(name, _)| *name == selector)
        .map(|(_, path)| PathBuf::from(path))
        .ok_or_else(|| Error::FontNotFound(selector.to_string()))
}
