//! Vector document builder.
//!
//! Accumulates drawable primitives in insertion order (later primitives paint
//! over earlier ones) and serializes them to an SVG string. Referenced fonts
//! are embedded inline as base64 `@font-face` declarations; the registry is
//! populated lazily the first time a text primitive requests a given font,
//! and family identifiers are derived deterministically from the font file
//! path so repeated text primitives share one declaration.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;

use crate::error::{Error, Result};

/// Fonts embedded on every serialization when present on disk, whether or
/// not a primitive references them. Kept for output compatibility with
/// documents produced before lazy registration existed.
const LEGACY_EMBED_FONTS: &[&str] = &["/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"];

/// Paint color for primitives. The drawing model is strictly two-tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Foreground.
    Black,
    /// Background / reverse-video foreground.
    White,
}

impl Color {
    /// The SVG paint keyword for this color.
    pub fn as_str(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::White => "white",
        }
    }
}

/// A drawable vector primitive.
///
/// Ordering in the document is append-only and significant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Primitive {
    /// A text run. `y` is the *top* of the text; the serializer offsets the
    /// baseline down by `size`.
    Text {
        /// X origin.
        x: i32,
        /// Y origin (text top, not baseline).
        y: i32,
        /// Font size in vector units.
        size: u32,
        /// Paint color.
        color: Color,
        /// The literal text content.
        content: String,
        /// Family identifier of a registered font.
        font: String,
    },
    /// An axis-aligned rectangle.
    Rect {
        /// X origin.
        x: i32,
        /// Y origin.
        y: i32,
        /// Width.
        width: i32,
        /// Height.
        height: i32,
        /// Interior paint; `None` leaves the interior unpainted.
        fill: Option<Color>,
        /// Outline paint; `None` draws no outline.
        stroke: Option<Color>,
        /// Outline thickness; ignored when `stroke` is `None`.
        stroke_width: u32,
    },
}

/// The accumulated vector document.
///
/// Owned exclusively by the builder during rendering; immutable once
/// serialized with [`SvgDocument::to_svg`].
#[derive(Debug)]
pub struct SvgDocument {
    width_px: u32,
    height_px: u32,
    primitives: Vec<Primitive>,
    /// Family id → raw font bytes, in deterministic order.
    fonts: BTreeMap<String, Vec<u8>>,
}

impl SvgDocument {
    /// Create an empty document with the given pixel dimensions.
    pub fn new(width_px: u32, height_px: u32) -> Self {
        Self {
            width_px,
            height_px,
            primitives: Vec::new(),
            fonts: BTreeMap::new(),
        }
    }

    /// Document width in pixels.
    pub fn width_px(&self) -> u32 {
        self.width_px
    }

    /// Document height in pixels.
    pub fn height_px(&self) -> u32 {
        self.height_px
    }

    /// The accumulated primitives, in insertion order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Append a primitive.
    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// Register a font file for embedding, returning its family identifier.
    ///
    /// The file is read on first registration only; subsequent calls with the
    /// same path are lookups. A missing or unreadable file is fatal — no text
    /// can be rendered without its font.
    pub fn register_font(&mut self, path: &Path) -> Result<String> {
        let family = font_family_id(path);
        if !self.fonts.contains_key(&family) {
            let bytes = std::fs::read(path).map_err(|source| Error::FontRead {
                path: path.to_path_buf(),
                source,
            })?;
            self.fonts.insert(family.clone(), bytes);
        }
        Ok(family)
    }

    /// Serialize the document to an SVG string.
    ///
    /// Emission order: root sized to the pixel dimensions, font-embedding
    /// block, full-canvas white background, then all primitives in insertion
    /// order.
    pub fn to_svg(&self) -> String {
        let (w, h) = (self.width_px, self.height_px);
        let mut out = String::new();
        let _ = write!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        );

        self.write_font_defs(&mut out);
        out.push_str("<rect width=\"100%\" height=\"100%\" fill=\"white\"/>");

        for p in &self.primitives {
            match p {
                Primitive::Text {
                    x,
                    y,
                    size,
                    color,
                    content,
                    font,
                } => {
                    // The origin is the text top; the baseline sits one font
                    // size below it.
                    let baseline = y + *size as i32;
                    let _ = write!(
                        out,
                        "<text x=\"{x}\" y=\"{baseline}\" font-family=\"{font}\" font-size=\"{size}\" fill=\"{}\">{}</text>",
                        color.as_str(),
                        escape_xml(content),
                    );
                }
                Primitive::Rect {
                    x,
                    y,
                    width,
                    height,
                    fill,
                    stroke,
                    stroke_width,
                } => {
                    let _ = write!(
                        out,
                        "<rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" fill=\"{}\"",
                        fill.map_or("none", Color::as_str),
                    );
                    if let Some(stroke) = stroke {
                        let _ = write!(
                            out,
                            " stroke=\"{}\" stroke-width=\"{stroke_width}\"",
                            stroke.as_str(),
                        );
                    }
                    out.push_str("/>");
                }
            }
        }

        out.push_str("</svg>");
        out
    }

    fn write_font_defs(&self, out: &mut String) {
        let mut faces: Vec<(String, std::borrow::Cow<'_, [u8]>)> = self
            .fonts
            .iter()
            .map(|(family, bytes)| (family.clone(), std::borrow::Cow::from(bytes.as_slice())))
            .collect();

        // Legacy fonts ride along when present on disk, best-effort only:
        // a read failure here just skips the face.
        for path in LEGACY_EMBED_FONTS {
            let family = font_family_id(Path::new(path));
            if self.fonts.contains_key(&family) {
                continue;
            }
            if let Ok(bytes) = std::fs::read(path) {
                faces.push((family, std::borrow::Cow::from(bytes)));
            }
        }

        if faces.is_empty() {
            return;
        }
        out.push_str("<defs><style>");
        for (family, bytes) in &faces {
            let _ = write!(
                out,
                "@font-face{{font-family:'{family}';src:url(data:font/ttf;base64,{}) format('truetype');}}",
                BASE64.encode(bytes),
            );
        }
        out.push_str("</style></defs>");
    }
}

/// Derive a deterministic, path-stable family identifier for a font path.
///
/// No content hash: the same path always yields the same identifier, which is
/// what lets multiple text primitives share one embedded declaration.
pub fn font_family_id(path: &Path) -> String {
    let mut id = String::from("f_");
    for ch in path.to_string_lossy().chars() {
        id.push(if ch.is_ascii_alphanumeric() { ch } else { '_' });
    }
    id
}

/// Escape text content for inclusion in SVG markup.
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
