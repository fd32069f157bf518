//! Passes 3 and 4 — primitive emission.
//!
//! Pass 3 re-scans the full stream with fresh transient state and emits the
//! non-field primitives: graphic boxes, unassociated inline text, and barcode
//! symbols (which consume their associated field numbers). Pass 4 then walks
//! the field-data map and emits a text primitive for every field that has
//! both data and a recorded template layout and was not consumed by a
//! barcode.
//!
//! Font resolution is deliberately lazy: a document without text primitives
//! never touches the font selector, so a bogus selector still converts an
//! empty label. The first text primitive resolves and registers the font;
//! failure there aborts the conversion.

use std::collections::{BTreeMap, BTreeSet};

use zpl_preview_diagnostics::{Diagnostic, codes};

use crate::barcode;
use crate::error::Result;
use crate::font;
use crate::grammar::command::{Command, ParsedCommand};
use crate::interpret::layout::FieldLayout;
use crate::interpret::state::{DrawState, apply_common};
use crate::svg::{Color, Primitive, SvgDocument};

/// Shorthand for building a `BTreeMap<String, String>` context from key-value pairs.
macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        std::collections::BTreeMap::from([$(($k.into(), $v.into())),+])
    };
}

/// Fixed font size of the barcode interpretation line.
const INTERPRETATION_FONT_SIZE: u32 = 20;
/// Fixed gap between the bottom of a barcode symbol and its interpretation line.
const INTERPRETATION_GAP: i32 = 10;

/// Font size in vector units for a given font height.
pub(crate) fn font_size(font_height: u32) -> u32 {
    (f64::from(font_height) * 0.6).round() as u32
}

/// Approximate advance width of one character at the given font size.
pub(crate) fn approx_char_width(size: u32) -> u32 {
    (f64::from(size) * 0.6).round() as u32
}

/// Run passes 3 and 4, pushing primitives into `doc`.
pub fn render(
    commands: &[ParsedCommand<'_>],
    fields: &BTreeMap<u32, String>,
    layouts: &BTreeMap<u32, FieldLayout>,
    font_selector: &str,
    doc: &mut SvgDocument,
    diags: &mut Vec<Diagnostic>,
) -> Result<()> {
    let mut renderer = Renderer {
        font_selector,
        font_family: None,
    };

    let consumed = renderer.render_commands(commands, fields, doc, diags)?;
    renderer.render_fields(fields, layouts, &consumed, doc, diags)?;
    Ok(())
}

struct Renderer<'a> {
    font_selector: &'a str,
    /// Registered family id, cached after the first text primitive.
    font_family: Option<String>,
}

impl Renderer<'_> {
    // ── Pass 3: command stream ──────────────────────────────────────────

    fn render_commands(
        &mut self,
        commands: &[ParsedCommand<'_>],
        fields: &BTreeMap<u32, String>,
        doc: &mut SvgDocument,
        diags: &mut Vec<Diagnostic>,
    ) -> Result<BTreeSet<u32>> {
        let mut state = DrawState::default();
        // Mirrors the pass-1 pending slot so field-bound data is not also
        // drawn as inline text.
        let mut pending: Option<u32> = None;
        let mut consumed = BTreeSet::new();

        for (i, pc) in commands.iter().enumerate() {
            match &pc.command {
                Command::FieldNumber(n) => pending = Some(*n),
                Command::FieldData(raw) => {
                    if pending.take().is_none() {
                        let text = raw.trim();
                        if !text.is_empty() {
                            self.emit_text(
                                doc,
                                state.x,
                                state.y,
                                state.font_height,
                                state.reverse,
                                text,
                            )?;
                            state.reverse = false;
                        }
                    }
                }
                Command::FieldSeparator => {}
                Command::GraphicBox {
                    width,
                    height,
                    thickness,
                } => {
                    pending = None;
                    emit_box(doc, &state, *width, *height, *thickness);
                }
                Command::Barcode { .. } => {
                    pending = None;
                    // Height and interpretation flag take effect before the
                    // symbol is drawn.
                    apply_common(&mut state, &pc.command);
                    self.draw_barcode(commands, i, &state, fields, &mut consumed, doc, diags)?;
                    continue;
                }
                _ => pending = None,
            }
            apply_common(&mut state, &pc.command);
        }
        Ok(consumed)
    }

    /// Associate a barcode symbol with the next field declaration and draw it.
    ///
    /// The lookahead tolerates intervening `FS` commands but stops at anything
    /// else: a barcode must immediately precede its field.
    fn draw_barcode(
        &mut self,
        commands: &[ParsedCommand<'_>],
        index: usize,
        state: &DrawState,
        fields: &BTreeMap<u32, String>,
        consumed: &mut BTreeSet<u32>,
        doc: &mut SvgDocument,
        diags: &mut Vec<Diagnostic>,
    ) -> Result<()> {
        let span = commands[index].span;
        let mut field = None;
        for pc in &commands[index + 1..] {
            match &pc.command {
                Command::FieldSeparator => {}
                Command::FieldNumber(n) => {
                    field = Some(*n);
                    break;
                }
                _ => break,
            }
        }

        let Some(n) = field else {
            diags.push(Diagnostic::info(
                codes::RENDER_BARCODE_NO_FIELD,
                "barcode symbol is not followed by a field declaration",
                Some(span),
            ));
            return Ok(());
        };

        consumed.insert(n);
        let data = fields.get(&n).map(String::as_str).unwrap_or_default();
        if data.is_empty() {
            diags.push(
                Diagnostic::info(
                    codes::RENDER_BARCODE_NO_DATA,
                    format!("barcode field {n} has no data"),
                    Some(span),
                )
                .with_context(ctx!("field" => n.to_string())),
            );
            return Ok(());
        }

        let symbol = barcode::encode(
            data,
            state.module_width,
            state.barcode_height,
            state.x,
            state.y,
        );
        let symbol_width = symbol.width;
        for bar in symbol.bars {
            doc.push(bar);
        }

        if state.interpretation {
            let size = INTERPRETATION_FONT_SIZE;
            let text_width = approx_char_width(size) as i32 * data.chars().count() as i32;
            let family = self.font_family(doc)?;
            doc.push(Primitive::Text {
                x: state.x + (symbol_width - text_width) / 2,
                y: state.y + state.barcode_height as i32 + INTERPRETATION_GAP,
                size,
                color: Color::Black,
                content: data.to_string(),
                font: family,
            });
        }
        Ok(())
    }

    // ── Pass 4: field map ───────────────────────────────────────────────

    fn render_fields(
        &mut self,
        fields: &BTreeMap<u32, String>,
        layouts: &BTreeMap<u32, FieldLayout>,
        consumed: &BTreeSet<u32>,
        doc: &mut SvgDocument,
        diags: &mut Vec<Diagnostic>,
    ) -> Result<()> {
        for (n, data) in fields {
            if data.is_empty() || consumed.contains(n) {
                continue;
            }
            let Some(layout) = layouts.get(n) else {
                diags.push(
                    Diagnostic::info(
                        codes::RENDER_FIELD_NO_LAYOUT,
                        format!("field {n} has data but no template layout"),
                        None,
                    )
                    .with_context(ctx!("field" => n.to_string())),
                );
                continue;
            };
            self.emit_text(
                doc,
                layout.x,
                layout.y,
                layout.font_height,
                layout.reverse,
                data,
            )?;
        }

        // Fields declared in the template but never bound to data.
        for n in layouts.keys() {
            if !fields.contains_key(n) {
                diags.push(
                    Diagnostic::info(
                        codes::RENDER_FIELD_NO_DATA,
                        format!("field {n} was declared but never bound to data"),
                        None,
                    )
                    .with_context(ctx!("field" => n.to_string())),
                );
            }
        }
        Ok(())
    }

    // ── Text emission (shared by passes 3 and 4) ────────────────────────

    fn emit_text(
        &mut self,
        doc: &mut SvgDocument,
        x: i32,
        y: i32,
        font_height: u32,
        reverse: bool,
        content: &str,
    ) -> Result<()> {
        let size = font_size(font_height);
        let family = self.font_family(doc)?;
        if reverse {
            let width = approx_char_width(size) as i32 * content.chars().count() as i32;
            doc.push(Primitive::Rect {
                x,
                y,
                width,
                height: font_height as i32,
                fill: Some(Color::Black),
                stroke: None,
                stroke_width: 0,
            });
            doc.push(Primitive::Text {
                x,
                y,
                size,
                color: Color::White,
                content: content.to_string(),
                font: family,
            });
        } else {
            doc.push(Primitive::Text {
                x,
                y,
                size,
                color: Color::Black,
                content: content.to_string(),
                font: family,
            });
        }
        Ok(())
    }

    fn font_family(&mut self, doc: &mut SvgDocument) -> Result<String> {
        if let Some(family) = &self.font_family {
            return Ok(family.clone());
        }
        let path = font::resolve(self.font_selector)?;
        let family = doc.register_font(&path)?;
        self.font_family = Some(family.clone());
        Ok(family)
    }
}

// ── Box classification ──────────────────────────────────────────────────

/// Draw a graphic box, classified from its parameters.
///
/// Filled when the thickness exceeds either dimension, line when it equals
/// one, border (outline only) otherwise. The reverse flag inverts the
/// black-on-white polarity; it is consumed by [`apply_common`] after this
/// returns, regardless of branch.
fn emit_box(doc: &mut SvgDocument, state: &DrawState, width: i32, height: i32, thickness: i32) {
    let stroke_width = thickness.max(0) as u32;
    let (fill, stroke, stroke_width) = if thickness > width || thickness > height {
        // Filled.
        if state.reverse {
            (Some(Color::White), Some(Color::Black), 1)
        } else {
            (Some(Color::Black), None, 0)
        }
    } else if thickness == width || thickness == height {
        // Line: a fill-only rectangle either way.
        if state.reverse {
            (Some(Color::White), None, 0)
        } else {
            (Some(Color::Black), None, 0)
        }
    } else {
        // Border: reverse needs an explicit white interior to read clearly.
        if state.reverse {
            (Some(Color::White), Some(Color::Black), stroke_width)
        } else {
            (None, Some(Color::Black), stroke_width)
        }
    };

    doc.push(Primitive::Rect {
        x: state.x,
        y: state.y,
        width,
        height,
        fill,
        stroke,
        stroke_width,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::command::parse_str;
    use crate::interpret::fields::extract_fields;
    use crate::interpret::layout::resolve_layouts;

    fn render_str(input: &str, selector: &str) -> (SvgDocument, Vec<Diagnostic>) {
        let parsed = parse_str(input);
        let fields = extract_fields(&parsed.commands);
        let layouts = resolve_layouts(&parsed.commands);
        let mut doc = SvgDocument::new(400, 400);
        let mut diags = Vec::new();
        render(
            &parsed.commands,
            &fields,
            &layouts,
            selector,
            &mut doc,
            &mut diags,
        )
        .unwrap();
        (doc, diags)
    }

    fn rects(doc: &SvgDocument) -> Vec<&Primitive> {
        doc.primitives()
            .iter()
            .filter(|p| matches!(p, Primitive::Rect { .. }))
            .collect()
    }

    #[test]
    fn box_equal_thickness_is_a_line() {
        let (doc, _) = render_str("^GB100,100,100", "unused");
        let [Primitive::Rect { fill, stroke, .. }] = rects(&doc).as_slice() else {
            panic!("expected one rect");
        };
        assert_eq!(*fill, Some(Color::Black));
        assert_eq!(*stroke, None);
    }

    #[test]
    fn box_oversized_thickness_is_filled() {
        let (doc, _) = render_str("^GB200,100,150", "unused");
        let [Primitive::Rect { fill, .. }] = rects(&doc).as_slice() else {
            panic!("expected one rect");
        };
        assert_eq!(*fill, Some(Color::Black));
    }

    #[test]
    fn box_small_thickness_is_border_only() {
        let (doc, _) = render_str("^GB200,100,10", "unused");
        let [
            Primitive::Rect {
                fill,
                stroke,
                stroke_width,
                ..
            },
        ] = rects(&doc).as_slice()
        else {
            panic!("expected one rect");
        };
        assert_eq!(*fill, None);
        assert_eq!(*stroke, Some(Color::Black));
        assert_eq!(*stroke_width, 10);
    }

    #[test]
    fn reversed_border_box_gets_white_interior() {
        let (doc, _) = render_str("^FR^GB200,100,10", "unused");
        let [Primitive::Rect { fill, stroke, .. }] = rects(&doc).as_slice() else {
            panic!("expected one rect");
        };
        assert_eq!(*fill, Some(Color::White));
        assert_eq!(*stroke, Some(Color::Black));
    }

    #[test]
    fn boxes_never_touch_the_font_path() {
        // A bogus selector is fine as long as no text is emitted.
        let (doc, _) = render_str("^FO5,5^GB50,50,3", "no-such-font");
        assert_eq!(doc.primitives().len(), 1);
    }

    #[test]
    fn barcode_without_field_is_skipped_with_info() {
        let (doc, diags) = render_str("^BC80,N^GB10,10,1", "unused");
        assert!(diags.iter().any(|d| d.id == codes::RENDER_BARCODE_NO_FIELD));
        // Only the box rendered.
        assert_eq!(rects(&doc).len(), 1);
    }

    #[test]
    fn barcode_without_data_is_skipped_with_info() {
        let (doc, diags) = render_str("^BC80,N^FN7^FS", "unused");
        assert!(diags.iter().any(|d| d.id == codes::RENDER_BARCODE_NO_DATA));
        assert!(doc.primitives().is_empty());
    }

    #[test]
    fn font_size_rounds_half_up() {
        assert_eq!(font_size(30), 18);
        assert_eq!(font_size(25), 15);
        assert_eq!(font_size(1), 1);
    }
}
