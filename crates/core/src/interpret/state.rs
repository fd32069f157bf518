//! Transient drawing state shared by the interpreter passes.
//!
//! The command stream is order-dependent: font, position, reverse-video, and
//! barcode settings accumulate while scanning. Both the layout pass and the
//! render pass thread a [`DrawState`] through [`apply_common`], the single
//! source of truth for the pass-independent transitions; each pass layers its
//! own action (snapshot vs. draw) on top before calling it.

use serde::Serialize;

use crate::grammar::command::Command;

/// Transient drawing state, re-derived from defaults by every pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawState {
    /// Current X origin in dots.
    pub x: i32,
    /// Current Y origin in dots.
    pub y: i32,
    /// Current font height in dots.
    pub font_height: u32,
    /// Current font width in dots.
    pub font_width: u32,
    /// One-shot reverse-video flag for the next field or box.
    pub reverse: bool,
    /// Barcode module width in dots.
    pub module_width: u32,
    /// Barcode symbol height in dots.
    pub barcode_height: u32,
    /// Whether the barcode interpretation line is shown.
    pub interpretation: bool,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            font_height: 30,
            font_width: 30,
            reverse: false,
            // ZPL module-width and bar-height defaults.
            module_width: 2,
            barcode_height: 10,
            interpretation: true,
        }
    }
}

/// Apply the pass-independent state transition for one command.
///
/// Covers every transition both scanning passes agree on:
/// - `CF` updates font metrics (absent arguments keep current values);
/// - `FO` moves the origin and cancels a stale reverse flag;
/// - `FR` arms the reverse flag; `FS` disarms it;
/// - `FN` and `GB` consume the reverse flag (one-shot semantics — reverse
///   applies to at most one following field or box);
/// - `BY` and `BC` update the barcode settings.
///
/// Returns `true` when the command affected the state. Pass-specific work
/// that reads the state (layout snapshots, box/text/barcode emission) must
/// run *before* this function clears the flags it depends on.
pub fn apply_common(state: &mut DrawState, cmd: &Command<'_>) -> bool {
    match cmd {
        Command::Font { height, width } => {
            if let Some(h) = height {
                state.font_height = *h;
            }
            if let Some(w) = width {
                state.font_width = *w;
            }
            true
        }
        Command::Position { x, y } => {
            state.x = *x;
            state.y = *y;
            state.reverse = false;
            true
        }
        Command::FieldReverse => {
            state.reverse = true;
            true
        }
        Command::FieldSeparator | Command::FieldNumber(_) | Command::GraphicBox { .. } => {
            state.reverse = false;
            true
        }
        Command::BarcodeWidth(width) => {
            if let Some(w) = width {
                state.module_width = *w;
            }
            true
        }
        Command::Barcode {
            height,
            interpretation,
        } => {
            if let Some(h) = height {
                state.barcode_height = *h;
            }
            if let Some(flag) = interpretation {
                state.interpretation = !flag.eq_ignore_ascii_case("n");
            }
            true
        }
        Command::FieldData(_) | Command::FinishTemplate | Command::Unknown(_) => false,
    }
}
