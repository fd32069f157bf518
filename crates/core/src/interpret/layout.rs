//! Pass 2 — template position resolution.
//!
//! Re-scans only the template section (commands preceding the first `XZ`,
//! or the whole stream when absent) and records, per field number, the
//! drawing context in force at the moment the field was declared. The
//! snapshot is frozen thereafter: first write wins, since the template
//! section is scanned independently of the data replay section.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::grammar::command::{Command, ParsedCommand};
use crate::interpret::state::{DrawState, apply_common};

/// The drawing context captured for one field declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldLayout {
    /// X origin at declaration time.
    pub x: i32,
    /// Y origin at declaration time.
    pub y: i32,
    /// Font height at declaration time.
    pub font_height: u32,
    /// Font width at declaration time.
    pub font_width: u32,
    /// Whether the field renders in reverse video.
    pub reverse: bool,
}

/// Resolve per-field layouts from the template section of the stream.
pub fn resolve_layouts(commands: &[ParsedCommand<'_>]) -> BTreeMap<u32, FieldLayout> {
    let template_end = commands
        .iter()
        .position(|pc| matches!(pc.command, Command::FinishTemplate))
        .unwrap_or(commands.len());

    let mut layouts = BTreeMap::new();
    let mut state = DrawState::default();

    for pc in &commands[..template_end] {
        if let Command::FieldNumber(n) = &pc.command {
            layouts.entry(*n).or_insert_with(|| FieldLayout {
                x: state.x,
                y: state.y,
                font_height: state.font_height,
                font_width: state.font_width,
                reverse: state.reverse,
            });
        }
        // Clears the one-shot reverse flag for FN and GB; see state.rs.
        apply_common(&mut state, &pc.command);
    }
    layouts
}
