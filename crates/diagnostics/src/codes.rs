//! Diagnostic ID constants.
//!
//! Use these instead of string literals to get compile-time typo detection
//! and IDE autocomplete. IDs are stable across releases; renderers and
//! tooling may key behavior off them.

/// An unrecognized command keyword was skipped.
pub const PARSE_UNKNOWN_COMMAND: &str = "LBL1001";

/// Content appeared before the first command prefix and was ignored.
pub const PARSE_STRAY_CONTENT: &str = "LBL1002";

/// The input contained no commands at all.
pub const PARSE_EMPTY_INPUT: &str = "LBL1003";

/// A command argument failed to parse; a default was substituted.
pub const PARSE_BAD_ARGUMENT: &str = "LBL1004";

/// A declared field had no data bound to it and was skipped.
pub const RENDER_FIELD_NO_DATA: &str = "LBL2001";

/// A field had data but no recorded template layout and was skipped.
pub const RENDER_FIELD_NO_LAYOUT: &str = "LBL2002";

/// A barcode symbol referenced a field with no backing data.
pub const RENDER_BARCODE_NO_DATA: &str = "LBL2003";

/// A barcode symbol command was not followed by a field declaration.
pub const RENDER_BARCODE_NO_FIELD: &str = "LBL2004";

/// Returns the human-readable explanation for a diagnostic code, if known.
pub fn explain(id: &str) -> Option<&'static str> {
    match id {
        PARSE_UNKNOWN_COMMAND => Some(
            "The command keyword after the ^ prefix is not part of the supported \
             subset (CF, FO, FN, FD, FR, FS, GB, BY, BC, XZ). The command was \
             skipped and rendering continued.",
        ),
        PARSE_STRAY_CONTENT => Some(
            "Text before the first ^ prefix is not associated with any command \
             and does not render. Field text must follow a ^FD command.",
        ),
        PARSE_EMPTY_INPUT => Some(
            "The input contained no commands. The output is a blank document at \
             the requested size.",
        ),
        PARSE_BAD_ARGUMENT => Some(
            "A numeric command argument did not parse. The command's default \
             value was used instead.",
        ),
        RENDER_FIELD_NO_DATA => Some(
            "A ^FN declaration was never followed by a ^FD binding, so the field \
             produced no output.",
        ),
        RENDER_FIELD_NO_LAYOUT => Some(
            "Data was bound to a field number that never appeared in the template \
             section, so no position or font is known for it.",
        ),
        RENDER_BARCODE_NO_DATA => Some(
            "A ^BC symbol was associated with a field number that has no data; \
             no bars were drawn.",
        ),
        RENDER_BARCODE_NO_FIELD => Some(
            "A ^BC command must be immediately followed by the ^FN declaration it \
             encodes (only ^FS may intervene).",
        ),
        _ => None,
    }
}
