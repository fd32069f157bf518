//! Typed command parsing.
//!
//! Each lexer chunk is matched case-sensitively by keyword prefix into a
//! closed [`Command`] enum. Unrecognized chunks are preserved as
//! [`Command::Unknown`] so the interpreter passes can still apply their
//! pending-field-clearing semantics to them; a warning diagnostic is
//! recorded and parsing continues.

use serde::Serialize;
use zpl_preview_diagnostics::{Diagnostic, Span, codes};

use super::lexer::{TokKind, tokenize};

/// Shorthand for building a `BTreeMap<String, String>` context from key-value pairs.
macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        std::collections::BTreeMap::from([$(($k.into(), $v.into())),+])
    };
}

/// A single command from the markup subset.
///
/// Numeric arguments that fail to parse are carried as `None` (the
/// interpreter keeps its current state value) except where a documented
/// default exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "args", rename_all = "snake_case")]
pub enum Command<'a> {
    /// `CF` — set current font metrics (height, width).
    Font {
        /// Font height; `None` keeps the current value.
        height: Option<u32>,
        /// Font width; `None` keeps the current value.
        width: Option<u32>,
    },
    /// `FO` — set the current drawing origin. Missing coordinates are 0.
    Position {
        /// X coordinate in dots.
        x: i32,
        /// Y coordinate in dots.
        y: i32,
    },
    /// `FN` — declare a field number.
    FieldNumber(u32),
    /// `FD` — field data payload (raw, untrimmed chunk remainder).
    FieldData(&'a str),
    /// `FR` — reverse-video flag for the next field or box.
    FieldReverse,
    /// `FS` — end of field.
    FieldSeparator,
    /// `GB` — graphic box (width, height, border thickness).
    GraphicBox {
        /// Box width in dots.
        width: i32,
        /// Box height in dots.
        height: i32,
        /// Border thickness in dots (defaults to 1).
        thickness: i32,
    },
    /// `BY` — barcode module width.
    BarcodeWidth(Option<u32>),
    /// `BC` — barcode symbol (height, interpretation-line flag).
    Barcode {
        /// Bar height; `None` keeps the current value.
        height: Option<u32>,
        /// Interpretation-line flag; anything but `N`/`n` shows the line.
        interpretation: Option<&'a str>,
    },
    /// `XZ` — end of the template section.
    FinishTemplate,
    /// Any unrecognized chunk, kept verbatim.
    Unknown(&'a str),
}

/// A parsed command together with its source span.
#[derive(Debug, Serialize)]
pub struct ParsedCommand<'a> {
    /// The typed command.
    #[serde(flatten)]
    pub command: Command<'a>,
    /// Source span including the control prefix.
    pub span: Span,
}

/// Result of parsing a markup input string.
#[derive(Debug, Serialize)]
pub struct ParseResult<'a> {
    /// The parsed command stream, in source order.
    pub commands: Vec<ParsedCommand<'a>>,
    /// Diagnostics (warnings, info) produced during parsing.
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse a markup input string into a typed command stream.
///
/// Never fails: malformed chunks become [`Command::Unknown`] with a warning
/// diagnostic, and an empty input produces an empty stream with an info
/// diagnostic.
pub fn parse_str(input: &str) -> ParseResult<'_> {
    let mut commands = Vec::new();
    let mut diagnostics = Vec::new();

    for tok in tokenize(input) {
        match tok.kind {
            TokKind::Preamble => {
                if !tok.text.trim().is_empty() {
                    diagnostics.push(Diagnostic::warn(
                        codes::PARSE_STRAY_CONTENT,
                        "content before the first command prefix is ignored",
                        Some(tok.span),
                    ));
                }
            }
            TokKind::Command => {
                commands.push(ParsedCommand {
                    command: parse_chunk(tok.text, tok.span, &mut diagnostics),
                    span: tok.span,
                });
            }
        }
    }

    if commands.is_empty() {
        diagnostics.push(Diagnostic::info(
            codes::PARSE_EMPTY_INPUT,
            "no commands detected",
            Some(Span::empty(0)),
        ));
    }

    ParseResult {
        commands,
        diagnostics,
    }
}

// ── Chunk parsing ───────────────────────────────────────────────────────

fn parse_chunk<'a>(chunk: &'a str, span: Span, diags: &mut Vec<Diagnostic>) -> Command<'a> {
    if let Some(rest) = chunk.strip_prefix("CF") {
        let args = split_args(rest);
        return Command::Font {
            height: parse_u32(&args, 0),
            width: parse_u32(&args, 1),
        };
    }
    if let Some(rest) = chunk.strip_prefix("FO") {
        let args = split_args(rest);
        return Command::Position {
            x: parse_i32(&args, 0).unwrap_or(0),
            y: parse_i32(&args, 1).unwrap_or(0),
        };
    }
    if let Some(rest) = chunk.strip_prefix("FN") {
        return match rest.trim().parse::<u32>() {
            Ok(n) => Command::FieldNumber(n),
            Err(_) => {
                diags.push(
                    Diagnostic::warn(
                        codes::PARSE_BAD_ARGUMENT,
                        format!("field number `{}` is not a positive integer", rest.trim()),
                        Some(span),
                    )
                    .with_context(ctx!("command" => "FN", "value" => rest.trim())),
                );
                Command::Unknown(chunk)
            }
        };
    }
    if let Some(rest) = chunk.strip_prefix("FD") {
        return Command::FieldData(rest);
    }
    if chunk.starts_with("FR") {
        return Command::FieldReverse;
    }
    if chunk.starts_with("FS") {
        return Command::FieldSeparator;
    }
    if let Some(rest) = chunk.strip_prefix("GB") {
        let args = split_args(rest);
        return Command::GraphicBox {
            width: parse_i32(&args, 0).unwrap_or(0),
            height: parse_i32(&args, 1).unwrap_or(0),
            // ZPL draws a hairline border when the thickness is omitted.
            thickness: parse_i32(&args, 2).unwrap_or(1),
        };
    }
    if let Some(rest) = chunk.strip_prefix("BY") {
        let args = split_args(rest);
        return Command::BarcodeWidth(parse_u32(&args, 0));
    }
    if let Some(rest) = chunk.strip_prefix("BC") {
        let args = split_args(rest);
        return Command::Barcode {
            height: parse_u32(&args, 0),
            interpretation: args.get(1).copied().filter(|s| !s.is_empty()),
        };
    }
    if chunk.starts_with("XZ") {
        return Command::FinishTemplate;
    }

    let code: String = chunk.chars().take(2).collect();
    diags.push(
        Diagnostic::warn(
            codes::PARSE_UNKNOWN_COMMAND,
            if code.is_empty() {
                "missing command code after prefix".to_string()
            } else {
                format!("unknown command {code}")
            },
            Some(span),
        )
        .with_context(ctx!("command" => code)),
    );
    Command::Unknown(chunk)
}

/// Split a command's argument remainder on commas, trimming each part.
fn split_args(rest: &str) -> Vec<&str> {
    if rest.trim().is_empty() {
        return Vec::new();
    }
    rest.split(',').map(str::trim).collect()
}

fn parse_u32(args: &[&str], idx: usize) -> Option<u32> {
    args.get(idx).and_then(|s| s.parse::<u32>().ok())
}

fn parse_i32(args: &[&str], idx: usize) -> Option<i32> {
    args.get(idx).and_then(|s| s.parse::<i32>().ok())
}
