use zpl_preview_diagnostics::Span;

/// Classification of a lexer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokKind {
    /// Content preceding the first control prefix (not part of any command).
    Preamble,
    /// A command chunk: everything between one control prefix and the next.
    Command,
}

/// A token that borrows its text directly from the source input — zero
/// allocation.
///
/// For `Command` tokens, `text` starts immediately after the control prefix
/// character and runs to the byte before the next prefix (or end of input).
/// `span` covers the prefix as well, so diagnostics underline the whole
/// command.
#[derive(Debug)]
pub struct Token<'a> {
    /// The classification of this token.
    pub kind: TokKind,
    /// Borrowed slice of the source input for this token (prefix excluded).
    pub text: &'a str,
    /// Source span including the prefix character.
    pub span: Span,
}

/// The control prefix introducing every command.
pub const CONTROL_PREFIX: char = '^';

/// Tokenize markup into a sequence of borrowed command chunks.
///
/// Every token's `text` field borrows directly from `input`, so the returned
/// `Vec<Token<'_>>` is valid for as long as `input` is alive. No heap
/// allocations are made for token text.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut toks = Vec::new();
    let prefix_len = CONTROL_PREFIX.len_utf8();

    let mut starts: Vec<usize> = input
        .match_indices(CONTROL_PREFIX)
        .map(|(i, _)| i)
        .collect();

    // Anything before the first prefix is preamble.
    let first = starts.first().copied().unwrap_or(input.len());
    if first > 0 {
        toks.push(Token {
            kind: TokKind::Preamble,
            text: &input[..first],
            span: Span::new(0, first),
        });
    }

    starts.push(input.len());
    for pair in starts.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        toks.push(Token {
            kind: TokKind::Command,
            text: &input[start + prefix_len..end],
            span: Span::new(start, end),
        });
    }
    toks
}
