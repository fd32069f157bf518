//! Markup grammar: lexer, typed command parser, and serialization helpers.

/// Typed command parsing over lexer chunks.
pub mod command;
/// JSON serialization helpers.
pub mod dump;
/// Prefix-splitting lexer producing borrowed tokens.
pub mod lexer;
