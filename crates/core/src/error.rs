//! Conversion errors.
//!
//! Only font failures abort a conversion: without a readable font file no
//! text can be rendered. Everything else (malformed commands, unbound
//! fields, unknown keywords) degrades to diagnostics and the conversion
//! continues.

use std::path::PathBuf;

/// Fatal errors produced while converting markup to a vector document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The font selector matched neither a preset nor an existing `.ttf` path.
    #[error("font selector `{0}` does not name a preset or an existing .ttf file")]
    FontNotFound(String),

    /// A resolved font file could not be read at draw time.
    #[error("failed to read font file `{path}`")]
    FontRead {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
