//! The four interpreter passes over the parsed command stream.
//!
//! 1. [`fields::extract_fields`] — field-number → data bindings.
//! 2. [`layout::resolve_layouts`] — per-field drawing context from the
//!    template section.
//! 3. [`render::render`] (first half) — boxes, inline text, and barcode
//!    symbols from the full stream.
//! 4. [`render::render`] (second half) — text primitives for the remaining
//!    fields.

/// Pass 1: field data extraction.
pub mod fields;
/// Pass 2: template position resolution.
pub mod layout;
/// Passes 3 and 4: primitive emission.
pub mod render;
/// Transient drawing state and the shared transition function.
pub mod state;
