//! Simplified linear barcode symbol encoder.
//!
//! Emits a Code-128-style bar/space sequence: a fixed start pattern, one
//! 11-module pattern per payload character, and a 13-module stop pattern.
//! The table covers exactly printable ASCII 32–90; characters outside that
//! range are skipped outright, so the symbol shortens rather than encoding a
//! placeholder. There is no checksum. Both behaviors diverge from standards
//! Code 128 and are preserved deliberately for output compatibility — do not
//! extend the table or add a check digit here.

use crate::svg::{Color, Primitive};

/// Start pattern (Code Set B start character).
pub const START_PATTERN: &str = "11010010000";

/// Stop pattern, one module wider than character patterns.
pub const STOP_PATTERN: &str = "1100011101011";

/// 11-module bar/space patterns indexed by `code_point - 32`,
/// covering ASCII 32 (space) through 90 (`Z`). `'1'` = bar, `'0'` = space.
pub const CHAR_PATTERNS: [&str; 59] = [
    "11011001100", // 32 ' '
    "11001101100", // 33 '!'
    "11001100110", // 34 '"'
    "10010011000", // 35 '#'
    "10010001100", // 36 '$'
    "10001001100", // 37 '%'
    "10011001000", // 38 '&'
    "10011000100", // 39 '\''
    "10001100100", // 40 '('
    "11001001000", // 41 ')'
    "11001000100", // 42 '*'
    "11000100100", // 43 '+'
    "10110011100", // 44 ','
    "10011011100", // 45 '-'
    "10011001110", // 46 '.'
    "10111001100", // 47 '/'
    "10011101100", // 48 '0'
    "10011100110", // 49 '1'
    "11001110010", // 50 '2'
    "11001011100", // 51 '3'
    "11001001110", // 52 '4'
    "11011100100", // 53 '5'
    "11001110100", // 54 '6'
    "11101101110", // 55 '7'
    "11101001100", // 56 '8'
    "11100101100", // 57 '9'
    "11100100110", // 58 ':'
    "11101100100", // 59 ';'
    "11100110100", // 60 '<'
    "11100110010", // 61 '='
    "11011011000", // 62 '>'
    "11011000110", // 63 '?'
    "11000110110", // 64 '@'
    "10100011000", // 65 'A'
    "10001011000", // 66 'B'
    "10001000110", // 67 'C'
    "10110001000", // 68 'D'
    "10001101000", // 69 'E'
    "10001100010", // 70 'F'
    "11010001000", // 71 'G'
    "11000101000", // 72 'H'
    "11000100010", // 73 'I'
    "10110111000", // 74 'J'
    "10110001110", // 75 'K'
    "10001101110", // 76 'L'
    "10111011000", // 77 'M'
    "10111000110", // 78 'N'
    "10001110110", // 79 'O'
    "11101110110", // 80 'P'
    "11010001110", // 81 'Q'
    "11000101110", // 82 'R'
    "11011101000", // 83 'S'
    "11011100010", // 84 'T'
    "11011101110", // 85 'U'
    "11101011000", // 86 'V'
    "11101000110", // 87 'W'
    "11100010110", // 88 'X'
    "11101101000", // 89 'Y'
    "11101100010", // 90 'Z'
];

/// A barcode symbol encoded as bar primitives.
#[derive(Debug)]
pub struct EncodedSymbol {
    /// The bar rectangles, left to right.
    pub bars: Vec<Primitive>,
    /// Total horizontal advance of the symbol in dots.
    pub width: i32,
}

/// Effective module width: the caller-specified width divided by 1.5 and
/// floored, but never below one dot (empirical scale correction).
pub fn effective_module_width(module_width: u32) -> i32 {
    ((f64::from(module_width) / 1.5).floor() as i32).max(1)
}

/// Look up the pattern for one payload character.
///
/// Returns `None` outside the covered 32–90 range.
pub fn char_pattern(ch: char) -> Option<&'static str> {
    let code = ch as u32;
    (32..=90)
        .contains(&code)
        .then(|| CHAR_PATTERNS[(code - 32) as usize])
}

/// The pattern sequence for a payload: start, per-character patterns with
/// out-of-range characters skipped, stop.
pub fn pattern_sequence(data: &str) -> Vec<&'static str> {
    let mut patterns = Vec::with_capacity(data.len() + 2);
    patterns.push(START_PATTERN);
    patterns.extend(data.chars().filter_map(char_pattern));
    patterns.push(STOP_PATTERN);
    patterns
}

/// Encode a payload into bar primitives at the given origin.
///
/// Pure function: walks each pattern left to right, advancing the cursor by
/// one effective module per pattern character and drawing a filled bar
/// rectangle of the symbol height wherever the character is `'1'`.
pub fn encode(data: &str, module_width: u32, height: u32, x: i32, y: i32) -> EncodedSymbol {
    let module = effective_module_width(module_width);
    let mut bars = Vec::new();
    let mut cursor = x;

    for pattern in pattern_sequence(data) {
        for bit in pattern.chars() {
            if bit == '1' {
                bars.push(Primitive::Rect {
                    x: cursor,
                    y,
                    width: module,
                    height: height as i32,
                    fill: Some(Color::Black),
                    stroke: None,
                    stroke_width: 0,
                });
            }
            cursor += module;
        }
    }

    EncodedSymbol {
        bars,
        width: cursor - x,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_exactly_printable_32_to_90() {
        assert_eq!(CHAR_PATTERNS.len(), 59);
        assert!(char_pattern(' ').is_some());
        assert!(char_pattern('Z').is_some());
        assert!(char_pattern('[').is_none()); // 91
        assert!(char_pattern('a').is_none());
        assert!(char_pattern('\u{1f}').is_none()); // 31
    }

    #[test]
    fn patterns_are_eleven_modules() {
        assert!(CHAR_PATTERNS.iter().all(|p| p.len() == 11));
        assert_eq!(START_PATTERN.len(), 11);
        assert_eq!(STOP_PATTERN.len(), 13);
    }

    #[test]
    fn symbol_width_is_length_accurate() {
        // "AB": start (11) + 2 × 11 + stop (13) = 46 modules.
        let symbol = encode("AB", 3, 80, 0, 0);
        let module = effective_module_width(3);
        assert_eq!(symbol.width, 46 * module);
    }

    #[test]
    fn out_of_range_characters_shorten_the_symbol() {
        let full = encode("AB", 2, 50, 0, 0);
        let shortened = encode("AaB", 2, 50, 0, 0); // 'a' is out of range
        assert_eq!(full.width, shortened.width);
        assert_eq!(full.bars.len(), shortened.bars.len());
    }

    #[test]
    fn empty_payload_is_start_plus_stop() {
        let symbol = encode("", 2, 50, 0, 0);
        assert_eq!(symbol.width, 24 * effective_module_width(2));
    }

    #[test]
    fn module_width_scale_correction() {
        assert_eq!(effective_module_width(1), 1); // 0.66 floors to 0, clamped
        assert_eq!(effective_module_width(2), 1);
        assert_eq!(effective_module_width(3), 2);
        assert_eq!(effective_module_width(6), 4);
    }

    #[test]
    fn bars_start_at_the_origin_and_use_the_height() {
        let symbol = encode("A", 3, 77, 10, 20);
        let Primitive::Rect { x, y, height, .. } = &symbol.bars[0] else {
            panic!("expected a rect");
        };
        assert_eq!((*x, *y), (10, 20));
        assert_eq!(*height, 77);
    }
}
