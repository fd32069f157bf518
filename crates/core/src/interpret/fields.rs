//! Pass 1 — field data extraction.
//!
//! Builds the field-number → data-payload map from the full command stream.
//! A single pending-slot walk supports both legal input shapes:
//!
//! - inline: `^FN1^FDdata^FS`
//! - template/data-separated: `^FN1^FS … ^XZ … ^FN1^FDdata^FS`
//!
//! `FS` preserves the pending association; any command that is neither `FS`
//! nor `FD` abandons it. Re-binding a field number overwrites (last write
//! wins).

use std::collections::BTreeMap;

use crate::grammar::command::{Command, ParsedCommand};

/// Extract the field-number → data map from the full command stream.
pub fn extract_fields(commands: &[ParsedCommand<'_>]) -> BTreeMap<u32, String> {
    let mut fields = BTreeMap::new();
    let mut pending: Option<u32> = None;

    for pc in commands {
        match &pc.command {
            Command::FieldNumber(n) => pending = Some(*n),
            Command::FieldData(raw) => {
                if let Some(n) = pending.take() {
                    fields.insert(n, raw.trim().to_string());
                }
            }
            // End-of-field does not reset the pending association.
            Command::FieldSeparator => {}
            _ => pending = None,
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::command::parse_str;

    fn fields_of(input: &str) -> BTreeMap<u32, String> {
        extract_fields(&parse_str(input).commands)
    }

    #[test]
    fn inline_shape_binds() {
        let fields = fields_of("^FN1^FDHello^FS");
        assert_eq!(fields.get(&1).map(String::as_str), Some("Hello"));
    }

    #[test]
    fn separated_shape_binds_identically() {
        let inline = fields_of("^FN1^FDX^FS");
        let separated = fields_of("^FO10,10^FN1^FS^XZ^FN1^FDX^FS");
        assert_eq!(inline.get(&1), separated.get(&1));
    }

    #[test]
    fn unrelated_command_abandons_pending() {
        let fields = fields_of("^FN1^FO10,10^FDorphan^FS");
        assert!(fields.is_empty());
    }

    #[test]
    fn separator_preserves_pending() {
        let fields = fields_of("^FN3^FS^FDlate^FS");
        assert_eq!(fields.get(&3).map(String::as_str), Some("late"));
    }

    #[test]
    fn rebinding_overwrites() {
        let fields = fields_of("^FN1^FDfirst^FS^FN1^FDsecond^FS");
        assert_eq!(fields.get(&1).map(String::as_str), Some("second"));
    }

    #[test]
    fn data_is_trimmed() {
        let fields = fields_of("^FN1^FD  padded  ^FS");
        assert_eq!(fields.get(&1).map(String::as_str), Some("padded"));
    }
}
