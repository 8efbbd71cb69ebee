//! Fixed-width field codec (C1).
//!
//! Two primitives: a numeric field (right-aligned, zero-padded) and an
//! alpha field (left-aligned, space-padded). Both validate the NACHA
//! character set on write and never panic on malformed input — every
//! failure mode returns [`AchError`].

use crate::error::{AchError, Result};

/// Printable-ASCII, no-control-character alphabet used by standard (non-IAT)
/// records. IAT records allow a broader set (see [`is_iat_alnum`]).
fn is_ach_alnum(c: char) -> bool {
    c.is_ascii() && !c.is_ascii_control()
}

/// IAT records accept a broader character set (extended Latin punctuation
/// used for foreign names and addresses) in addition to printable ASCII.
pub fn is_iat_alnum(c: char) -> bool {
    is_ach_alnum(c) || (!c.is_control() && c as u32 <= 0x24F)
}

/// Reads a right-aligned numeric field, trimming leading zeros. Returns the
/// digits verbatim (as a string) so callers can choose their own integer
/// width when parsing.
pub fn read_numeric(raw: &str) -> &str {
    let trimmed = raw.trim_start_matches('0');
    if trimmed.is_empty() { "0" } else { trimmed }
}

/// Writes a numeric value right-aligned and zero-padded to `width`.
/// `value` must already be composed of ASCII digits.
pub fn write_numeric(field: &str, value: &str, width: usize) -> Result<String> {
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(AchError::invalid_character_set(field, value));
    }
    if value.len() > width {
        return Err(AchError::invalid_character_set(field, value));
    }
    Ok(format!("{value:0>width$}"))
}

/// Writes an unsigned integer right-aligned and zero-padded to `width`,
/// truncating to the field's capacity per spec (e.g. entry hashes are
/// stored mod 10^width).
pub fn write_numeric_u64(value: u64, width: usize) -> String {
    let modulus = 10u64.saturating_pow(width as u32);
    let truncated = if modulus == 0 { value } else { value % modulus };
    format!("{truncated:0>width$}")
}

/// Reads an alpha field, right-trimming spaces.
pub fn read_alpha(raw: &str) -> &str {
    raw.trim_end_matches(' ')
}

/// Writes an alpha value left-aligned and space-padded to `width`,
/// validating the NACHA character set.
pub fn write_alpha(field: &str, value: &str, width: usize) -> Result<String> {
    write_alpha_with(field, value, width, is_ach_alnum)
}

/// Same as [`write_alpha`] but with a caller-supplied character predicate,
/// used by IAT records which permit a broader alphabet.
pub fn write_alpha_with(
    field: &str,
    value: &str,
    width: usize,
    allowed: impl Fn(char) -> bool,
) -> Result<String> {
    if value.chars().count() > width {
        return Err(AchError::invalid_character_set(field, value));
    }
    if !value.chars().all(&allowed) {
        return Err(AchError::invalid_character_set(field, value));
    }
    let pad = width - value.chars().count();
    Ok(format!("{value}{}", " ".repeat(pad)))
}

/// Extracts a 1-based inclusive column range from a 94-character line.
/// `start`/`end` are 1-indexed, matching the spec's column tables.
pub fn column(line: &str, start: usize, end: usize) -> &str {
    let chars: Vec<char> = line_chars(line);
    debug_assert!(end <= chars.len());
    &line[char_byte_offset(line, start - 1)..char_byte_offset(line, end)]
}

fn line_chars(line: &str) -> Vec<char> {
    line.chars().collect()
}

fn char_byte_offset(line: &str, char_index: usize) -> usize {
    line.char_indices()
        .nth(char_index)
        .map(|(b, _)| b)
        .unwrap_or(line.len())
}

/// The fixed line width of every ACH record, in Unicode code points.
pub const RECORD_WIDTH: usize = 94;

/// Validates that `line` is exactly [`RECORD_WIDTH`] code points.
pub fn validate_width(line: &str, line_no: usize) -> Result<()> {
    let len = line.chars().count();
    if len != RECORD_WIDTH {
        return Err(AchError::file_format(
            line_no,
            format!("record is {len} characters, expected {RECORD_WIDTH}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_round_trip() {
        let written = write_numeric("amount", "1500", 10).unwrap();
        assert_eq!(written, "0000001500");
        assert_eq!(read_numeric(&written), "1500");
    }

    #[test]
    fn numeric_rejects_non_digits() {
        assert!(write_numeric("amount", "15a0", 10).is_err());
    }

    #[test]
    fn alpha_round_trip() {
        let written = write_alpha("companyName", "Acme Corp", 16).unwrap();
        assert_eq!(written, "Acme Corp       ");
        assert_eq!(read_alpha(&written), "Acme Corp");
    }

    #[test]
    fn alpha_rejects_control_chars() {
        assert!(write_alpha("companyName", "Acme\u{0007}Corp", 16).is_err());
    }

    #[test]
    fn alpha_rejects_overflow() {
        assert!(write_alpha("companyName", "this name is far too long", 10).is_err());
    }

    #[test]
    fn column_extracts_1_indexed_inclusive_range() {
        let line = "1234567890";
        assert_eq!(column(line, 1, 3), "123");
        assert_eq!(column(line, 4, 4), "4");
    }

    #[test]
    fn width_validation_reports_line_number() {
        let err = validate_width("short", 7).unwrap_err();
        match err {
            AchError::FileFormat { line, .. } => assert_eq!(line, 7),
            _ => panic!("expected FileFormat"),
        }
    }

    #[test]
    fn write_numeric_u64_truncates_to_width() {
        assert_eq!(write_numeric_u64(12_345_678_901, 10), "2345678901");
    }
}
