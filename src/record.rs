//! Record classification and the shared [`Record`] trait (C2).
//!
//! Records are classified by the leading digit of their 94-character line.
//! Every concrete record type (file header, batch header, entry detail, ...)
//! implements [`Record`] the same way the teacher's field types implement
//! `SwiftField`: one `parse` and one serialization method, nothing more.

use crate::error::{AchError, Result};
use crate::field::validate_width;

/// The leading-digit classification of a 94-character ACH line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    FileHeader,
    BatchHeader,
    EntryDetail,
    Addenda,
    BatchControl,
    FileControlOrFiller,
}

impl RecordKind {
    /// Classifies a line by its first character. Fails with
    /// [`AchError::RecordType`] on an unrecognized leading digit.
    pub fn classify(line: &str, line_no: usize) -> Result<Self> {
        let first = line.chars().next().ok_or_else(|| {
            AchError::file_format(line_no, "empty record".to_string())
        })?;
        match first {
            '1' => Ok(RecordKind::FileHeader),
            '5' => Ok(RecordKind::BatchHeader),
            '6' => Ok(RecordKind::EntryDetail),
            '7' => Ok(RecordKind::Addenda),
            '8' => Ok(RecordKind::BatchControl),
            '9' => Ok(RecordKind::FileControlOrFiller),
            other => Err(AchError::RecordType {
                found: other.to_string(),
                expected: "1, 5, 6, 7, 8 or 9".to_string(),
                line: line_no,
            }),
        }
    }
}

/// Shared parse/serialize contract for every fixed-width record type.
pub trait Record: Sized {
    /// Record type constant, e.g. `"1"` for the file header.
    const RECORD_TYPE: &'static str;

    /// Parses a single validated 94-character line into this record.
    fn parse(line: &str, line_no: usize) -> Result<Self>;

    /// Serializes this record back into its 94-character line. Fails with
    /// [`AchError::InvalidCharacterSet`] if a field can't be rendered into
    /// its column width instead of silently corrupting the line.
    fn to_line(&self) -> Result<String>;
}

/// Validates overall line shape (width, non-empty) before a caller attempts
/// [`Record::parse`]. Record-specific parsers call this first.
pub fn prepare_line(line: &str, line_no: usize) -> Result<()> {
    validate_width(line, line_no)
}

/// True when `line` is an all-`'9'` filler line padding the file to the
/// blocking factor.
pub fn is_filler(line: &str) -> bool {
    line.chars().all(|c| c == '9')
}
