//! Error types for ACH file parsing, validation and serialization.
//!
//! All variants carry the offending field name and, where meaningful, the
//! value and the 1-based line number so a caller can point a user at the
//! exact record that failed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AchError>;

/// Errors produced while parsing, validating or flattening an ACH file.
#[derive(Debug, Error, Clone, Serialize, Deserialize, PartialEq)]
pub enum AchError {
    #[error("file format error at line {line}: {message}")]
    FileFormat { line: usize, message: String },

    #[error("invalid character set in field {field} (value: {value:?})")]
    InvalidCharacterSet { field: String, value: String },

    #[error("required field {field} is empty")]
    FieldInclusion { field: String },

    #[error("{field} mismatch: stored {stored}, computed {computed}")]
    ValidateOpts {
        field: String,
        stored: String,
        computed: String,
    },

    #[error("unexpected record type {found} at line {line}, expected {expected}")]
    RecordType {
        found: String,
        expected: String,
        line: usize,
    },

    #[error("invalid addenda type code {found} for {expected} addenda")]
    AddendaTypeCode { found: String, expected: String },

    #[error("unrecognized change code {code}")]
    ChangeCode { code: String },

    #[error("unrecognized return code {code}")]
    ReturnCode { code: String },

    #[error("corrected data is required on Addenda98")]
    CorrectedData,

    #[error("invalid service class code {code} for {context}")]
    ServiceClass { code: String, context: String },

    #[error("transaction code {code} not permitted for SEC {sec}")]
    TransactionCode { code: String, sec: String },

    #[error("unsupported or invalid SEC code {code}")]
    SECCode { code: String },

    #[error("flatten changed file totals: {field} was {before}, became {after}")]
    FlattenChangedCounts {
        field: String,
        before: String,
        after: String,
    },

    #[error("batch {index} validation failed: {source}")]
    BatchValidation {
        index: usize,
        #[source]
        source: Box<AchError>,
    },
}

impl AchError {
    pub fn file_format(line: usize, message: impl Into<String>) -> Self {
        AchError::FileFormat {
            line,
            message: message.into(),
        }
    }

    pub fn invalid_character_set(field: impl Into<String>, value: impl Into<String>) -> Self {
        AchError::InvalidCharacterSet {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn field_inclusion(field: impl Into<String>) -> Self {
        AchError::FieldInclusion {
            field: field.into(),
        }
    }

    pub fn validate_opts(
        field: impl Into<String>,
        stored: impl ToString,
        computed: impl ToString,
    ) -> Self {
        AchError::ValidateOpts {
            field: field.into(),
            stored: stored.to_string(),
            computed: computed.to_string(),
        }
    }

    pub fn in_batch(self, index: usize) -> Self {
        AchError::BatchValidation {
            index,
            source: Box::new(self),
        }
    }
}
