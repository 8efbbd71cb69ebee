//! JSON surface (spec.md §6): every record type already derives
//! `serde::{Serialize, Deserialize}` in camelCase, so this module is a thin
//! set of entry points plus the one cross-cutting option (pretty-printing)
//! callers actually reach for — mirroring the small `ToJson`/`FromJson`
//! convenience wrappers the teacher layers on top of serde_json rather than
//! hand-rolling field-by-field conversion.

use serde::{Deserialize, Serialize};

use crate::error::{AchError, Result};
use crate::file::File;

/// Options controlling [`to_json`]'s output shape.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct JsonConversionOptions {
    pub pretty: bool,
}

/// Serializes a parsed [`File`] to JSON.
pub fn to_json(file: &File, options: JsonConversionOptions) -> Result<String> {
    let result = if options.pretty {
        serde_json::to_string_pretty(file)
    } else {
        serde_json::to_string(file)
    };
    result.map_err(|e| AchError::file_format(0, format!("failed to serialize to JSON: {e}")))
}

/// Parses a [`File`] back out of JSON produced by [`to_json`].
pub fn from_json(text: &str) -> Result<File> {
    serde_json::from_str(text).map_err(|e| AchError::file_format(0, format!("failed to parse JSON: {e}")))
}

#[cfg(feature = "jsonschema")]
pub fn schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(File)
}
