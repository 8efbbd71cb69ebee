//! File Header record (type 1).

use serde::{Deserialize, Serialize};

use crate::error::{AchError, Result};
use crate::field::{column, read_alpha, read_numeric, write_alpha, write_numeric};
use crate::record::{Record, prepare_line};

/// File Header record. Exactly one per file, always the first record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct FileHeader {
    pub priority_code: String,
    pub immediate_destination: String,
    pub immediate_origin: String,
    /// YYMMDD
    pub file_creation_date: String,
    /// HHMM
    pub file_creation_time: String,
    pub file_id_modifier: String,
    pub immediate_destination_name: String,
    pub immediate_origin_name: String,
    pub reference_code: String,
}

impl Default for FileHeader {
    fn default() -> Self {
        FileHeader {
            priority_code: "01".to_string(),
            immediate_destination: String::new(),
            immediate_origin: String::new(),
            file_creation_date: String::new(),
            file_creation_time: String::new(),
            file_id_modifier: "A".to_string(),
            immediate_destination_name: String::new(),
            immediate_origin_name: String::new(),
            reference_code: String::new(),
        }
    }
}

impl Record for FileHeader {
    const RECORD_TYPE: &'static str = "1";

    fn parse(line: &str, line_no: usize) -> Result<Self> {
        prepare_line(line, line_no)?;
        if &line[0..1] != Self::RECORD_TYPE {
            return Err(AchError::RecordType {
                found: line[0..1].to_string(),
                expected: Self::RECORD_TYPE.to_string(),
                line: line_no,
            });
        }
        let priority_code = column(line, 2, 3).to_string();
        if priority_code != "01" {
            return Err(AchError::file_format(
                line_no,
                format!("priorityCode must be 01, got {priority_code}"),
            ));
        }
        let record_size = column(line, 35, 37);
        if record_size != "094" {
            return Err(AchError::file_format(
                line_no,
                format!("recordSize must be 094, got {record_size}"),
            ));
        }
        let blocking_factor = column(line, 38, 39);
        if blocking_factor != "10" {
            return Err(AchError::file_format(
                line_no,
                format!("blockingFactor must be 10, got {blocking_factor}"),
            ));
        }
        let format_code = column(line, 40, 40);
        if format_code != "1" {
            return Err(AchError::file_format(
                line_no,
                format!("formatCode must be 1, got {format_code}"),
            ));
        }

        Ok(FileHeader {
            priority_code,
            immediate_destination: read_numeric(column(line, 4, 13)).to_string(),
            immediate_origin: read_numeric(column(line, 14, 23)).to_string(),
            file_creation_date: column(line, 24, 29).to_string(),
            file_creation_time: column(line, 30, 33).to_string(),
            file_id_modifier: column(line, 34, 34).to_string(),
            immediate_destination_name: read_alpha(column(line, 41, 63)).to_string(),
            immediate_origin_name: read_alpha(column(line, 64, 86)).to_string(),
            reference_code: read_alpha(column(line, 87, 94)).to_string(),
        })
    }

    fn to_line(&self) -> Result<String> {
        let mut out = String::with_capacity(94);
        out.push_str(Self::RECORD_TYPE);
        out.push_str("01");
        out.push_str(&write_numeric("immediateDestination", &self.immediate_destination, 10)?);
        out.push_str(&write_numeric("immediateOrigin", &self.immediate_origin, 10)?);
        out.push_str(&pad_exact(&self.file_creation_date, 6));
        out.push_str(&pad_exact(&self.file_creation_time, 4));
        out.push_str(&pad_exact(&self.file_id_modifier, 1));
        out.push_str("094");
        out.push_str("10");
        out.push('1');
        out.push_str(&write_alpha("immediateDestinationName", &self.immediate_destination_name, 23)?);
        out.push_str(&write_alpha("immediateOriginName", &self.immediate_origin_name, 23)?);
        out.push_str(&write_alpha("referenceCode", &self.reference_code, 8)?);
        Ok(out)
    }
}

/// Left-pads/truncates a fixed-shape field (dates, times, modifiers) that is
/// neither pure numeric nor freeform alpha.
fn pad_exact(value: &str, width: usize) -> String {
    if value.len() >= width {
        value[..width].to_string()
    } else {
        format!("{value:0>width$}")
    }
}

/// The header signature the flattener compares is computed at batch-header
/// granularity, not here; `FileHeader` carries no batch-number field.
impl FileHeader {
    pub fn blank() -> Self {
        FileHeader::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FileHeader {
        FileHeader {
            priority_code: "01".to_string(),
            immediate_destination: "123456789".to_string(),
            immediate_origin: "987654321".to_string(),
            file_creation_date: "230615".to_string(),
            file_creation_time: "1200".to_string(),
            file_id_modifier: "A".to_string(),
            immediate_destination_name: "Destination Bank".to_string(),
            immediate_origin_name: "Origin Bank".to_string(),
            reference_code: "".to_string(),
        }
    }

    #[test]
    fn round_trips() {
        let header = sample();
        let line = header.to_line().unwrap();
        assert_eq!(line.chars().count(), 94);
        let parsed = FileHeader::parse(&line, 1).unwrap();
        assert_eq!(parsed.immediate_destination, "123456789");
        assert_eq!(parsed.immediate_destination_name, "Destination Bank");
    }

    #[test]
    fn rejects_wrong_record_size() {
        let mut line = sample().to_line().unwrap();
        line.replace_range(34..37, "999");
        assert!(FileHeader::parse(&line, 1).is_err());
    }
}
