//! Batch Header record (type 5).

use serde::{Deserialize, Serialize};

use crate::error::{AchError, Result};
use crate::field::{column, read_alpha, read_numeric, write_alpha, write_numeric};
use crate::record::{Record, prepare_line};

/// Batch Header record. Opens a batch and carries the Standard Entry Class
/// code the file assembler uses to select a batch variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct BatchHeader {
    pub service_class_code: String,
    pub company_name: String,
    pub company_discretionary_data: String,
    pub company_identification: String,
    pub standard_entry_class_code: String,
    pub company_entry_description: String,
    pub company_descriptive_date: String,
    /// YYMMDD
    pub effective_entry_date: String,
    pub settlement_date: String,
    pub originator_status_code: String,
    pub originating_dfi_identification: String,
    pub batch_number: u32,
}

impl Record for BatchHeader {
    const RECORD_TYPE: &'static str = "5";

    fn parse(line: &str, line_no: usize) -> Result<Self> {
        prepare_line(line, line_no)?;
        if &line[0..1] != Self::RECORD_TYPE {
            return Err(AchError::RecordType {
                found: line[0..1].to_string(),
                expected: Self::RECORD_TYPE.to_string(),
                line: line_no,
            });
        }
        let batch_number: u32 = read_numeric(column(line, 88, 94))
            .parse()
            .map_err(|_| AchError::file_format(line_no, "invalid batchNumber"))?;

        Ok(BatchHeader {
            service_class_code: column(line, 2, 4).to_string(),
            company_name: read_alpha(column(line, 5, 20)).to_string(),
            company_discretionary_data: read_alpha(column(line, 21, 40)).to_string(),
            company_identification: column(line, 41, 50).to_string(),
            standard_entry_class_code: column(line, 51, 53).to_string(),
            company_entry_description: read_alpha(column(line, 54, 63)).to_string(),
            company_descriptive_date: column(line, 64, 69).to_string(),
            effective_entry_date: column(line, 70, 75).to_string(),
            settlement_date: column(line, 76, 78).to_string(),
            originator_status_code: column(line, 79, 79).to_string(),
            originating_dfi_identification: read_numeric(column(line, 80, 87)).to_string(),
            batch_number,
        })
    }

    fn to_line(&self) -> Result<String> {
        let mut out = String::with_capacity(94);
        out.push_str(Self::RECORD_TYPE);
        out.push_str(&pad_left_space(&self.service_class_code, 3));
        out.push_str(&write_alpha("companyName", &self.company_name, 16)?);
        out.push_str(&write_alpha("companyDiscretionaryData", &self.company_discretionary_data, 20)?);
        out.push_str(&pad_right_space(&self.company_identification, 10));
        out.push_str(&pad_right_space(&self.standard_entry_class_code, 3));
        out.push_str(&write_alpha("companyEntryDescription", &self.company_entry_description, 10)?);
        out.push_str(&pad_right_space(&self.company_descriptive_date, 6));
        out.push_str(&pad_right_space(&self.effective_entry_date, 6));
        out.push_str(&pad_right_space(&self.settlement_date, 3));
        out.push_str(&pad_right_space(&self.originator_status_code, 1));
        out.push_str(&write_numeric(
            "originatingDfiIdentification",
            &self.originating_dfi_identification,
            8,
        )?);
        out.push_str(&write_numeric("batchNumber", &self.batch_number.to_string(), 7)?);
        Ok(out)
    }
}

fn pad_left_space(value: &str, width: usize) -> String {
    if value.len() >= width {
        value[..width].to_string()
    } else {
        format!("{value:>width$}")
    }
}

fn pad_right_space(value: &str, width: usize) -> String {
    if value.len() >= width {
        value[..width].to_string()
    } else {
        format!("{value:<width$}")
    }
}

impl BatchHeader {
    /// The 87-character prefix used by the flattener as a "header
    /// signature": the serialized header with the batch-number column
    /// (positions 88-94) blanked. Two batches are only mergeable if this
    /// signature matches byte-for-byte.
    pub fn header_signature(&self) -> Result<String> {
        let line = self.to_line()?;
        Ok(line.chars().take(87).collect())
    }
}
