//! Addenda98: Notification of Change (NOC/COR).

use serde::{Deserialize, Serialize};

use super::noc::{CorrectedDataExtraction, extract_corrected_data, is_recognized_change_code};
use crate::error::{AchError, Result};
use crate::field::{column, read_alpha, read_numeric};
use crate::record::prepare_line;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Addenda98 {
    pub change_code: String,
    pub original_trace: String,
    pub original_dfi: String,
    pub corrected_data: String,
    pub trace_number: String,
}

impl Addenda98 {
    pub fn parse(line: &str, line_no: usize) -> Result<Self> {
        prepare_line(line, line_no)?;
        let type_code = &line[1..3];
        if type_code != "98" {
            return Err(AchError::AddendaTypeCode {
                found: type_code.to_string(),
                expected: "98".to_string(),
            });
        }
        Ok(Addenda98 {
            change_code: column(line, 4, 6).to_string(),
            original_trace: column(line, 7, 21).to_string(),
            original_dfi: read_numeric(column(line, 28, 35)).to_string(),
            corrected_data: read_alpha(column(line, 36, 64)).to_string(),
            trace_number: column(line, 80, 94).to_string(),
        })
    }

    pub fn to_line(&self) -> String {
        let mut out = String::with_capacity(94);
        out.push('7');
        out.push_str("98");
        out.push_str(&format!("{:<3}", self.change_code));
        out.push_str(&format!("{:>15}", self.original_trace));
        out.push_str(&" ".repeat(6));
        out.push_str(&format!("{:0>8}", self.original_dfi));
        out.push_str(&format!("{:<29}", self.corrected_data));
        out.push_str(&" ".repeat(15));
        out.push_str(&format!("{:>15}", self.trace_number));
        out
    }

    /// Validation requires a recognized ChangeCode and non-empty
    /// CorrectedData (spec.md §4.3).
    pub fn validate(&self) -> Result<()> {
        if !is_recognized_change_code(&self.change_code) {
            return Err(AchError::ChangeCode {
                code: self.change_code.clone(),
            });
        }
        if self.corrected_data.trim().is_empty() {
            return Err(AchError::CorrectedData);
        }
        Ok(())
    }

    /// The pure ChangeCode-directed extraction required by spec.md §4.3.
    pub fn extract_corrected_data(&self) -> CorrectedDataExtraction {
        extract_corrected_data(&self.change_code, &self.corrected_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Addenda98 {
        Addenda98 {
            change_code: "C03".to_string(),
            original_trace: "123456780000001".to_string(),
            original_dfi: "12345678".to_string(),
            corrected_data: "074000078 12345678".to_string(),
            trace_number: "123456780000002".to_string(),
        }
    }

    #[test]
    fn round_trips() {
        let addenda = sample();
        let line = addenda.to_line();
        assert_eq!(line.chars().count(), 94);
        let parsed = Addenda98::parse(&line, 1).unwrap();
        assert_eq!(parsed.change_code, addenda.change_code);
        assert_eq!(parsed.corrected_data.trim(), addenda.corrected_data.trim());
    }

    #[test]
    fn validates_recognized_change_code() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn rejects_unrecognized_change_code() {
        let mut addenda = sample();
        addenda.change_code = "C99".to_string();
        assert!(matches!(addenda.validate(), Err(AchError::ChangeCode { .. })));
    }

    #[test]
    fn rejects_empty_corrected_data() {
        let mut addenda = sample();
        addenda.corrected_data = "".to_string();
        assert!(matches!(addenda.validate(), Err(AchError::CorrectedData)));
    }
}
