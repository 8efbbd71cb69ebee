//! Addenda99: Return.

use serde::{Deserialize, Serialize};

use super::return_codes::is_recognized_return_code;
use crate::error::{AchError, Result};
use crate::field::{column, read_alpha, read_numeric};
use crate::record::prepare_line;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Addenda99 {
    pub return_code: String,
    pub original_trace: String,
    /// Six digits (YYMMDD) or blank.
    pub date_of_death: String,
    pub original_dfi: String,
    pub addenda_information: String,
    pub trace_number: String,
}

impl Addenda99 {
    pub fn parse(line: &str, line_no: usize) -> Result<Self> {
        prepare_line(line, line_no)?;
        let type_code = &line[1..3];
        if type_code != "99" {
            return Err(AchError::AddendaTypeCode {
                found: type_code.to_string(),
                expected: "99".to_string(),
            });
        }
        Ok(Addenda99 {
            return_code: column(line, 4, 6).to_string(),
            original_trace: column(line, 7, 21).to_string(),
            date_of_death: column(line, 22, 27).to_string(),
            original_dfi: read_numeric(column(line, 28, 35)).to_string(),
            addenda_information: read_alpha(column(line, 36, 79)).to_string(),
            trace_number: column(line, 80, 94).to_string(),
        })
    }

    pub fn to_line(&self) -> String {
        let mut out = String::with_capacity(94);
        out.push('7');
        out.push_str("99");
        out.push_str(&format!("{:<3}", self.return_code));
        out.push_str(&format!("{:>15}", self.original_trace));
        out.push_str(&format!("{:<6}", self.date_of_death));
        out.push_str(&format!("{:0>8}", self.original_dfi));
        out.push_str(&format!("{:<44}", self.addenda_information));
        out.push_str(&format!("{:>15}", self.trace_number));
        out
    }

    /// Validation requires a recognized ReturnCode; DateOfDeath is six
    /// digits or blank (spec.md §4.3).
    pub fn validate(&self) -> Result<()> {
        if !is_recognized_return_code(&self.return_code) {
            return Err(AchError::ReturnCode {
                code: self.return_code.clone(),
            });
        }
        let dod = self.date_of_death.trim();
        if !dod.is_empty() && (dod.len() != 6 || !dod.chars().all(|c| c.is_ascii_digit())) {
            return Err(AchError::file_format(0, format!("dateOfDeath must be 6 digits or blank, got {dod:?}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Addenda99 {
        Addenda99 {
            return_code: "R01".to_string(),
            original_trace: "123456780000001".to_string(),
            date_of_death: "".to_string(),
            original_dfi: "12345678".to_string(),
            addenda_information: "Insufficient funds".to_string(),
            trace_number: "123456780000002".to_string(),
        }
    }

    #[test]
    fn round_trips() {
        let addenda = sample();
        let line = addenda.to_line();
        assert_eq!(line.chars().count(), 94);
        let parsed = Addenda99::parse(&line, 1).unwrap();
        assert_eq!(parsed.return_code, addenda.return_code);
    }

    #[test]
    fn validates_recognized_return_code() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn rejects_unrecognized_return_code() {
        let mut addenda = sample();
        addenda.return_code = "R99".to_string();
        assert!(addenda.validate().is_err());
    }
}
