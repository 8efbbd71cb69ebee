//! Addenda02: POS/SHR card transaction information.

use serde::{Deserialize, Serialize};

use crate::error::{AchError, Result};
use crate::field::{column, read_alpha, write_alpha};
use crate::record::prepare_line;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Addenda02 {
    pub reference_information_1: String,
    pub reference_information_2: String,
    pub terminal_identification_code: String,
    pub transaction_serial_number: String,
    /// MMDD
    pub transaction_date: String,
    /// HHMM
    pub transaction_time: String,
    pub terminal_location: String,
    pub terminal_city: String,
    pub terminal_state: String,
    pub trace_number: String,
}

impl Addenda02 {
    pub fn parse(line: &str, line_no: usize) -> Result<Self> {
        prepare_line(line, line_no)?;
        let type_code = &line[1..3];
        if type_code != "02" {
            return Err(AchError::AddendaTypeCode {
                found: type_code.to_string(),
                expected: "02".to_string(),
            });
        }
        Ok(Addenda02 {
            reference_information_1: read_alpha(column(line, 4, 6)).to_string(),
            reference_information_2: read_alpha(column(line, 7, 13)).to_string(),
            terminal_identification_code: read_alpha(column(line, 14, 19)).to_string(),
            transaction_serial_number: read_alpha(column(line, 20, 25)).to_string(),
            transaction_date: column(line, 26, 29).to_string(),
            transaction_time: column(line, 30, 33).to_string(),
            terminal_location: read_alpha(column(line, 34, 62)).to_string(),
            terminal_city: read_alpha(column(line, 63, 77)).to_string(),
            terminal_state: column(line, 78, 79).to_string(),
            trace_number: column(line, 80, 94).to_string(),
        })
    }

    pub fn to_line(&self) -> Result<String> {
        let mut out = String::with_capacity(94);
        out.push('7');
        out.push_str("02");
        out.push_str(&write_alpha("referenceInformation1", &self.reference_information_1, 3)?);
        out.push_str(&write_alpha("referenceInformation2", &self.reference_information_2, 7)?);
        out.push_str(&write_alpha("terminalIdentificationCode", &self.terminal_identification_code, 6)?);
        out.push_str(&write_alpha("transactionSerialNumber", &self.transaction_serial_number, 6)?);
        out.push_str(&format!("{:<4}", self.transaction_date));
        out.push_str(&format!("{:<4}", self.transaction_time));
        out.push_str(&write_alpha("terminalLocation", &self.terminal_location, 29)?);
        out.push_str(&write_alpha("terminalCity", &self.terminal_city, 15)?);
        out.push_str(&format!("{:<2}", self.terminal_state));
        out.push_str(&format!("{:>15}", self.trace_number));
        Ok(out)
    }
}
