//! Entry Detail record (type 6).

use serde::{Deserialize, Serialize};

use crate::error::{AchError, Result};
use crate::field::{column, read_alpha, read_numeric, write_alpha, write_numeric};
use crate::record::{Record, prepare_line};

/// Entry Detail record. Owns zero or more addenda; trace numbers are
/// unique within a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct EntryDetail {
    pub transaction_code: String,
    pub rdfi_identification: String,
    pub check_digit: String,
    pub dfi_account_number: String,
    /// Amount in cents.
    pub amount: i64,
    pub individual_identification_number: String,
    pub individual_name: String,
    pub discretionary_data: String,
    pub addenda_record_indicator: bool,
    pub trace_number: String,
}

impl Record for EntryDetail {
    const RECORD_TYPE: &'static str = "6";

    fn parse(line: &str, line_no: usize) -> Result<Self> {
        prepare_line(line, line_no)?;
        if &line[0..1] != Self::RECORD_TYPE {
            return Err(AchError::RecordType {
                found: line[0..1].to_string(),
                expected: Self::RECORD_TYPE.to_string(),
                line: line_no,
            });
        }
        let amount: i64 = read_numeric(column(line, 30, 39))
            .parse()
            .map_err(|_| AchError::file_format(line_no, "invalid amount"))?;
        let indicator = column(line, 79, 79);
        let addenda_record_indicator = match indicator {
            "0" => false,
            "1" => true,
            other => {
                return Err(AchError::file_format(
                    line_no,
                    format!("addendaRecordIndicator must be 0 or 1, got {other}"),
                ));
            }
        };

        Ok(EntryDetail {
            transaction_code: column(line, 2, 3).to_string(),
            rdfi_identification: read_numeric(column(line, 4, 11)).to_string(),
            check_digit: column(line, 12, 12).to_string(),
            dfi_account_number: read_alpha(column(line, 13, 29)).to_string(),
            amount,
            individual_identification_number: read_alpha(column(line, 40, 54)).to_string(),
            individual_name: read_alpha(column(line, 55, 76)).to_string(),
            discretionary_data: read_alpha(column(line, 77, 78)).to_string(),
            addenda_record_indicator,
            trace_number: column(line, 80, 94).to_string(),
        })
    }

    fn to_line(&self) -> Result<String> {
        let mut out = String::with_capacity(94);
        out.push_str(Self::RECORD_TYPE);
        out.push_str(&self.transaction_code);
        out.push_str(&write_numeric("rdfiIdentification", &self.rdfi_identification, 8)?);
        out.push_str(&self.check_digit);
        out.push_str(&write_alpha("dfiAccountNumber", &self.dfi_account_number, 17)?);
        out.push_str(&format!("{:0>10}", self.amount.max(0)));
        out.push_str(&write_alpha(
            "individualIdentificationNumber",
            &self.individual_identification_number,
            15,
        )?);
        out.push_str(&write_alpha("individualName", &self.individual_name, 22)?);
        out.push_str(&write_alpha("discretionaryData", &self.discretionary_data, 2)?);
        out.push(if self.addenda_record_indicator { '1' } else { '0' });
        out.push_str(&format!("{:0>15}", self.trace_number));
        Ok(out)
    }
}

impl EntryDetail {
    /// Computes the mod-10 check digit of an 8-digit RDFI routing number,
    /// per the standard ABA routing-number checksum.
    pub fn compute_check_digit(rdfi_identification: &str) -> Result<u32> {
        let digits: Vec<u32> = rdfi_identification
            .chars()
            .map(|c| c.to_digit(10).ok_or_else(|| AchError::invalid_character_set("rdfiIdentification", rdfi_identification)))
            .collect::<Result<_>>()?;
        if digits.len() != 8 {
            return Err(AchError::invalid_character_set("rdfiIdentification", rdfi_identification));
        }
        // ABA weights for positions 1..8: 3 7 1 3 7 1 3 7
        const WEIGHTS: [u32; 8] = [3, 7, 1, 3, 7, 1, 3, 7];
        let sum: u32 = digits.iter().zip(WEIGHTS.iter()).map(|(d, w)| d * w).sum();
        Ok((10 - (sum % 10)) % 10)
    }

    /// True when the stored [`Self::check_digit`] matches the recomputed
    /// mod-10 checksum of [`Self::rdfi_identification`] (invariant 4).
    pub fn check_digit_is_valid(&self) -> bool {
        let computed = match Self::compute_check_digit(&self.rdfi_identification) {
            Ok(v) => v,
            Err(_) => return false,
        };
        self.check_digit == computed.to_string()
    }

    /// Is this entry a credit (transaction codes ending in 2, roughly) or a
    /// debit? ACH transaction codes: x2 = checking/savings credit,
    /// x7 = checking/savings debit; x refers to account-type nibble.
    pub fn is_credit(&self) -> bool {
        matches!(self.transaction_code.as_str(), "22" | "23" | "32" | "33" | "82" | "84")
    }

    pub fn is_debit(&self) -> bool {
        matches!(self.transaction_code.as_str(), "27" | "28" | "37" | "38" | "81" | "83")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EntryDetail {
        EntryDetail {
            transaction_code: "22".to_string(),
            rdfi_identification: "12345678".to_string(),
            check_digit: EntryDetail::compute_check_digit("12345678").unwrap().to_string(),
            dfi_account_number: "0001234567".to_string(),
            amount: 150_00,
            individual_identification_number: "ID001".to_string(),
            individual_name: "Jane Doe".to_string(),
            discretionary_data: "".to_string(),
            addenda_record_indicator: false,
            trace_number: "123456780000001".to_string(),
        }
    }

    #[test]
    fn round_trips() {
        let entry = sample();
        let line = entry.to_line().unwrap();
        assert_eq!(line.chars().count(), 94);
        let parsed = EntryDetail::parse(&line, 1).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn check_digit_matches_known_routing_number() {
        // 073000176 is a commonly cited valid ABA routing number ending in
        // its own check digit; verify against the first 8 digits.
        let check = EntryDetail::compute_check_digit("07300017").unwrap();
        assert_eq!(check, 6);
    }

    #[test]
    fn detects_invalid_check_digit() {
        let mut entry = sample();
        entry.check_digit = "9".to_string();
        assert!(!entry.check_digit_is_valid());
    }

    #[test]
    fn classifies_credit_and_debit() {
        let mut entry = sample();
        entry.transaction_code = "22".to_string();
        assert!(entry.is_credit());
        entry.transaction_code = "27".to_string();
        assert!(entry.is_debit());
    }
}
