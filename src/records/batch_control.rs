//! Batch Control record (type 8).

use serde::{Deserialize, Serialize};

use crate::error::{AchError, Result};
use crate::field::{column, read_alpha, read_numeric, write_alpha, write_numeric, write_numeric_u64};
use crate::record::{Record, prepare_line};

/// Batch Control record. Closes a batch and carries the counts/hashes the
/// file assembler cross-checks against the batch's own entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct BatchControl {
    pub service_class_code: String,
    pub entry_addenda_count: u32,
    pub entry_hash: u64,
    /// Cents.
    pub total_debit: i64,
    /// Cents.
    pub total_credit: i64,
    pub company_identification: String,
    pub message_authentication_code: String,
    pub originating_dfi_identification: String,
    pub batch_number: u32,
}

impl Record for BatchControl {
    const RECORD_TYPE: &'static str = "8";

    fn parse(line: &str, line_no: usize) -> Result<Self> {
        prepare_line(line, line_no)?;
        if &line[0..1] != Self::RECORD_TYPE {
            return Err(AchError::RecordType {
                found: line[0..1].to_string(),
                expected: Self::RECORD_TYPE.to_string(),
                line: line_no,
            });
        }
        let entry_addenda_count: u32 = read_numeric(column(line, 5, 10))
            .parse()
            .map_err(|_| AchError::file_format(line_no, "invalid entryAddendaCount"))?;
        let entry_hash: u64 = read_numeric(column(line, 11, 20))
            .parse()
            .map_err(|_| AchError::file_format(line_no, "invalid entryHash"))?;
        let total_debit: i64 = read_numeric(column(line, 21, 32))
            .parse()
            .map_err(|_| AchError::file_format(line_no, "invalid totalDebit"))?;
        let total_credit: i64 = read_numeric(column(line, 33, 44))
            .parse()
            .map_err(|_| AchError::file_format(line_no, "invalid totalCredit"))?;
        let batch_number: u32 = read_numeric(column(line, 88, 94))
            .parse()
            .map_err(|_| AchError::file_format(line_no, "invalid batchNumber"))?;

        Ok(BatchControl {
            service_class_code: column(line, 2, 4).to_string(),
            entry_addenda_count,
            entry_hash,
            total_debit,
            total_credit,
            company_identification: column(line, 45, 54).to_string(),
            message_authentication_code: read_alpha(column(line, 55, 73)).to_string(),
            originating_dfi_identification: read_numeric(column(line, 80, 87)).to_string(),
            batch_number,
        })
    }

    fn to_line(&self) -> Result<String> {
        let mut out = String::with_capacity(94);
        out.push_str(Self::RECORD_TYPE);
        out.push_str(&format!("{:>3}", self.service_class_code));
        out.push_str(&write_numeric("entryAddendaCount", &self.entry_addenda_count.to_string(), 6)?);
        out.push_str(&write_numeric_u64(self.entry_hash, 10));
        out.push_str(&format!("{:0>12}", self.total_debit.max(0)));
        out.push_str(&format!("{:0>12}", self.total_credit.max(0)));
        out.push_str(&format!("{:<10}", self.company_identification));
        out.push_str(&write_alpha(
            "messageAuthenticationCode",
            &self.message_authentication_code,
            19,
        )?);
        out.push_str(&" ".repeat(6));
        out.push_str(&write_numeric(
            "originatingDfiIdentification",
            &self.originating_dfi_identification,
            8,
        )?);
        out.push_str(&write_numeric("batchNumber", &self.batch_number.to_string(), 7)?);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BatchControl {
        BatchControl {
            service_class_code: "220".to_string(),
            entry_addenda_count: 2,
            entry_hash: 12345678,
            total_debit: 0,
            total_credit: 30000,
            company_identification: "1234567890".to_string(),
            message_authentication_code: "".to_string(),
            originating_dfi_identification: "12345678".to_string(),
            batch_number: 1,
        }
    }

    #[test]
    fn round_trips() {
        let control = sample();
        let line = control.to_line().unwrap();
        assert_eq!(line.chars().count(), 94);
        let parsed = BatchControl::parse(&line, 1).unwrap();
        assert_eq!(parsed, control);
    }
}
