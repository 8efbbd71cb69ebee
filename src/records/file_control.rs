//! File Control record (type 9, non-filler).

use serde::{Deserialize, Serialize};

use crate::error::{AchError, Result};
use crate::field::{column, read_numeric, write_numeric, write_numeric_u64};
use crate::record::{Record, prepare_line};

/// File Control record. Closes the file; totals mirror the sum across all
/// batch controls (invariant 3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct FileControl {
    pub batch_count: u32,
    pub block_count: u32,
    pub entry_addenda_count: u64,
    pub entry_hash: u64,
    /// Cents.
    pub total_debit: i64,
    /// Cents.
    pub total_credit: i64,
}

impl Record for FileControl {
    const RECORD_TYPE: &'static str = "9";

    fn parse(line: &str, line_no: usize) -> Result<Self> {
        prepare_line(line, line_no)?;
        if &line[0..1] != Self::RECORD_TYPE {
            return Err(AchError::RecordType {
                found: line[0..1].to_string(),
                expected: Self::RECORD_TYPE.to_string(),
                line: line_no,
            });
        }
        let batch_count: u32 = read_numeric(column(line, 2, 7))
            .parse()
            .map_err(|_| AchError::file_format(line_no, "invalid batchCount"))?;
        let block_count: u32 = read_numeric(column(line, 8, 13))
            .parse()
            .map_err(|_| AchError::file_format(line_no, "invalid blockCount"))?;
        let entry_addenda_count: u64 = read_numeric(column(line, 14, 21))
            .parse()
            .map_err(|_| AchError::file_format(line_no, "invalid entryAddendaCount"))?;
        let entry_hash: u64 = read_numeric(column(line, 22, 31))
            .parse()
            .map_err(|_| AchError::file_format(line_no, "invalid entryHash"))?;
        let total_debit: i64 = read_numeric(column(line, 32, 43))
            .parse()
            .map_err(|_| AchError::file_format(line_no, "invalid totalDebit"))?;
        let total_credit: i64 = read_numeric(column(line, 44, 55))
            .parse()
            .map_err(|_| AchError::file_format(line_no, "invalid totalCredit"))?;

        Ok(FileControl {
            batch_count,
            block_count,
            entry_addenda_count,
            entry_hash,
            total_debit,
            total_credit,
        })
    }

    fn to_line(&self) -> Result<String> {
        let mut out = String::with_capacity(94);
        out.push_str(Self::RECORD_TYPE);
        out.push_str(&write_numeric("batchCount", &self.batch_count.to_string(), 6)?);
        out.push_str(&write_numeric("blockCount", &self.block_count.to_string(), 6)?);
        out.push_str(&write_numeric("entryAddendaCount", &self.entry_addenda_count.to_string(), 8)?);
        out.push_str(&write_numeric_u64(self.entry_hash, 10));
        out.push_str(&format!("{:0>12}", self.total_debit.max(0)));
        out.push_str(&format!("{:0>12}", self.total_credit.max(0)));
        out.push_str(&" ".repeat(39));
        Ok(out)
    }
}
