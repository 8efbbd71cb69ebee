//! Addenda05: free-form payment-related information.
//!
//! Most SECs allow at most one per entry; CTX allows up to 9,999 (enforced
//! by the batch variant, not here — see [`crate::batch::sec`]).

use serde::{Deserialize, Serialize};

use crate::error::{AchError, Result};
use crate::field::{column, read_numeric, write_alpha, write_numeric};
use crate::record::prepare_line;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Addenda05 {
    pub payment_related_information: String,
    pub addenda_sequence_number: u32,
    pub entry_detail_sequence_number: u32,
}

impl Addenda05 {
    pub fn parse(line: &str, line_no: usize) -> Result<Self> {
        prepare_line(line, line_no)?;
        let type_code = &line[1..3];
        if type_code != "05" {
            return Err(AchError::AddendaTypeCode {
                found: type_code.to_string(),
                expected: "05".to_string(),
            });
        }
        let addenda_sequence_number: u32 = read_numeric(column(line, 84, 87))
            .parse()
            .map_err(|_| AchError::file_format(line_no, "invalid addendaSequenceNumber"))?;
        let entry_detail_sequence_number: u32 = read_numeric(column(line, 88, 94))
            .parse()
            .map_err(|_| AchError::file_format(line_no, "invalid entryDetailSequenceNumber"))?;

        Ok(Addenda05 {
            payment_related_information: column(line, 4, 83).trim_end().to_string(),
            addenda_sequence_number,
            entry_detail_sequence_number,
        })
    }

    pub fn to_line(&self) -> Result<String> {
        let mut out = String::with_capacity(94);
        out.push('7');
        out.push_str("05");
        out.push_str(&write_alpha(
            "paymentRelatedInformation",
            &self.payment_related_information,
            80,
        )?);
        out.push_str(&write_numeric(
            "addendaSequenceNumber",
            &self.addenda_sequence_number.to_string(),
            4,
        )?);
        out.push_str(&write_numeric(
            "entryDetailSequenceNumber",
            &self.entry_detail_sequence_number.to_string(),
            7,
        )?);
        Ok(out)
    }
}
