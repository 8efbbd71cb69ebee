//! The addenda family (C3): typed addenda keyed by TypeCode, dispatched the
//! way the teacher dispatches `MTMessage` variants by message type string
//! (`src/messages/mod.rs`) — one tagged enum, one arm per TypeCode.

mod addenda02;
mod addenda05;
mod addenda98;
mod addenda99;
mod iat;
mod noc;
mod return_codes;

pub use addenda02::Addenda02;
pub use addenda05::Addenda05;
pub use addenda98::Addenda98;
pub use addenda99::Addenda99;
pub use iat::IatAddenda;
pub use noc::{CorrectedDataExtraction, change_code_directory, is_recognized_change_code};
pub use return_codes::{is_recognized_return_code, return_code_directory};

use serde::{Deserialize, Serialize};

use crate::error::{AchError, Result};
use crate::record::prepare_line;

/// Any addenda record attached to an entry, dispatched by TypeCode
/// (positions 2-3 of a type-7 line).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(tag = "typeCode")]
pub enum Addenda {
    #[serde(rename = "02")]
    Addenda02(Addenda02),
    #[serde(rename = "05")]
    Addenda05(Addenda05),
    #[serde(rename = "98")]
    Addenda98(Addenda98),
    #[serde(rename = "99")]
    Addenda99(Addenda99),
    Iat(IatAddenda),
}

impl Addenda {
    pub const RECORD_TYPE: &'static str = "7";

    /// Parses any addenda line by dispatching on its TypeCode.
    pub fn parse(line: &str, line_no: usize) -> Result<Self> {
        prepare_line(line, line_no)?;
        if &line[0..1] != Self::RECORD_TYPE {
            return Err(AchError::RecordType {
                found: line[0..1].to_string(),
                expected: Self::RECORD_TYPE.to_string(),
                line: line_no,
            });
        }
        let type_code = &line[1..3];
        match type_code {
            "02" => Ok(Addenda::Addenda02(Addenda02::parse(line, line_no)?)),
            "05" => Ok(Addenda::Addenda05(Addenda05::parse(line, line_no)?)),
            "98" => Ok(Addenda::Addenda98(Addenda98::parse(line, line_no)?)),
            "99" => Ok(Addenda::Addenda99(Addenda99::parse(line, line_no)?)),
            "10" | "11" | "12" | "13" | "14" | "15" | "16" | "17" | "18" => {
                Ok(Addenda::Iat(IatAddenda::parse(line, line_no)?))
            }
            other => Err(AchError::AddendaTypeCode {
                found: other.to_string(),
                expected: "02, 05, 10-18, 98 or 99".to_string(),
            }),
        }
    }

    pub fn to_line(&self) -> Result<String> {
        match self {
            Addenda::Addenda02(a) => a.to_line(),
            Addenda::Addenda05(a) => a.to_line(),
            Addenda::Addenda98(a) => Ok(a.to_line()),
            Addenda::Addenda99(a) => Ok(a.to_line()),
            Addenda::Iat(a) => Ok(a.to_line()),
        }
    }

    pub fn type_code(&self) -> &'static str {
        match self {
            Addenda::Addenda02(_) => "02",
            Addenda::Addenda05(_) => "05",
            Addenda::Addenda98(_) => "98",
            Addenda::Addenda99(_) => "99",
            Addenda::Iat(a) => a.type_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_on_type_code() {
        let a05 = Addenda05 {
            payment_related_information: "memo".to_string(),
            addenda_sequence_number: 1,
            entry_detail_sequence_number: 1,
        };
        let line = a05.to_line().unwrap();
        let parsed = Addenda::parse(&line, 1).unwrap();
        assert!(matches!(parsed, Addenda::Addenda05(_)));
    }

    #[test]
    fn rejects_unknown_type_code() {
        let mut line = "7".to_string();
        line.push_str("77");
        line.push_str(&" ".repeat(91));
        assert!(Addenda::parse(&line, 1).is_err());
    }
}
