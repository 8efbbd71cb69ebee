//! IAT mandatory addenda sequence (TypeCodes 10-18).
//!
//! IAT entries carry a fixed sequence of seven mandatory addenda (10-16:
//! first IAT, originator info, two originator-DFI records, two RDFI
//! records) plus two optional correspondent-bank records (17, 18). Rather
//! than nine hand-written record structs, this is one record parameterized
//! by `type_code`, since every IAT addenda record shares the same shape —
//! a single 80-character free-text payload plus the trailing
//! addenda-sequence/entry-sequence pair used by Addenda05 — and differs
//! only in which payload the TypeCode says it carries. See DESIGN.md for
//! this simplification's rationale.

use serde::{Deserialize, Serialize};

use crate::error::{AchError, Result};
use crate::field::{column, read_numeric};
use crate::record::prepare_line;

/// TypeCodes 10 through 16 are mandatory on every IAT entry, in order.
pub const MANDATORY_IAT_TYPE_CODES: [&str; 7] = ["10", "11", "12", "13", "14", "15", "16"];

/// TypeCodes 17 and 18 are optional correspondent-bank records.
pub const OPTIONAL_IAT_TYPE_CODES: [&str; 2] = ["17", "18"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct IatTypeCode(pub &'static str);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct IatAddenda {
    pub type_code: &'static str,
    pub payload: String,
    pub addenda_sequence_number: u32,
    pub entry_detail_sequence_number: u32,
}

// `type_code` is `&'static str` so that only the fixed TypeCode strings in
// MANDATORY_IAT_TYPE_CODES/OPTIONAL_IAT_TYPE_CODES can ever populate it. The
// derived `Deserialize` would need to borrow from the input with lifetime
// `'de`, which can't be unified with `'static`, so this maps a deserialized
// owned string back onto the matching `'static` constant by hand.
impl<'de> Deserialize<'de> for IatAddenda {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Helper {
            type_code: String,
            payload: String,
            addenda_sequence_number: u32,
            entry_detail_sequence_number: u32,
        }

        let helper = Helper::deserialize(deserializer)?;
        let type_code = MANDATORY_IAT_TYPE_CODES
            .iter()
            .chain(OPTIONAL_IAT_TYPE_CODES.iter())
            .find(|c| **c == helper.type_code)
            .copied()
            .ok_or_else(|| {
                serde::de::Error::custom(format!("unknown IAT typeCode {}", helper.type_code))
            })?;

        Ok(IatAddenda {
            type_code,
            payload: helper.payload,
            addenda_sequence_number: helper.addenda_sequence_number,
            entry_detail_sequence_number: helper.entry_detail_sequence_number,
        })
    }
}

impl IatAddenda {
    pub fn parse(line: &str, line_no: usize) -> Result<Self> {
        prepare_line(line, line_no)?;
        let raw_type_code = &line[1..3];
        let type_code = MANDATORY_IAT_TYPE_CODES
            .iter()
            .chain(OPTIONAL_IAT_TYPE_CODES.iter())
            .find(|c| **c == raw_type_code)
            .copied()
            .ok_or_else(|| AchError::AddendaTypeCode {
                found: raw_type_code.to_string(),
                expected: "10-18".to_string(),
            })?;

        let addenda_sequence_number: u32 = read_numeric(column(line, 84, 87))
            .parse()
            .map_err(|_| AchError::file_format(line_no, "invalid addendaSequenceNumber"))?;
        let entry_detail_sequence_number: u32 = read_numeric(column(line, 88, 94))
            .parse()
            .map_err(|_| AchError::file_format(line_no, "invalid entryDetailSequenceNumber"))?;

        Ok(IatAddenda {
            type_code,
            payload: column(line, 4, 83).trim_end().to_string(),
            addenda_sequence_number,
            entry_detail_sequence_number,
        })
    }

    pub fn to_line(&self) -> String {
        let mut out = String::with_capacity(94);
        out.push('7');
        out.push_str(self.type_code);
        out.push_str(&format!("{:<80}", self.payload));
        out.push_str(&format!("{:0>4}", self.addenda_sequence_number));
        out.push_str(&format!("{:0>7}", self.entry_detail_sequence_number));
        out
    }
}

/// Checks that a full IAT entry's addenda set has all seven mandatory
/// records, in order, before any optional correspondent-bank records.
pub fn validate_iat_sequence(addendas: &[IatAddenda]) -> Result<()> {
    let mandatory: Vec<&str> = addendas
        .iter()
        .map(|a| a.type_code)
        .take(MANDATORY_IAT_TYPE_CODES.len())
        .collect();
    if mandatory != MANDATORY_IAT_TYPE_CODES.to_vec() {
        return Err(AchError::file_format(
            0,
            format!(
                "IAT entry requires addenda 10-16 in order, found {mandatory:?}"
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let addenda = IatAddenda {
            type_code: "10",
            payload: "First IAT addenda payload".to_string(),
            addenda_sequence_number: 1,
            entry_detail_sequence_number: 1,
        };
        let line = addenda.to_line();
        assert_eq!(line.chars().count(), 94);
        let parsed = IatAddenda::parse(&line, 1).unwrap();
        assert_eq!(parsed.type_code, "10");
        assert_eq!(parsed.payload, addenda.payload);
    }

    #[test]
    fn validates_full_mandatory_sequence() {
        let addendas: Vec<IatAddenda> = MANDATORY_IAT_TYPE_CODES
            .iter()
            .enumerate()
            .map(|(i, code)| IatAddenda {
                type_code: code,
                payload: format!("payload {i}"),
                addenda_sequence_number: (i + 1) as u32,
                entry_detail_sequence_number: 1,
            })
            .collect();
        assert!(validate_iat_sequence(&addendas).is_ok());
    }

    #[test]
    fn rejects_incomplete_sequence() {
        let addendas = vec![IatAddenda {
            type_code: "10",
            payload: "only one".to_string(),
            addenda_sequence_number: 1,
            entry_detail_sequence_number: 1,
        }];
        assert!(validate_iat_sequence(&addendas).is_err());
    }
}
