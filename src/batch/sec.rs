//! Standard Entry Class codes as a closed tagged sum (C4), per the
//! teacher's design note in spec.md §9 ("prefer the tagged sum when the SEC
//! set is closed") — one variant per SEC, one validation-rule table.
//!
//! Grounded on the teacher's per-message-type validation (`messages/mt103.rs`
//! and siblings: one file per concrete type, each enforcing its own
//! structural rules) collapsed here into match arms since the rule shapes
//! (allowed transaction codes, addenda cap, required discretionary fields)
//! are homogeneous enough to tabulate rather than spread across files.

use serde::{Deserialize, Serialize};

use crate::error::{AchError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum SecCode {
    /// Prearranged Payment and Deposit (consumer credits/debits).
    Ppd,
    /// Corporate Credit or Debit.
    Ccd,
    /// Corporate Trade Exchange (multiple addenda per entry).
    Ctx,
    /// Internet-Initiated Entry.
    Web,
    /// Telephone-Initiated Entry.
    Tel,
    /// International ACH Transaction.
    Iat,
    /// Automated Accounting Advice.
    Adv,
    /// Point of Sale.
    Pos,
    /// Shared Network Transaction (POS variant).
    Shr,
    /// Notification of Change / Corrected entry.
    Cor,
}

impl SecCode {
    pub fn parse(code: &str) -> Result<Self> {
        match code {
            "PPD" => Ok(SecCode::Ppd),
            "CCD" => Ok(SecCode::Ccd),
            "CTX" => Ok(SecCode::Ctx),
            "WEB" => Ok(SecCode::Web),
            "TEL" => Ok(SecCode::Tel),
            "IAT" => Ok(SecCode::Iat),
            "ADV" => Ok(SecCode::Adv),
            "POS" => Ok(SecCode::Pos),
            "SHR" => Ok(SecCode::Shr),
            "COR" => Ok(SecCode::Cor),
            other => Err(AchError::SECCode { code: other.to_string() }),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            SecCode::Ppd => "PPD",
            SecCode::Ccd => "CCD",
            SecCode::Ctx => "CTX",
            SecCode::Web => "WEB",
            SecCode::Tel => "TEL",
            SecCode::Iat => "IAT",
            SecCode::Adv => "ADV",
            SecCode::Pos => "POS",
            SecCode::Shr => "SHR",
            SecCode::Cor => "COR",
        }
    }

    /// Transaction codes this SEC permits on its entries.
    pub fn allowed_transaction_codes(&self) -> &'static [&'static str] {
        match self {
            SecCode::Adv => &["81", "82", "83", "84", "85", "86"],
            SecCode::Cor => &["21", "22", "23", "26", "27", "28", "31", "32", "33", "36", "37", "38"],
            _ => &["22", "23", "24", "27", "28", "29", "32", "33", "34", "37", "38", "39"],
        }
    }

    /// Maximum number of Addenda05 records allowed per entry. `CTX` allows
    /// up to 9,999; every other SEC caps at one; COR and ADV carry none.
    pub fn max_addenda05(&self) -> u32 {
        match self {
            SecCode::Ctx => 9_999,
            SecCode::Cor | SecCode::Adv | SecCode::Tel => 0,
            _ => 1,
        }
    }

    /// True when this SEC uses the IAT mandatory-addenda sequence instead
    /// of ordinary Addenda05/Addenda02 records.
    pub fn is_iat(&self) -> bool {
        matches!(self, SecCode::Iat)
    }

    /// Validates a single entry's transaction code against this SEC's
    /// allowed set.
    pub fn validate_transaction_code(&self, transaction_code: &str) -> Result<()> {
        if !self.allowed_transaction_codes().contains(&transaction_code) {
            return Err(AchError::TransactionCode {
                code: transaction_code.to_string(),
                sec: self.code().to_string(),
            });
        }
        Ok(())
    }

    /// `WEB` and `TEL` require the entry's `discretionaryData` field to
    /// carry a PaymentType of `R` (recurring) or `S` (single); every other
    /// SEC leaves the field free-form.
    pub fn validate_payment_type(&self, discretionary_data: &str) -> Result<()> {
        if !matches!(self, SecCode::Web | SecCode::Tel) {
            return Ok(());
        }
        match discretionary_data.trim() {
            "R" | "S" => Ok(()),
            other => Err(AchError::file_format(
                0,
                format!("{} entries require PaymentType R or S, got {other:?}", self.code()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_codes() {
        assert_eq!(SecCode::parse("PPD").unwrap(), SecCode::Ppd);
        assert_eq!(SecCode::parse("CTX").unwrap(), SecCode::Ctx);
    }

    #[test]
    fn rejects_unknown_code() {
        assert!(SecCode::parse("XYZ").is_err());
    }

    #[test]
    fn ctx_allows_many_addenda05() {
        assert_eq!(SecCode::Ctx.max_addenda05(), 9_999);
        assert_eq!(SecCode::Ppd.max_addenda05(), 1);
    }

    #[test]
    fn adv_restricts_transaction_codes() {
        assert!(SecCode::Adv.validate_transaction_code("81").is_ok());
        assert!(SecCode::Adv.validate_transaction_code("22").is_err());
    }

    #[test]
    fn web_requires_payment_type() {
        assert!(SecCode::Web.validate_payment_type("R").is_ok());
        assert!(SecCode::Web.validate_payment_type("X").is_err());
        assert!(SecCode::Ppd.validate_payment_type("X").is_ok());
    }

    #[test]
    fn tel_requires_payment_type() {
        assert!(SecCode::Tel.validate_payment_type("S").is_ok());
        assert!(SecCode::Tel.validate_payment_type("X").is_err());
    }
}
