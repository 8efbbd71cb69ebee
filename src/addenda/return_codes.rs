//! NACHA Return Reason Code directory (Rxx), grounded on the same
//! process-wide lookup-table pattern as [`super::noc`].

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub static RETURN_CODES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("R01", "Insufficient funds"),
        ("R02", "Account closed"),
        ("R03", "No account/unable to locate account"),
        ("R04", "Invalid account number"),
        ("R05", "Unauthorized debit to consumer account"),
        ("R06", "Returned per ODFI's request"),
        ("R07", "Authorization revoked by customer"),
        ("R08", "Payment stopped"),
        ("R09", "Uncollected funds"),
        ("R10", "Customer advises not authorized"),
        ("R11", "Customer advises entry not in accordance with the terms"),
        ("R12", "Branch sold to another DFI"),
        ("R13", "RDFI not qualified to participate"),
        ("R14", "Representative payee deceased or unable to continue"),
        ("R15", "Beneficiary or account holder deceased"),
        ("R16", "Account frozen"),
        ("R17", "File record edit criteria"),
        ("R20", "Non-transaction account"),
        ("R21", "Invalid company identification"),
        ("R22", "Invalid individual ID number"),
        ("R23", "Credit entry refused by receiver"),
        ("R24", "Duplicate entry"),
        ("R29", "Corporate customer advises not authorized"),
        ("R31", "Permissible return entry"),
    ])
});

pub fn return_code_directory() -> &'static HashMap<&'static str, &'static str> {
    &RETURN_CODES
}

pub fn is_recognized_return_code(code: &str) -> bool {
    RETURN_CODES.contains_key(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_common_codes() {
        for code in ["R01", "R02", "R10", "R24"] {
            assert!(is_recognized_return_code(code));
        }
    }

    #[test]
    fn rejects_unknown_codes() {
        assert!(!is_recognized_return_code("R99"));
    }
}
