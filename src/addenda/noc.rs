//! Notification-of-Change directory: the recognized ChangeCode table
//! (C01-C12) plus the pure extraction function spec.md §4.3 requires.
//!
//! Grounded on the teacher's process-wide `swift_error_codes` lookup-table
//! pattern: a `once_cell::sync::Lazy` map initialized once from a literal
//! table, read-only thereafter.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The NACHA-recognized Notification-of-Change codes, C01 through C12.
pub static CHANGE_CODES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("C01", "Incorrect DFI account number"),
        ("C02", "Incorrect routing number"),
        ("C03", "Incorrect routing number and account number"),
        ("C04", "Incorrect individual name/receiving company name"),
        ("C05", "Incorrect transaction code"),
        ("C06", "Incorrect DFI account number and transaction code"),
        (
            "C07",
            "Incorrect routing number, account number and transaction code",
        ),
        ("C08", "Incorrect receiving DFI identification"),
        ("C09", "Incorrect individual identification number"),
        ("C10", "Incorrect company identification"),
        ("C11", "Incorrect company name"),
        ("C12", "Incorrect company identification and company name"),
    ])
});

/// Read-only accessor for the change-code directory.
pub fn change_code_directory() -> &'static HashMap<&'static str, &'static str> {
    &CHANGE_CODES
}

/// True when `code` is one of C01-C12.
pub fn is_recognized_change_code(code: &str) -> bool {
    CHANGE_CODES.contains_key(code)
}

/// The structured result of extracting corrected data from an
/// [`super::Addenda98`], per the ChangeCode-directed rules in spec.md §4.3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum CorrectedDataExtraction {
    AccountNumber(String),
    RoutingNumber(String),
    RoutingAndAccount { routing_number: String, account_number: String },
    Name(String),
    TransactionCode(u32),
    AccountAndTransactionCode { account_number: String, transaction_code: u32 },
    RoutingAccountAndTransactionCode {
        routing_number: String,
        account_number: String,
        transaction_code: u32,
    },
    Identification(String),
    /// Recognized change code (C08, C10-C12) with no extractable payload.
    NoData,
    /// The change code is either unrecognized, or the CorrectedData could
    /// not be tokenized into the expected shape (spec.md §9 Open Question
    /// 1: surface this rather than guess).
    Unrecognized,
}

/// Performs the ChangeCode-directed field extraction from a raw
/// `CorrectedData` value. Pure function: no I/O, no panics.
pub fn extract_corrected_data(change_code: &str, corrected_data: &str) -> CorrectedDataExtraction {
    let trimmed = corrected_data.trim();
    match change_code {
        "C01" => CorrectedDataExtraction::AccountNumber(first_n_trimmed(trimmed, 17)),
        "C02" => CorrectedDataExtraction::RoutingNumber(first_n_trimmed(trimmed, 9)),
        "C03" => match whitespace_tokens(trimmed, 2) {
            Some(tokens) => CorrectedDataExtraction::RoutingAndAccount {
                routing_number: tokens[0].clone(),
                account_number: tokens[1].clone(),
            },
            None => CorrectedDataExtraction::Unrecognized,
        },
        "C04" => CorrectedDataExtraction::Name(first_n_trimmed(trimmed, 22)),
        "C05" => match first_n_trimmed(trimmed, 2).parse::<u32>() {
            Ok(code) => CorrectedDataExtraction::TransactionCode(code),
            Err(_) => CorrectedDataExtraction::Unrecognized,
        },
        "C06" => match whitespace_tokens(trimmed, 2) {
            Some(tokens) => match tokens[1].parse::<u32>() {
                Ok(code) => CorrectedDataExtraction::AccountAndTransactionCode {
                    account_number: tokens[0].clone(),
                    transaction_code: code,
                },
                Err(_) => CorrectedDataExtraction::Unrecognized,
            },
            None => CorrectedDataExtraction::Unrecognized,
        },
        "C07" => match whitespace_tokens(trimmed, 3) {
            Some(tokens) => match tokens[2].parse::<u32>() {
                Ok(code) => CorrectedDataExtraction::RoutingAccountAndTransactionCode {
                    routing_number: tokens[0].clone(),
                    account_number: tokens[1].clone(),
                    transaction_code: code,
                },
                Err(_) => CorrectedDataExtraction::Unrecognized,
            },
            None => CorrectedDataExtraction::Unrecognized,
        },
        "C09" => CorrectedDataExtraction::Identification(first_n_trimmed(trimmed, 22)),
        "C08" | "C10" | "C11" | "C12" => CorrectedDataExtraction::NoData,
        _ => CorrectedDataExtraction::Unrecognized,
    }
}

fn first_n_trimmed(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect::<String>().trim().to_string()
}

/// Splits on runs of whitespace; returns `None` unless exactly `n` tokens
/// result (spec.md §9 Open Question 1: lenient tokenization, but an
/// unexpected token count is reported as unrecognized, never guessed at).
fn whitespace_tokens(value: &str, n: usize) -> Option<Vec<String>> {
    let tokens: Vec<String> = value.split_whitespace().map(str::to_string).collect();
    if tokens.len() == n { Some(tokens) } else { None }
}
