//! Bypass-flag behavior and validation-failure scenarios (spec.md §5, §7).

use ach_core::batch::{Batch, BatchEntry};
use ach_core::records::{BatchHeader, EntryDetail, FileHeader};
use ach_core::{AchError, File, ParserOptions};

fn file_header() -> FileHeader {
    FileHeader {
        priority_code: "01".to_string(),
        immediate_destination: "123456789".to_string(),
        immediate_origin: "987654321".to_string(),
        file_creation_date: "230615".to_string(),
        file_creation_time: "1200".to_string(),
        file_id_modifier: "A".to_string(),
        immediate_destination_name: "Destination Bank".to_string(),
        immediate_origin_name: "Origin Bank".to_string(),
        reference_code: "".to_string(),
    }
}

fn batch_header() -> BatchHeader {
    BatchHeader {
        service_class_code: "220".to_string(),
        company_name: "Acme Corp".to_string(),
        company_discretionary_data: "".to_string(),
        company_identification: "1234567890".to_string(),
        standard_entry_class_code: "PPD".to_string(),
        company_entry_description: "PAYROLL".to_string(),
        company_descriptive_date: "".to_string(),
        effective_entry_date: "230615".to_string(),
        settlement_date: "".to_string(),
        originator_status_code: "1".to_string(),
        originating_dfi_identification: "12345678".to_string(),
        batch_number: 0,
    }
}

fn entry() -> EntryDetail {
    EntryDetail {
        transaction_code: "22".to_string(),
        rdfi_identification: "12345678".to_string(),
        check_digit: EntryDetail::compute_check_digit("12345678").unwrap().to_string(),
        dfi_account_number: "0001234567".to_string(),
        amount: 1000,
        individual_identification_number: "ID001".to_string(),
        individual_name: "Jane Doe".to_string(),
        discretionary_data: "".to_string(),
        addenda_record_indicator: false,
        trace_number: String::new(),
    }
}

fn built_file() -> File {
    let mut file = File::new(file_header());
    let mut batch = Batch::new(batch_header());
    batch.entries.push(BatchEntry::new(entry()));
    file.batches.push(batch);
    file.create(&ParserOptions::default()).unwrap();
    file
}

#[test]
fn s6_tampered_total_credit_fails_validation_without_bypass() {
    let mut file = built_file();
    file.control.as_mut().unwrap().total_credit += 1;
    let err = file.validate(&ParserOptions::default()).unwrap_err();
    assert!(matches!(err, AchError::ValidateOpts { .. }));
}

#[test]
fn allow_invalid_amounts_bypasses_total_mismatch() {
    let mut file = built_file();
    file.control.as_mut().unwrap().total_credit += 1;
    let options = ParserOptions { allow_invalid_amounts: true, ..Default::default() };
    file.validate(&options).unwrap();
}

#[test]
fn missing_immediate_destination_fails_validation_without_bypass() {
    let mut file = built_file();
    file.header.immediate_destination = "".to_string();
    let err = file.validate(&ParserOptions::default()).unwrap_err();
    assert!(matches!(err, AchError::FieldInclusion { .. }));
}

#[test]
fn bypass_destination_permits_a_missing_immediate_destination() {
    let mut file = built_file();
    file.header.immediate_destination = "".to_string();
    let options = ParserOptions { bypass_destination: true, ..Default::default() };
    file.validate(&options).unwrap();
}

#[test]
fn allow_zero_batches_permits_an_empty_file() {
    let mut file = File::new(file_header());
    file.create(&ParserOptions::default()).unwrap();
    assert!(file.validate(&ParserOptions::default()).is_err());

    let options = ParserOptions { allow_zero_batches: true, ..Default::default() };
    file.validate(&options).unwrap();
}

#[test]
fn allow_missing_file_control_accepts_a_file_with_none() {
    let mut file = built_file();
    file.control = None;
    let options = ParserOptions { allow_missing_file_control: true, ..Default::default() };
    file.validate(&options).unwrap();
}

#[test]
fn batch_validation_failure_reports_batch_index() {
    let mut file = built_file();
    file.batches[0].header.standard_entry_class_code = "XYZ".to_string();
    let err = file.validate(&ParserOptions::default()).unwrap_err();
    match err {
        AchError::BatchValidation { index, source } => {
            assert_eq!(index, 0);
            assert!(matches!(*source, AchError::SECCode { .. }));
        }
        other => panic!("expected BatchValidation, got {other:?}"),
    }
}

#[test]
fn invalid_check_digit_is_rejected() {
    let mut file = built_file();
    file.batches[0].entries[0].detail.check_digit = "9".to_string();
    file.batches[0].recompute_control();
    let err = file.validate(&ParserOptions::default()).unwrap_err();
    assert!(matches!(err, AchError::BatchValidation { .. }));
}

#[test]
fn parser_rejects_a_line_that_is_not_94_characters() {
    let text = "1 short line";
    let err = ach_core::parser::parse(text, &ParserOptions::default()).unwrap_err();
    assert!(matches!(err, AchError::FileFormat { .. }));
}

#[test]
fn unrecognized_record_type_digit_is_reported_with_line_number() {
    let mut line = "2".to_string();
    line.push_str(&" ".repeat(93));
    let err = ach_core::parser::parse(&line, &ParserOptions::default()).unwrap_err();
    match err {
        AchError::RecordType { line, .. } => assert_eq!(line, 1),
        other => panic!("expected RecordType, got {other:?}"),
    }
}
