//! Renders a [`File`] back to its newline-joined 94-character line form,
//! the inverse of [`crate::parser::parse`].

use crate::error::Result;
use crate::file::File;
use crate::record::Record;

/// Serializes `file` to NACHA text: one `\n`-joined line per record, padded
/// with `"9"` filler lines to the blocking factor (spec.md §3). Fails if any
/// record can't be rendered into its column width.
pub fn to_string(file: &File) -> Result<String> {
    let mut lines = Vec::with_capacity(file.line_count() + file.filler_line_count());
    lines.push(file.header.to_line()?);

    for batch in &file.batches {
        lines.push(batch.header.to_line()?);
        for entry in &batch.entries {
            lines.push(entry.detail.to_line()?);
            for addenda in &entry.addendas {
                lines.push(addenda.to_line()?);
            }
        }
        if let Some(control) = &batch.control {
            lines.push(control.to_line()?);
        }
    }

    if let Some(control) = &file.control {
        lines.push(control.to_line()?);
    }

    for _ in 0..file.filler_line_count() {
        lines.push("9".repeat(94));
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{Batch, BatchEntry};
    use crate::file::ParserOptions;
    use crate::records::{BatchHeader, EntryDetail, FileHeader};

    #[test]
    fn every_line_is_94_characters() {
        let mut file = File::new(FileHeader {
            priority_code: "01".to_string(),
            immediate_destination: "123456789".to_string(),
            immediate_origin: "987654321".to_string(),
            file_creation_date: "230615".to_string(),
            file_creation_time: "1200".to_string(),
            file_id_modifier: "A".to_string(),
            immediate_destination_name: "Destination".to_string(),
            immediate_origin_name: "Origin".to_string(),
            reference_code: "".to_string(),
        });
        let mut batch = Batch::new(BatchHeader {
            service_class_code: "220".to_string(),
            company_name: "Acme".to_string(),
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
        });
        batch.entries.push(BatchEntry::new(EntryDetail {
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
        }));
        file.batches.push(batch);
        file.create(&ParserOptions::default()).unwrap();

        let text = to_string(&file).unwrap();
        for line in text.lines() {
            assert_eq!(line.chars().count(), 94);
        }
        assert_eq!(text.lines().count() % 10, 0);
    }
}
