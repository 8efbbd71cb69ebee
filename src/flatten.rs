//! Batch-flattening engine (C6).
//!
//! Merges batches that share a "header signature" — the batch header
//! serialized with its batch-number column blanked — as long as their
//! entries' trace numbers are disjoint. Entries land in the merged batch
//! sorted by trace number; batch numbers are reassigned sequentially
//! afterward.

use std::collections::HashSet;

use tracing::debug;

use crate::batch::Batch;
use crate::error::{AchError, Result};
use crate::file::{File, ParserOptions};

/// Flattens `file`'s batches in place, then calls [`File::create`] and
/// [`File::validate`] on the result so the flattened file is left
/// structurally valid instead of merely batch-renumbered (spec.md §4.6 step
/// 6). Trace numbers are preserved across the merge regardless of
/// `options.custom_trace_numbers`, since [`File::create`] reassigning them
/// would defeat the disjoint-trace-number merge predicate just applied.
pub fn flatten(file: &mut File, options: &ParserOptions) -> Result<()> {
    let before_entry_addenda_count: u64 = file.batches.iter().map(|b| b.entry_addenda_count() as u64).sum();
    let before_total_debit: i64 = file.batches.iter().filter_map(|b| b.control.as_ref()).map(|c| c.total_debit).sum();
    let before_total_credit: i64 = file.batches.iter().filter_map(|b| b.control.as_ref()).map(|c| c.total_credit).sum();

    let merged = merge_batches(std::mem::take(&mut file.batches))?;

    let after_entry_addenda_count: u64 = merged.iter().map(|b| b.entry_addenda_count() as u64).sum();
    if before_entry_addenda_count != after_entry_addenda_count {
        return Err(AchError::FlattenChangedCounts {
            field: "entryAddendaCount".to_string(),
            before: before_entry_addenda_count.to_string(),
            after: after_entry_addenda_count.to_string(),
        });
    }
    let after_total_debit: i64 = merged.iter().filter_map(|b| b.control.as_ref()).map(|c| c.total_debit).sum();
    if before_total_debit != after_total_debit {
        return Err(AchError::FlattenChangedCounts {
            field: "totalDebit".to_string(),
            before: before_total_debit.to_string(),
            after: after_total_debit.to_string(),
        });
    }
    let after_total_credit: i64 = merged.iter().filter_map(|b| b.control.as_ref()).map(|c| c.total_credit).sum();
    if before_total_credit != after_total_credit {
        return Err(AchError::FlattenChangedCounts {
            field: "totalCredit".to_string(),
            before: before_total_credit.to_string(),
            after: after_total_credit.to_string(),
        });
    }

    file.batches = merged;
    let create_options = ParserOptions { custom_trace_numbers: true, ..*options };
    file.create(&create_options)?;
    file.validate(options)?;
    debug!(batch_count = file.batches.len(), "flattened batches");
    Ok(())
}

/// Greedily merges batches sharing a header signature, smallest batches
/// first, skipping a merge whenever it would collide trace numbers.
fn merge_batches(mut batches: Vec<Batch>) -> Result<Vec<Batch>> {
    batches.sort_by_key(|b| b.entries.len());

    let mut groups: Vec<(String, Batch, HashSet<String>)> = Vec::new();

    for batch in batches {
        let signature = batch.header.header_signature()?;
        let trace_numbers = batch.trace_numbers();

        let slot = groups
            .iter_mut()
            .find(|(sig, _, seen)| *sig == signature && seen.is_disjoint(&trace_numbers));

        match slot {
            Some((_, merged, seen)) => {
                merged.entries.extend(batch.entries);
                seen.extend(trace_numbers);
            }
            None => groups.push((signature, batch, trace_numbers)),
        }
    }

    Ok(groups
        .into_iter()
        .map(|(_, mut merged, _)| {
            merged.entries.sort_by(|a, b| a.detail.trace_number.cmp(&b.detail.trace_number));
            merged.recompute_control();
            merged
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::BatchEntry;
    use crate::file::ParserOptions;
    use crate::records::{BatchHeader, EntryDetail};

    fn header(odfi: &str) -> BatchHeader {
        BatchHeader {
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
            originating_dfi_identification: odfi.to_string(),
            batch_number: 0,
        }
    }

    fn entry(amount: i64) -> EntryDetail {
        EntryDetail {
            transaction_code: "22".to_string(),
            rdfi_identification: "12345678".to_string(),
            check_digit: EntryDetail::compute_check_digit("12345678").unwrap().to_string(),
            dfi_account_number: "0001234567".to_string(),
            amount,
            individual_identification_number: "ID001".to_string(),
            individual_name: "Jane Doe".to_string(),
            discretionary_data: "".to_string(),
            addenda_record_indicator: false,
            trace_number: String::new(),
        }
    }

    #[test]
    fn s4_merges_two_batches_with_matching_signature() {
        let mut a = Batch::new(header("12345678"));
        a.entries.push(BatchEntry::new(entry(100)));
        a.create(false).unwrap();

        let mut b = Batch::new(header("12345678"));
        b.entries.push(BatchEntry::new(entry(200)));
        b.create(false).unwrap();
        // distinct trace numbers: give b a different starting sequence
        b.entries[0].detail.trace_number = "123456780000099".to_string();

        let merged = merge_batches(vec![a, b]).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].entries.len(), 2);
        assert_eq!(merged[0].control.as_ref().unwrap().total_credit, 300);
    }

    #[test]
    fn s5_keeps_batches_with_colliding_trace_numbers_separate() {
        let mut a = Batch::new(header("12345678"));
        a.entries.push(BatchEntry::new(entry(100)));
        a.entries[0].detail.trace_number = "123456780000001".to_string();

        let mut b = Batch::new(header("12345678"));
        b.entries.push(BatchEntry::new(entry(200)));
        b.entries[0].detail.trace_number = "123456780000001".to_string();
        a.recompute_control();
        b.recompute_control();

        let merged = merge_batches(vec![a, b]).unwrap();
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn different_header_signatures_never_merge() {
        let mut a = Batch::new(header("12345678"));
        a.entries.push(BatchEntry::new(entry(100)));
        a.create(false).unwrap();

        let mut b = Batch::new(header("87654321"));
        b.entries.push(BatchEntry::new(entry(200)));
        b.create(false).unwrap();

        let merged = merge_batches(vec![a, b]).unwrap();
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn flatten_preserves_total_entry_addenda_count() {
        let mut file = File::new(crate::records::FileHeader::default());
        let mut a = Batch::new(header("12345678"));
        a.entries.push(BatchEntry::new(entry(100)));
        let mut b = Batch::new(header("12345678"));
        b.entries.push(BatchEntry::new(entry(200)));
        file.batches.push(a);
        file.batches.push(b);
        file.create(&ParserOptions::default()).unwrap();
        // force disjoint trace numbers across the two batches
        file.batches[1].entries[0].detail.trace_number = "123456780000099".to_string();
        file.batches[1].recompute_control();

        flatten(&mut file, &ParserOptions::default()).unwrap();
        assert_eq!(file.batches.len(), 1);
        assert_eq!(file.batches[0].entries.len(), 2);
    }
}
