//! File assembler (C5): aggregates batches, recomputes controls, validates
//! cross-record invariants.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::batch::Batch;
use crate::error::{AchError, Result};
use crate::records::{FileControl, FileHeader};

/// Parser bypass flags (spec.md §4.5). Each relaxes exactly one invariant
/// while the file tree remains structurally valid. All default to off.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct ParserOptions {
    pub bypass_origin: bool,
    pub bypass_destination: bool,
    pub bypass_company_identification_match: bool,
    pub allow_invalid_amounts: bool,
    pub allow_missing_file_control: bool,
    pub allow_missing_file_header: bool,
    pub custom_trace_numbers: bool,
    pub allow_zero_batches: bool,
}

/// A complete ACH file: one header, one or more batches, one control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct File {
    pub header: FileHeader,
    pub batches: Vec<Batch>,
    pub control: Option<FileControl>,
}

impl File {
    pub fn new(header: FileHeader) -> Self {
        File { header, batches: Vec::new(), control: None }
    }

    /// Assigns sequential batch numbers, invokes each batch's `create`,
    /// then computes the file control (spec.md §4.5).
    pub fn create(&mut self, options: &ParserOptions) -> Result<()> {
        debug!(batch_count = self.batches.len(), "creating file");
        for (i, batch) in self.batches.iter_mut().enumerate() {
            batch.header.batch_number = (i + 1) as u32;
            batch.create(options.custom_trace_numbers)?;
        }
        self.control = Some(self.compute_control());
        Ok(())
    }

    fn compute_control(&self) -> FileControl {
        let batch_count = self.batches.len() as u32;
        let entry_addenda_count: u64 = self.batches.iter().map(|b| b.entry_addenda_count() as u64).sum();
        let entry_hash: u64 = self.batches.iter().map(|b| b.entry_hash()).sum::<u64>() % 10_000_000_000;
        let total_debit: i64 = self
            .batches
            .iter()
            .filter_map(|b| b.control.as_ref())
            .map(|c| c.total_debit)
            .sum();
        let total_credit: i64 = self
            .batches
            .iter()
            .filter_map(|b| b.control.as_ref())
            .map(|c| c.total_credit)
            .sum();

        FileControl {
            batch_count,
            block_count: self.block_count(),
            entry_addenda_count,
            entry_hash,
            total_debit,
            total_credit,
        }
    }

    /// Total line count (header + per-batch header/control/entries/addenda
    /// + file control), padded with filler to a multiple of 10 (spec.md
    /// §3, the "blocking factor").
    pub fn line_count(&self) -> usize {
        let batch_lines: usize = self
            .batches
            .iter()
            .map(|b| {
                let entry_lines: usize = b.entries.iter().map(|e| 1 + e.addendas.len()).sum();
                2 + entry_lines // batch header + batch control
            })
            .sum();
        1 + batch_lines + 1 // file header + file control
    }

    pub fn block_count(&self) -> u32 {
        let lines = self.line_count();
        (lines.div_ceil(10)) as u32
    }

    /// Number of filler (`"9"` × 94) lines needed to reach the blocking
    /// factor.
    pub fn filler_line_count(&self) -> usize {
        let lines = self.line_count();
        let remainder = lines % 10;
        if remainder == 0 { 0 } else { 10 - remainder }
    }

    /// Validates that stored controls agree with a recomputation, unless
    /// the corresponding bypass option is set, and that every batch passes
    /// its own validation (spec.md §4.5, §7). Short-circuits on the first
    /// failure, reporting the batch index per spec.md §7.
    pub fn validate(&self, options: &ParserOptions) -> Result<()> {
        if self.batches.is_empty() && !options.allow_zero_batches {
            return Err(AchError::field_inclusion("batches"));
        }

        if !options.bypass_destination && self.header.immediate_destination.trim().is_empty() {
            return Err(AchError::field_inclusion("immediateDestination"));
        }

        let control = match &self.control {
            Some(c) => c,
            None if options.allow_missing_file_control => return Ok(()),
            None => return Err(AchError::field_inclusion("fileControl")),
        };

        let computed = self.compute_control();
        if control.batch_count != computed.batch_count {
            return Err(AchError::validate_opts("batchCount", control.batch_count, computed.batch_count));
        }
        if control.entry_addenda_count != computed.entry_addenda_count {
            return Err(AchError::validate_opts(
                "entryAddendaCount",
                control.entry_addenda_count,
                computed.entry_addenda_count,
            ));
        }
        if control.entry_hash != computed.entry_hash {
            if options.bypass_origin {
                warn!("entryHash mismatch ignored: bypassOrigin set");
            } else {
                return Err(AchError::validate_opts("entryHash", control.entry_hash, computed.entry_hash));
            }
        }
        if !options.allow_invalid_amounts {
            if control.total_debit != computed.total_debit {
                return Err(AchError::validate_opts("totalDebit", control.total_debit, computed.total_debit));
            }
            if control.total_credit != computed.total_credit {
                return Err(AchError::validate_opts("totalCredit", control.total_credit, computed.total_credit));
            }
        }

        if !options.bypass_company_identification_match {
            let mut ids = self.batches.iter().map(|b| &b.header.company_identification);
            if let Some(first) = ids.next() {
                for other in ids {
                    if other != first {
                        return Err(AchError::file_format(
                            0,
                            "batches disagree on companyIdentification".to_string(),
                        ));
                    }
                }
            }
        }

        for (index, batch) in self.batches.iter().enumerate() {
            batch.validate().map_err(|e| e.in_batch(index))?;
        }

        Ok(())
    }
}
