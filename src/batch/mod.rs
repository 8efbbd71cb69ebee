//! Batch variants (C4): one batch, one SEC code, one set of entries each
//! owning zero or more addenda.

mod sec;

pub use sec::SecCode;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::addenda::{Addenda, Addenda05, IatAddenda};
use crate::error::{AchError, Result};
use crate::field::write_numeric_u64;
use crate::records::{BatchControl, BatchHeader, EntryDetail};

/// An entry and the addenda it owns.
///
/// Serializes per spec.md §6 as the entry detail's fields flattened at the
/// top level, plus `addenda02`/`addenda05`/`addenda98`/`addenda99` (and,
/// beyond what the spec names, `iatAddenda`, so IAT entries round-trip
/// without silently dropping addenda) buckets partitioned from
/// [`Self::addendas`] by variant. A plain derive can't express this
/// restructuring, so [`Serialize`]/[`Deserialize`] are hand-written below;
/// the underlying `addendas: Vec<Addenda>` field the rest of the crate
/// (batch validation, flattening, parsing) depends on is unchanged.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct BatchEntry {
    pub detail: EntryDetail,
    pub addendas: Vec<Addenda>,
}

impl BatchEntry {
    pub fn new(detail: EntryDetail) -> Self {
        BatchEntry { detail, addendas: Vec::new() }
    }

    fn addenda05_count(&self) -> usize {
        self.addendas
            .iter()
            .filter(|a| matches!(a, Addenda::Addenda05(_)))
            .count()
    }
}

impl Serialize for BatchEntry {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::Error;

        let mut value = serde_json::to_value(&self.detail).map_err(S::Error::custom)?;
        let obj = value
            .as_object_mut()
            .ok_or_else(|| S::Error::custom("entry detail did not serialize to a JSON object"))?;

        let addenda02 = self.addendas.iter().find_map(|a| match a {
            Addenda::Addenda02(a) => Some(a.clone()),
            _ => None,
        });
        let addenda05: Vec<Addenda05> = self
            .addendas
            .iter()
            .filter_map(|a| match a {
                Addenda::Addenda05(a) => Some(a.clone()),
                _ => None,
            })
            .collect();
        let addenda98 = self.addendas.iter().find_map(|a| match a {
            Addenda::Addenda98(a) => Some(a.clone()),
            _ => None,
        });
        let addenda99 = self.addendas.iter().find_map(|a| match a {
            Addenda::Addenda99(a) => Some(a.clone()),
            _ => None,
        });
        let iat_addenda: Vec<IatAddenda> = self
            .addendas
            .iter()
            .filter_map(|a| match a {
                Addenda::Iat(a) => Some(a.clone()),
                _ => None,
            })
            .collect();

        obj.insert("addenda02".to_string(), serde_json::to_value(&addenda02).map_err(S::Error::custom)?);
        obj.insert("addenda05".to_string(), serde_json::to_value(&addenda05).map_err(S::Error::custom)?);
        obj.insert("addenda98".to_string(), serde_json::to_value(&addenda98).map_err(S::Error::custom)?);
        obj.insert("addenda99".to_string(), serde_json::to_value(&addenda99).map_err(S::Error::custom)?);
        if !iat_addenda.is_empty() {
            obj.insert("iatAddenda".to_string(), serde_json::to_value(&iat_addenda).map_err(S::Error::custom)?);
        }

        value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BatchEntry {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let mut value = serde_json::Value::deserialize(deserializer)?;
        let detail: EntryDetail = serde_json::from_value(value.clone()).map_err(D::Error::custom)?;

        let obj = value
            .as_object_mut()
            .ok_or_else(|| D::Error::custom("entry is not a JSON object"))?;

        let mut addendas = Vec::new();
        if let Some(v) = obj.remove("addenda02") {
            if !v.is_null() {
                addendas.push(Addenda::Addenda02(serde_json::from_value(v).map_err(D::Error::custom)?));
            }
        }
        if let Some(v) = obj.remove("addenda05") {
            let list: Vec<Addenda05> = serde_json::from_value(v).map_err(D::Error::custom)?;
            addendas.extend(list.into_iter().map(Addenda::Addenda05));
        }
        if let Some(v) = obj.remove("addenda98") {
            if !v.is_null() {
                addendas.push(Addenda::Addenda98(serde_json::from_value(v).map_err(D::Error::custom)?));
            }
        }
        if let Some(v) = obj.remove("addenda99") {
            if !v.is_null() {
                addendas.push(Addenda::Addenda99(serde_json::from_value(v).map_err(D::Error::custom)?));
            }
        }
        if let Some(v) = obj.remove("iatAddenda") {
            let list: Vec<IatAddenda> = serde_json::from_value(v).map_err(D::Error::custom)?;
            addendas.extend(list.into_iter().map(Addenda::Iat));
        }

        Ok(BatchEntry { detail, addendas })
    }
}

/// One batch: a header, its entries, and (once [`Batch::create`] has run)
/// its control record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Batch {
    #[serde(rename = "batchHeader")]
    pub header: BatchHeader,
    #[serde(rename = "entryDetails")]
    pub entries: Vec<BatchEntry>,
    #[serde(rename = "batchControl")]
    pub control: Option<BatchControl>,
}

impl Batch {
    pub fn new(header: BatchHeader) -> Self {
        Batch { header, entries: Vec::new(), control: None }
    }

    pub fn sec_code(&self) -> Result<SecCode> {
        SecCode::parse(&self.header.standard_entry_class_code)
    }

    /// Assigns sequential trace numbers (unless `custom_trace_numbers` is
    /// set), sets each entry's addenda-record indicator, and writes the
    /// batch control with computed totals and entry hash (spec.md §4.4).
    pub fn create(&mut self, custom_trace_numbers: bool) -> Result<()> {
        debug!(batch_number = self.header.batch_number, "creating batch");
        let odfi = self.header.originating_dfi_identification.clone();
        if !custom_trace_numbers {
            for (i, entry) in self.entries.iter_mut().enumerate() {
                let sequence = i + 1;
                entry.detail.trace_number = format!("{odfi:0>8}{sequence:0>7}");
            }
        } else {
            warn!(batch_number = self.header.batch_number, "customTraceNumbers bypass in effect");
        }

        for entry in &mut self.entries {
            entry.detail.addenda_record_indicator = !entry.addendas.is_empty();
        }

        self.control = Some(self.compute_control());
        Ok(())
    }

    fn compute_control(&self) -> BatchControl {
        let entry_addenda_count = self
            .entries
            .iter()
            .map(|e| 1 + e.addendas.len() as u32)
            .sum();
        let entry_hash: u64 = self
            .entries
            .iter()
            .filter_map(|e| e.detail.rdfi_identification.parse::<u64>().ok())
            .sum();
        let total_debit: i64 = self
            .entries
            .iter()
            .filter(|e| e.detail.is_debit())
            .map(|e| e.detail.amount)
            .sum();
        let total_credit: i64 = self
            .entries
            .iter()
            .filter(|e| e.detail.is_credit())
            .map(|e| e.detail.amount)
            .sum();

        BatchControl {
            service_class_code: self.header.service_class_code.clone(),
            entry_addenda_count,
            entry_hash: entry_hash % 10_000_000_000,
            total_debit,
            total_credit,
            company_identification: self.header.company_identification.clone(),
            message_authentication_code: String::new(),
            originating_dfi_identification: self.header.originating_dfi_identification.clone(),
            batch_number: self.header.batch_number,
        }
    }

    /// Validates SEC-specific entry/addenda rules plus the batch control's
    /// totals against a recomputation (spec.md §4.4, §7).
    pub fn validate(&self) -> Result<()> {
        let sec = self.sec_code()?;

        let mut seen_trace_numbers = HashSet::new();
        for entry in &self.entries {
            if !seen_trace_numbers.insert(entry.detail.trace_number.clone()) {
                return Err(AchError::file_format(
                    0,
                    format!("duplicate trace number {}", entry.detail.trace_number),
                ));
            }

            sec.validate_transaction_code(&entry.detail.transaction_code)?;
            sec.validate_payment_type(&entry.detail.discretionary_data)?;

            let addenda05_count = entry.addenda05_count() as u32;
            if addenda05_count > sec.max_addenda05() {
                return Err(AchError::file_format(
                    0,
                    format!(
                        "{} entry carries {addenda05_count} Addenda05 records, max {}",
                        sec.code(),
                        sec.max_addenda05()
                    ),
                ));
            }

            if !entry.detail.check_digit_is_valid() {
                return Err(AchError::file_format(
                    0,
                    format!("invalid check digit for RDFI {}", entry.detail.rdfi_identification),
                ));
            }
        }

        match &self.control {
            Some(control) => self.validate_control(control),
            None => Err(AchError::field_inclusion("batchControl")),
        }
    }

    fn validate_control(&self, control: &BatchControl) -> Result<()> {
        let computed = self.compute_control();
        if control.entry_addenda_count != computed.entry_addenda_count {
            return Err(AchError::validate_opts(
                "entryAddendaCount",
                control.entry_addenda_count,
                computed.entry_addenda_count,
            ));
        }
        if control.entry_hash != computed.entry_hash {
            return Err(AchError::validate_opts("entryHash", control.entry_hash, computed.entry_hash));
        }
        if control.total_debit != computed.total_debit {
            return Err(AchError::validate_opts("totalDebit", control.total_debit, computed.total_debit));
        }
        if control.total_credit != computed.total_credit {
            return Err(AchError::validate_opts("totalCredit", control.total_credit, computed.total_credit));
        }
        Ok(())
    }

    /// Recomputes the batch control from the current entries without
    /// touching trace numbers, used by the flattener (C6) which must
    /// preserve the trace numbers entries already carry.
    pub fn recompute_control(&mut self) {
        self.control = Some(self.compute_control());
    }

    /// Every trace number this batch's entries carry.
    pub fn trace_numbers(&self) -> HashSet<String> {
        self.entries.iter().map(|e| e.detail.trace_number.clone()).collect()
    }

    /// Sum of (1 + addenda count) across all entries.
    pub fn entry_addenda_count(&self) -> u32 {
        self.entries.iter().map(|e| 1 + e.addendas.len() as u32).sum()
    }

    /// Lower-10-digit sum of RDFI identifications, per spec.md §3.
    pub fn entry_hash(&self) -> u64 {
        write_numeric_u64(
            self.entries
                .iter()
                .filter_map(|e| e.detail.rdfi_identification.parse::<u64>().ok())
                .sum(),
            10,
        )
        .parse()
        .unwrap_or(0)
    }
}
