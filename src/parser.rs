//! The line splitter and record-classifying state machine (C2).
//!
//! Walks a raw ACH file line by line, tracking where it is in the
//! File Header → (Batch Header → entries/addenda → Batch Control)* →
//! File Control grammar and building a [`File`] as it goes.

use tracing::{debug, warn};

use crate::batch::{Batch, BatchEntry};
use crate::error::{AchError, Result};
use crate::file::{File, ParserOptions};
use crate::record::{Record, RecordKind, is_filler};
use crate::records::{BatchControl, BatchHeader, EntryDetail, FileControl, FileHeader};

/// Where the state machine currently expects the next line to fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectFileHeader,
    InBatchOrFileControl,
    InBatch,
    Done,
}

/// Parses a complete ACH file from its raw text, honoring `options`'s
/// bypass flags (spec.md §4.5, §5).
pub fn parse(text: &str, options: &ParserOptions) -> Result<File> {
    let mut state = State::ExpectFileHeader;
    let mut header: Option<FileHeader> = None;
    let mut batches: Vec<Batch> = Vec::new();
    let mut current_batch: Option<Batch> = None;
    let mut current_entry: Option<BatchEntry> = None;
    let mut control: Option<FileControl> = None;
    let mut last_line_no = 0usize;

    for (i, raw_line) in split_lines(text).enumerate() {
        let line_no = i + 1;
        last_line_no = line_no;
        if raw_line.is_empty() {
            continue;
        }

        if state == State::Done {
            if is_filler(raw_line) {
                continue;
            }
            return Err(AchError::file_format(line_no, "content after file control"));
        }

        let kind = RecordKind::classify(raw_line, line_no)?;
        debug!(line = line_no, ?kind, "parsing record");

        // `ExpectFileHeader` only ever transitions forward; when the
        // bypass is set and the first real line isn't a file header, skip
        // straight into `InBatchOrFileControl` and re-classify below.
        if state == State::ExpectFileHeader {
            if kind == RecordKind::FileHeader {
                header = Some(FileHeader::parse(raw_line, line_no)?);
                state = State::InBatchOrFileControl;
                continue;
            }
            if options.allow_missing_file_header {
                warn!(line = line_no, "allowMissingFileHeader bypass in effect");
                state = State::InBatchOrFileControl;
                // fall through to the InBatchOrFileControl handling below
            } else {
                return Err(AchError::RecordType {
                    found: raw_line[0..1].to_string(),
                    expected: "1".to_string(),
                    line: line_no,
                });
            }
        }

        match (state, kind) {
            (State::InBatchOrFileControl, RecordKind::BatchHeader) => {
                current_batch = Some(Batch::new(BatchHeader::parse(raw_line, line_no)?));
                state = State::InBatch;
            }
            (State::InBatchOrFileControl, RecordKind::FileControlOrFiller) => {
                if is_filler(raw_line) {
                    continue;
                }
                control = Some(FileControl::parse(raw_line, line_no)?);
                state = State::Done;
            }
            (State::InBatchOrFileControl, other) => {
                return Err(AchError::RecordType {
                    found: format!("{other:?}"),
                    expected: "batch header or file control".to_string(),
                    line: line_no,
                });
            }
            (State::InBatch, RecordKind::EntryDetail) => {
                if let Some(entry) = current_entry.take() {
                    current_batch.as_mut().unwrap().entries.push(entry);
                }
                current_entry = Some(BatchEntry::new(EntryDetail::parse(raw_line, line_no)?));
            }
            (State::InBatch, RecordKind::Addenda) => {
                let entry = current_entry
                    .as_mut()
                    .ok_or_else(|| AchError::file_format(line_no, "addenda with no preceding entry detail"))?;
                entry.addendas.push(crate::addenda::Addenda::parse(raw_line, line_no)?);
            }
            (State::InBatch, RecordKind::BatchControl) => {
                if let Some(entry) = current_entry.take() {
                    current_batch.as_mut().unwrap().entries.push(entry);
                }
                let mut batch = current_batch.take().unwrap();
                batch.control = Some(BatchControl::parse(raw_line, line_no)?);
                batches.push(batch);
                state = State::InBatchOrFileControl;
            }
            (State::InBatch, other) => {
                return Err(AchError::RecordType {
                    found: format!("{other:?}"),
                    expected: "entry detail, addenda or batch control".to_string(),
                    line: line_no,
                });
            }
            (State::ExpectFileHeader, _) | (State::Done, _) => unreachable!("handled above"),
        }
    }

    if let Some(entry) = current_entry.take() {
        if let Some(batch) = current_batch.as_mut() {
            batch.entries.push(entry);
        }
    }
    if let Some(batch) = current_batch.take() {
        if !options.allow_missing_file_control {
            return Err(AchError::file_format(last_line_no, "batch never closed with a batch control"));
        }
        batches.push(batch);
    }

    let header = match header {
        Some(h) => h,
        None if options.allow_missing_file_header => FileHeader::default(),
        None => return Err(AchError::field_inclusion("fileHeader")),
    };
    if control.is_none() && !options.allow_missing_file_control {
        return Err(AchError::file_format(last_line_no, "missing file control record"));
    }
    if batches.is_empty() && !options.allow_zero_batches {
        return Err(AchError::field_inclusion("batches"));
    }
    Ok(File { header, batches, control })
}

/// Splits on `\n`, tolerating a trailing `\r` (CRLF line endings) and
/// dropping a single trailing empty line left by a final newline.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut lines: Vec<&str> = text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)).collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines.into_iter()
}
