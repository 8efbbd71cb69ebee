//! Parser, validator and serializer for NACHA-format ACH files, plus a
//! batch-flattening engine.
//!
//! A file is read with [`parser::parse`], inspected and mutated as a
//! [`file::File`] tree of [`batch::Batch`]es and [`records::EntryDetail`]s,
//! checked with [`file::File::validate`], and written back out with
//! [`serialize::to_string`]. [`flatten::flatten`] merges compatible batches
//! in place; [`json`] round-trips the same tree through JSON.

pub mod addenda;
pub mod batch;
pub mod error;
pub mod field;
pub mod file;
pub mod flatten;
pub mod json;
pub mod parser;
pub mod record;
pub mod records;
pub mod serialize;

pub use batch::{Batch, BatchEntry, SecCode};
pub use error::{AchError, Result};
pub use file::{File, ParserOptions};
pub use record::Record;
pub use records::{BatchControl, BatchHeader, EntryDetail, FileControl, FileHeader};
