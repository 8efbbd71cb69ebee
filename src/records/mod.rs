//! The seven concrete record types of the NACHA grammar (C2).

mod batch_control;
mod batch_header;
mod entry_detail;
mod file_control;
mod file_header;

pub use batch_control::BatchControl;
pub use batch_header::BatchHeader;
pub use entry_detail::EntryDetail;
pub use file_control::FileControl;
pub use file_header::FileHeader;
