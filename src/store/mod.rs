pub mod document;
pub mod error;
pub mod journal;
pub mod log_store;

pub use document::{process_log, LogDocument};
pub use error::{JournalError, LogError};
pub use journal::LogJournal;
pub use log_store::LogStore;
