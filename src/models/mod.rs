pub mod date_exception;
pub mod entry;

pub use date_exception::DateException;
pub use entry::{Entry, EntryMeta};
