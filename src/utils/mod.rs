pub mod complete;
pub mod path;
pub mod table;
pub mod time;

pub use complete::{Completion, complete};
pub use table::Table;
