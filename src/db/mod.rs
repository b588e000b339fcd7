pub mod filter;
pub mod migrate;
pub mod models;
pub mod pool;
pub mod queries;
pub mod tickets;

pub use filter::EntryFilter;
pub use pool::DbPool;
