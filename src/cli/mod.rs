pub mod commands;
pub mod dispatch;
pub mod hooks;
pub mod parser;
pub mod registry;
