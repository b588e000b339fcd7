pub mod csv;
pub mod json;

use clap::ValueEnum;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DisplayFormat {
    Plain,
    Csv,
    Json,
}
