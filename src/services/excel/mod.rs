#[cfg(test)]
pub(crate) mod fixtures;
pub mod header;
pub mod reader;
pub mod types;
pub mod utils;

pub use reader::load_workbook;
pub use types::RawSheet;
