//! Storage formats for sheets

mod parser;
mod writer;

pub use parser::{parse_sheet, parse_sheet_content};
pub use writer::{write_sheet, write_sheet_content};
