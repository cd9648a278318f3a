//! Flat-text sheet storage.
//!
//! The first line is reserved and ignored on load. Every following line is
//! `column,row,raw_text` with zero-based coordinates. Only non-empty cells are
//! written, and the loader skips lines it cannot use.

mod parser;
mod writer;

pub use parser::{parse_sheet, parse_sheet_content};
pub use writer::{write_sheet, write_sheet_content};
