//! cellgrid_engine - Spreadsheet engine: classification, arithmetic, references.

pub mod engine;
