//! Error types for cellgrid core.

use cellgrid_engine::engine::CellRef;
use thiserror::Error;

/// Errors that can occur while editing, loading, or saving a sheet.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No file path set")]
    NoFilePath,

    #[error("Cell ({col}, {row}) is outside the sheet")]
    OutOfBounds { col: usize, row: usize },

    #[error("Invalid cell label: {0}")]
    InvalidLabel(String),

    #[error("Cell {0} contains a line break and cannot be saved")]
    Unsavable(CellRef),
}

pub type Result<T> = std::result::Result<T, SheetError>;
