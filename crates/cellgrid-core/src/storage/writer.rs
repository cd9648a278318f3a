//! Writer for the flat-text sheet format

use crate::error::{Result, SheetError};
use cellgrid_engine::engine::Grid;
use std::fs;
use std::path::Path;
use tracing::info;

const HEADER: &str = "# cellgrid sheet";

/// Write a Grid to a sheet file. Nothing is written when a cell cannot be stored.
pub fn write_sheet(path: &Path, grid: &Grid) -> Result<()> {
    let content = write_sheet_content(grid)?;
    fs::write(path, content)?;
    info!(path = %path.display(), "saved sheet");
    Ok(())
}

/// Write a Grid to the flat-text format, column by column
pub fn write_sheet_content(grid: &Grid) -> Result<String> {
    let mut lines = vec![HEADER.to_string()];

    for (cell_ref, cell) in grid.non_empty() {
        let text = cell.raw_text();
        // One cell per line.
        if text.contains(['\n', '\r']) {
            return Err(SheetError::Unsavable(cell_ref));
        }
        lines.push(format!("{},{},{}", cell_ref.col, cell_ref.row, text));
    }

    Ok(lines.join("\n") + "\n")
}
