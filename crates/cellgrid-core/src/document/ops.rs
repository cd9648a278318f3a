use super::Document;
use crate::error::{Result, SheetError};
use cellgrid_engine::engine::CellRef;
use tracing::debug;

/// One non-empty cell as shown to a user.
#[derive(Clone, Debug, PartialEq)]
pub struct CellListing {
    pub cell_ref: CellRef,
    pub raw: String,
    pub value: String,
    pub depth: i32,
}

impl Document {
    fn resolve_label(&self, label: &str) -> Result<CellRef> {
        self.grid
            .parse_label(label.trim())
            .ok_or_else(|| SheetError::InvalidLabel(label.to_string()))
    }

    /// Set a cell by coordinates.
    pub fn set_cell(&mut self, col: usize, row: usize, text: &str) -> Result<()> {
        if !self.grid.set(col, row, text) {
            return Err(SheetError::OutOfBounds { col, row });
        }
        debug!(cell = %CellRef::new(col, row), text, "cell set");
        self.modified = true;
        Ok(())
    }

    /// Set a cell by label, e.g. `("B2", "=A1*2")`.
    pub fn set_cell_from_input(&mut self, label: &str, text: &str) -> Result<CellRef> {
        let cell_ref = self.resolve_label(label)?;
        self.set_cell(cell_ref.col, cell_ref.row, text)?;
        Ok(cell_ref)
    }

    /// Empty a cell by label.
    pub fn clear_cell(&mut self, label: &str) -> Result<CellRef> {
        self.set_cell_from_input(label, "")
    }

    /// Displayed value of a cell by label.
    pub fn value_at(&mut self, label: &str) -> Result<String> {
        let cell_ref = self.resolve_label(label)?;
        Ok(self.grid.value(cell_ref.col, cell_ref.row))
    }

    /// Dependency depth of a cell by label.
    pub fn depth_at(&self, label: &str) -> Result<i32> {
        let cell_ref = self.resolve_label(label)?;
        Ok(self.grid.depth(cell_ref.col, cell_ref.row))
    }

    /// Evaluate the whole sheet and list every non-empty cell, column by column.
    pub fn listing(&mut self) -> Vec<CellListing> {
        let values = self.grid.eval_all();
        self.grid
            .non_empty()
            .map(|(cell_ref, cell)| CellListing {
                cell_ref,
                raw: cell.raw_text().to_string(),
                value: values[cell_ref.col][cell_ref.row].clone(),
                depth: cell.order(),
            })
            .collect()
    }
}
