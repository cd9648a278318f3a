use super::Document;
use crate::error::{Result, SheetError};
use crate::storage::{parse_sheet, write_sheet};
use std::path::{Path, PathBuf};

impl Document {
    /// Save to current file path.
    /// Returns the path saved to.
    pub fn save_file(&mut self) -> Result<PathBuf> {
        let Some(path) = &self.file_path else {
            return Err(SheetError::NoFilePath);
        };

        write_sheet(path, &self.grid)?;
        self.modified = false;
        Ok(path.clone())
    }

    /// Save to `path` and make it the current file path.
    pub fn save_as(&mut self, path: &Path) -> Result<PathBuf> {
        self.file_path = Some(path.to_path_buf());
        self.save_file()
    }

    /// Load from file, replacing the grid. The sheet keeps its current size;
    /// lines addressing cells outside it are skipped.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        // Parse into a fresh grid first so a failed read leaves the document untouched.
        let grid = parse_sheet(path, self.grid.width(), self.grid.height())?;

        self.grid = grid;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }
}
