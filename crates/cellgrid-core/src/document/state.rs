use crate::error::Result;
use cellgrid_engine::engine::Grid;
use std::path::PathBuf;

/// UI-agnostic document state for the spreadsheet.
pub struct Document {
    /// The fixed-size sheet
    pub grid: Grid,
    /// Current file path
    pub file_path: Option<PathBuf>,
    /// Whether the grid has been modified since the last load or save
    pub modified: bool,
}

impl Document {
    /// Create an empty document of the given size.
    ///
    /// This constructor is side-effect free: it does not touch the filesystem.
    pub fn new(width: usize, height: usize) -> Self {
        Document {
            grid: Grid::new(width, height),
            file_path: None,
            modified: false,
        }
    }

    /// Create a document and load `path` if it exists.
    /// A missing file just becomes the save target.
    pub fn with_file(path: Option<PathBuf>, width: usize, height: usize) -> Result<Self> {
        let mut doc = Self::new(width, height);

        if let Some(p) = path {
            if p.exists() {
                doc.load_file(&p)?;
            } else {
                doc.file_path = Some(p);
            }
        }
        Ok(doc)
    }
}
