//! cellgrid-core - Document model + flat-text storage.

pub mod document;
pub mod error;
pub mod storage;

pub use document::Document;
pub use error::{Result, SheetError};

pub use cellgrid_engine::engine::CellRef;
