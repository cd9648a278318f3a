//! Document state and logic (UI-agnostic).

mod io;
mod ops;
mod state;

pub use ops::CellListing;
pub use state::Document;
