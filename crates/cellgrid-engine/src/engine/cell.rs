//! Cell data structures for the spreadsheet grid.
//!
//! - [`CellKind`] - What a cell's raw text classifies as
//! - [`Cell`] - Raw text, its kind, the cached dependency depth, and the memo
//!   of the last evaluation
//! - [`Evaluation`] - A memoised evaluation outcome, stamped with the grid
//!   revision it was computed at

use serde::{Deserialize, Serialize};

use super::classify::classify;
use super::error::EvalError;

/// The type of content stored in a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Text,
    Number,
    Formula,
    ErrorCycle,
    ErrorForm,
}

impl CellKind {
    pub fn is_error(self) -> bool {
        matches!(self, CellKind::ErrorCycle | CellKind::ErrorForm)
    }
}

/// Outcome of evaluating a formula cell at a given grid revision.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub revision: u64,
    pub outcome: Result<f64, EvalError>,
}

/// A cell in the spreadsheet grid.
#[derive(Clone, Debug)]
pub struct Cell {
    raw_text: String,
    kind: CellKind,
    computed_order: i32,
    last_evaluation: Option<Evaluation>,
}

impl Cell {
    pub fn new_empty() -> Cell {
        Cell::from_text("")
    }

    /// Create a cell from raw user text; the kind is derived immediately.
    pub fn from_text(text: &str) -> Cell {
        Cell {
            raw_text: text.to_string(),
            kind: classify(text),
            computed_order: 0,
            last_evaluation: None,
        }
    }

    /// Replace the raw text, re-deriving the kind and dropping any memo.
    pub fn set_text(&mut self, text: &str) {
        self.raw_text = text.to_string();
        self.kind = classify(text);
        self.last_evaluation = None;
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Syntactic kind of the raw text. Runtime failures are reported by
    /// [`Grid::kind`](super::Grid::kind).
    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn is_empty(&self) -> bool {
        self.kind == CellKind::Empty
    }

    /// Dependency depth as of the last [`Grid::refresh_order`](super::Grid::refresh_order).
    pub fn order(&self) -> i32 {
        self.computed_order
    }

    pub fn set_order(&mut self, order: i32) {
        self.computed_order = order;
    }

    pub fn last_evaluation(&self) -> Option<&Evaluation> {
        self.last_evaluation.as_ref()
    }

    /// The memoised outcome, if it was computed at `revision`.
    pub(crate) fn fresh_outcome(&self, revision: u64) -> Option<&Result<f64, EvalError>> {
        self.last_evaluation
            .as_ref()
            .filter(|memo| memo.revision == revision)
            .map(|memo| &memo.outcome)
    }

    pub(crate) fn memoize(&mut self, revision: u64, outcome: Result<f64, EvalError>) {
        self.last_evaluation = Some(Evaluation { revision, outcome });
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_text_round_trips_raw_text() {
        let mut cell = Cell::new_empty();
        for text in ["Hello", "123", "=A1+2", "  padded  ", ""] {
            cell.set_text(text);
            assert_eq!(cell.raw_text(), text);
        }
    }

    #[test]
    fn test_set_text_rederives_kind() {
        let mut cell = Cell::from_text("Hello");
        assert_eq!(cell.kind(), CellKind::Text);
        cell.set_text("12.5");
        assert_eq!(cell.kind(), CellKind::Number);
        cell.set_text("=(1+2");
        assert_eq!(cell.kind(), CellKind::ErrorForm);
        cell.set_text("=(1+2)");
        assert_eq!(cell.kind(), CellKind::Formula);
        cell.set_text(" ");
        assert!(cell.is_empty());
    }

    #[test]
    fn test_set_text_drops_memo() {
        let mut cell = Cell::from_text("=1/0");
        cell.memoize(3, Err(EvalError::DivisionByZero));
        assert!(cell.fresh_outcome(3).is_some());
        assert!(cell.fresh_outcome(4).is_none());

        cell.set_text("=1");
        assert!(cell.last_evaluation().is_none());
    }

    #[test]
    fn test_order_defaults_to_zero() {
        let mut cell = Cell::from_text("=A1");
        assert_eq!(cell.order(), 0);
        cell.set_order(2);
        assert_eq!(cell.order(), 2);
    }
}
