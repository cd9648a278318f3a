//! Spreadsheet engine API.
//!
//! This module provides the computation engine for the spreadsheet:
//!
//! - [`Cell`], [`CellKind`], [`Grid`] - Cell storage and the evaluation entry points
//! - [`CellRef`] - Label parsing (A1 notation ↔ column/row indices)
//! - [`classify`] - Raw text classification and formula syntax checks
//! - [`eval`] - Arithmetic over reference-free expressions
//! - [`resolve`] - Reference substitution with cycle detection
//! - [`depth`] - Dependency depth per cell
//! - [`format_number`] - Format results for display

mod cell;
mod cell_ref;
mod classify;
mod depth;
mod deps;
mod error;
mod expr;
mod format;
mod grid;
mod resolve;

pub use cell::{Cell, CellKind, Evaluation};
pub use cell_ref::{CellRef, MAX_LABEL_COLS, MAX_LABEL_ROWS};
pub use classify::{classify, is_formula, is_number, parse_number};
pub use depth::{CYCLE_DEPTH, depth};
pub use deps::{extract_dependencies, reference_tokens};
pub use error::{ERR_CYCLE, ERR_FORM, EvalError, Result};
pub use expr::eval;
pub use format::{format_number, format_outcome};
pub use grid::Grid;
pub use resolve::resolve;
