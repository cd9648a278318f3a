//! Fixed-size cell storage and the evaluation entry points.

use std::collections::HashSet;

use tracing::debug;

use super::cell::{Cell, CellKind};
use super::cell_ref::CellRef;
use super::depth;
use super::error::{ERR_FORM, EvalError, Result};
use super::format::format_outcome;
use super::resolve::evaluate_at;

/// A `width × height` sheet, fully populated with cells from creation.
///
/// Cells are stored column-major. Every write bumps the revision counter;
/// memoised evaluations from an older revision are ignored.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    revision: u64,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Grid {
        Grid {
            width,
            height,
            cells: vec![Cell::new_empty(); width * height],
            revision: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_in(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    fn index(&self, at: CellRef) -> Option<usize> {
        self.is_in(at.col, at.row).then(|| at.col * self.height + at.row)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        self.cell(CellRef::new(x, y))
    }

    pub fn cell(&self, at: CellRef) -> Option<&Cell> {
        self.index(at).map(|i| &self.cells[i])
    }

    /// Look up a cell by label, e.g. "B3".
    pub fn get_label(&self, label: &str) -> Option<&Cell> {
        self.cell(self.parse_label(label)?)
    }

    /// Parse a label and check it against this grid's bounds.
    pub fn parse_label(&self, label: &str) -> Option<CellRef> {
        CellRef::parse_label(label).filter(|at| self.is_in(at.col, at.row))
    }

    /// Replace a cell's raw text. Returns false (and changes nothing) when
    /// the coordinate is outside the grid.
    pub fn set(&mut self, x: usize, y: usize, text: &str) -> bool {
        let Some(i) = self.index(CellRef::new(x, y)) else {
            return false;
        };
        self.cells[i].set_text(text);
        self.revision = self.revision.wrapping_add(1);
        true
    }

    pub(crate) fn memoize(&mut self, at: CellRef, outcome: Result<f64>) {
        let revision = self.revision;
        if let Some(i) = self.index(at) {
            self.cells[i].memoize(revision, outcome);
        }
    }

    /// All coordinates, column by column.
    pub fn coords(&self) -> impl Iterator<Item = CellRef> + use<> {
        let (width, height) = (self.width, self.height);
        (0..width).flat_map(move |x| (0..height).map(move |y| CellRef::new(x, y)))
    }

    /// Non-empty cells with their coordinates, column by column.
    pub fn non_empty(&self) -> impl Iterator<Item = (CellRef, &Cell)> + '_ {
        self.coords()
            .filter_map(|at| self.cell(at).map(|cell| (at, cell)))
            .filter(|(_, cell)| !cell.is_empty())
    }

    /// Evaluate the cell at (x, y) to a number.
    ///
    /// Text cells and malformed formulas are errors; empty cells are zero.
    pub fn evaluate(&mut self, x: usize, y: usize) -> Result<f64> {
        let at = CellRef::new(x, y);
        if !self.is_in(x, y) {
            return Err(EvalError::UnknownReference(at.to_string()));
        }
        // Settle acyclic dependencies bottom-up so the final resolve only
        // recurses into cells that are already memoised.
        for pending in depth::evaluation_order(self, at) {
            let mut in_progress = HashSet::from([pending]);
            let outcome = evaluate_at(self, pending, &mut in_progress);
            if pending == at {
                return outcome;
            }
        }
        let mut in_progress = HashSet::from([at]);
        evaluate_at(self, at, &mut in_progress)
    }

    /// Displayed value of the cell at (x, y).
    ///
    /// Text and numbers show their raw text, formulas their result, and any
    /// failure its sentinel. Never fails.
    pub fn value(&mut self, x: usize, y: usize) -> String {
        let Some(cell) = self.get(x, y) else {
            return ERR_FORM.to_string();
        };
        match cell.kind() {
            CellKind::Empty => String::new(),
            CellKind::Text | CellKind::Number => cell.raw_text().to_string(),
            // Syntactic kinds never carry ErrorCycle.
            CellKind::ErrorForm | CellKind::ErrorCycle => ERR_FORM.to_string(),
            CellKind::Formula => format_outcome(&self.evaluate(x, y)),
        }
    }

    /// Kind of the cell at (x, y), reporting `ErrorCycle`/`ErrorForm` for a
    /// formula whose latest evaluation failed and nothing has been edited since.
    pub fn kind(&self, x: usize, y: usize) -> Option<CellKind> {
        let cell = self.get(x, y)?;
        match cell.fresh_outcome(self.revision) {
            Some(Err(err)) => Some(err.kind()),
            _ => Some(cell.kind()),
        }
    }

    /// Dependency depth of the cell at (x, y); -1 when it sits on a cycle.
    pub fn depth(&self, x: usize, y: usize) -> i32 {
        depth::depth(self, CellRef::new(x, y))
    }

    /// Depth of every cell, indexed `[x][y]`.
    pub fn depths(&self) -> Vec<Vec<i32>> {
        depth::depths(self)
    }

    /// Store each cell's dependency depth as its computed order.
    pub fn refresh_order(&mut self) {
        let depths = self.depths();
        for (x, column) in depths.into_iter().enumerate() {
            for (y, order) in column.into_iter().enumerate() {
                if let Some(i) = self.index(CellRef::new(x, y)) {
                    self.cells[i].set_order(order);
                }
            }
        }
    }

    /// Evaluate every cell, shallowest dependencies first and cycles last.
    /// Returns the displayed values indexed `[x][y]`.
    pub fn eval_all(&mut self) -> Vec<Vec<String>> {
        self.refresh_order();

        let mut schedule: Vec<(i32, CellRef)> = self
            .non_empty()
            .filter(|(_, cell)| cell.kind() == CellKind::Formula)
            .map(|(at, cell)| (cell.order(), at))
            .collect();
        schedule.sort_by_key(|&(order, _)| if order < 0 { i32::MAX } else { order });
        debug!(formulas = schedule.len(), "evaluating sheet");

        for (_, at) in schedule {
            // Outcomes land in the cell memos; display is rendered below.
            let _ = self.evaluate(at.col, at.row);
        }

        (0..self.width)
            .map(|x| (0..self.height).map(|y| self.value(x, y)).collect())
            .collect()
    }
}
