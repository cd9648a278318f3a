//! Dependency depth of formula cells.
//!
//! The depth of a formula is one more than the deepest cell it references;
//! literals, text and empty cells sit at depth 0. A depth-first walk marks the
//! cells on the current path and reports -1 when it runs back into one of
//! them, so cycles surface as a value instead of an error. The walk is
//! read-only and independent of formula evaluation.

use std::collections::{HashMap, HashSet};

use super::cell::CellKind;
use super::cell_ref::CellRef;
use super::deps::extract_dependencies;
use super::grid::Grid;

/// Depth marking a cell that takes part in, or leads into, a cycle.
pub const CYCLE_DEPTH: i32 = -1;

/// Dependency depth of the cell at `start`.
pub fn depth(grid: &Grid, start: CellRef) -> i32 {
    DepthWalk::new(grid).depth_of(start)
}

/// Depth of every cell, indexed `[col][row]`, sharing one walk across the sheet.
pub fn depths(grid: &Grid) -> Vec<Vec<i32>> {
    let mut walk = DepthWalk::new(grid);
    let mut columns = Vec::with_capacity(grid.width());
    for x in 0..grid.width() {
        let mut column = Vec::with_capacity(grid.height());
        for y in 0..grid.height() {
            column.push(walk.depth_of(CellRef::new(x, y)));
        }
        columns.push(column);
    }
    columns
}

/// Formulas `start` needs whose outcome is not memoised for the current
/// revision, dependencies before dependents, `start` itself last.
///
/// Formulas that reach a cycle are left out. Memoised formulas are treated as
/// leaves.
pub(crate) fn evaluation_order(grid: &Grid, start: CellRef) -> Vec<CellRef> {
    let mut walk = DepthWalk::new(grid);
    walk.stop_at_memoised = true;
    walk.depth_of(start);
    walk.finished_order
}

struct Frame {
    at: CellRef,
    deps: std::vec::IntoIter<CellRef>,
    deepest: i32,
}

impl Frame {
    fn absorb(&mut self, dep_depth: i32) {
        if dep_depth == CYCLE_DEPTH {
            self.deepest = CYCLE_DEPTH;
        } else if self.deepest != CYCLE_DEPTH {
            self.deepest = self.deepest.max(dep_depth + 1);
        }
    }
}

/// Depth-first walk with an explicit stack, remembering every finished cell.
///
/// A finished `-1` is final: a cell that ran into the path was itself on a
/// cycle or led into one.
struct DepthWalk<'a> {
    grid: &'a Grid,
    finished: HashMap<CellRef, i32>,
    finished_order: Vec<CellRef>,
    stop_at_memoised: bool,
}

impl<'a> DepthWalk<'a> {
    fn new(grid: &'a Grid) -> Self {
        DepthWalk {
            grid,
            finished: HashMap::new(),
            finished_order: Vec::new(),
            stop_at_memoised: false,
        }
    }

    /// In-bounds references of a formula cell, or `None` for a leaf.
    fn references(&self, at: CellRef) -> Option<Vec<CellRef>> {
        let cell = self.grid.cell(at)?;
        if cell.kind() != CellKind::Formula {
            return None;
        }
        if self.stop_at_memoised && cell.fresh_outcome(self.grid.revision()).is_some() {
            return None;
        }
        let deps = extract_dependencies(cell.raw_text())
            .into_iter()
            .filter(|dep| self.grid.is_in(dep.col, dep.row))
            .collect();
        Some(deps)
    }

    fn finish(&mut self, at: CellRef, depth: i32) {
        self.finished.insert(at, depth);
        if depth != CYCLE_DEPTH {
            self.finished_order.push(at);
        }
    }

    fn depth_of(&mut self, start: CellRef) -> i32 {
        if let Some(&known) = self.finished.get(&start) {
            return known;
        }
        let Some(deps) = self.references(start) else {
            return 0;
        };

        let mut on_path = HashSet::from([start]);
        let mut stack = vec![Frame {
            at: start,
            deps: deps.into_iter(),
            deepest: 0,
        }];

        loop {
            let Some(frame) = stack.last_mut() else {
                return 0;
            };
            let next = if frame.deepest == CYCLE_DEPTH {
                None
            } else {
                frame.deps.next()
            };

            let Some(dep) = next else {
                let Some(done) = stack.pop() else {
                    return 0;
                };
                on_path.remove(&done.at);
                self.finish(done.at, done.deepest);
                match stack.last_mut() {
                    Some(parent) => parent.absorb(done.deepest),
                    None => return done.deepest,
                }
                continue;
            };

            let known = if on_path.contains(&dep) {
                Some(CYCLE_DEPTH)
            } else {
                self.finished.get(&dep).copied()
            };
            let dep_depth = match known {
                Some(depth) => depth,
                None => match self.references(dep) {
                    Some(deps) => {
                        on_path.insert(dep);
                        stack.push(Frame {
                            at: dep,
                            deps: deps.into_iter(),
                            deepest: 0,
                        });
                        continue;
                    }
                    None => 0,
                },
            };
            if let Some(frame) = stack.last_mut() {
                frame.absorb(dep_depth);
            }
        }
    }
}
