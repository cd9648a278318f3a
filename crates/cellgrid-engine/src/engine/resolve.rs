//! Formula resolution: substitute references, then evaluate.
//!
//! Each reference in a formula is replaced by the referenced cell's value,
//! evaluating that cell first if it is itself a formula. The set of cells on
//! the active recursion path travels with the calls; meeting one of them
//! again means the formula reaches back into itself.

use std::collections::HashSet;

use tracing::{debug, trace};

use super::cell::CellKind;
use super::cell_ref::CellRef;
use super::classify::parse_number;
use super::deps::reference_tokens;
use super::error::{EvalError, Result};
use super::expr::{eval, render_operand};
use super::grid::Grid;

/// Resolve the references in `formula` (owned by `current`) and evaluate it.
///
/// `in_progress` holds the cells whose formulas are on the call stack. Every
/// coordinate this call adds is removed again before it returns, whatever the
/// outcome, so sibling references to a shared cell are not mistaken for a
/// cycle.
pub fn resolve(
    formula: &str,
    current: CellRef,
    grid: &mut Grid,
    in_progress: &mut HashSet<CellRef>,
) -> Result<f64> {
    let expression: String = formula
        .trim_start()
        .strip_prefix('=')
        .unwrap_or(formula)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let mut substituted = String::with_capacity(expression.len());
    let mut copied_to = 0;

    // Spans only, so no borrow of the regex matcher lives across the recursion.
    let spans: Vec<(usize, usize)> = reference_tokens(&expression)
        .map(|token| (token.start(), token.end()))
        .collect();

    for (start, end) in spans {
        substituted.push_str(&expression[copied_to..start]);
        copied_to = end;

        let label = &expression[start..end];
        let target = grid
            .parse_label(label)
            .ok_or_else(|| EvalError::UnknownReference(label.to_string()))?;

        if target == current || in_progress.contains(&target) {
            debug!(cell = %current, reference = %target, "circular reference");
            return Err(EvalError::CircularReference(target));
        }

        in_progress.insert(target);
        let value = evaluate_at(grid, target, in_progress);
        in_progress.remove(&target);

        // Parenthesised so a negative value keeps its sign and "5A1" stays malformed.
        substituted.push('(');
        substituted.push_str(&render_operand(value?));
        substituted.push(')');
    }
    substituted.push_str(&expression[copied_to..]);

    trace!(cell = %current, expression = %substituted, "evaluating substituted formula");
    eval(&substituted)
}

/// Numeric value of the cell at `at`, evaluating it if it holds a formula.
///
/// Empty cells count as zero. Formula outcomes are memoised on the cell for
/// the current grid revision.
pub(crate) fn evaluate_at(
    grid: &mut Grid,
    at: CellRef,
    in_progress: &mut HashSet<CellRef>,
) -> Result<f64> {
    let revision = grid.revision();
    let Some(cell) = grid.cell(at) else {
        return Err(EvalError::UnknownReference(at.to_string()));
    };

    match cell.kind() {
        CellKind::Empty => Ok(0.0),
        CellKind::Number => parse_number(cell.raw_text())
            .ok_or_else(|| EvalError::malformed(format!("bad number in {}", at))),
        CellKind::Text => Err(EvalError::TextReference(at)),
        // Syntactic kinds never carry ErrorCycle.
        CellKind::ErrorForm | CellKind::ErrorCycle => {
            Err(EvalError::malformed(format!("invalid formula in {}", at)))
        }
        CellKind::Formula => {
            if let Some(outcome) = cell.fresh_outcome(revision) {
                return outcome.clone();
            }
            let formula = cell.raw_text().to_string();
            let outcome = resolve(&formula, at, grid, in_progress);
            if let Err(err) = &outcome {
                debug!(cell = %at, error = %err, "formula evaluation failed");
            }
            grid.memoize(at, outcome.clone());
            outcome
        }
    }
}
