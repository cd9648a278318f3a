//! Evaluation errors and their display sentinels.

use thiserror::Error;

use super::cell::CellKind;
use super::cell_ref::CellRef;

/// Sentinel displayed for a circular reference.
pub const ERR_CYCLE: &str = "ERR_CYCLE!!!";
/// Sentinel displayed for every other evaluation failure.
pub const ERR_FORM: &str = "ERR_FORM!!!";

/// Errors that can occur while evaluating a formula or an expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Malformed expression: {0}")]
    MalformedExpression(String),

    #[error("Unknown reference: {0}")]
    UnknownReference(String),

    #[error("Circular reference through {0}")]
    CircularReference(CellRef),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Result is not a finite number")]
    NonFinite,

    #[error("Cell {0} holds text, not a number")]
    TextReference(CellRef),
}

impl EvalError {
    pub(crate) fn malformed(message: impl Into<String>) -> EvalError {
        EvalError::MalformedExpression(message.into())
    }

    /// The cell kind a failing cell reports.
    pub fn kind(&self) -> CellKind {
        match self {
            EvalError::CircularReference(_) => CellKind::ErrorCycle,
            _ => CellKind::ErrorForm,
        }
    }

    /// The fixed display string for this failure.
    pub fn sentinel(&self) -> &'static str {
        match self.kind() {
            CellKind::ErrorCycle => ERR_CYCLE,
            _ => ERR_FORM,
        }
    }
}

pub type Result<T> = std::result::Result<T, EvalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_cycles_map_to_cycle_sentinel() {
        let cycle = EvalError::CircularReference(CellRef::new(0, 0));
        assert_eq!(cycle.sentinel(), ERR_CYCLE);
        assert_eq!(cycle.kind(), CellKind::ErrorCycle);

        for err in [
            EvalError::malformed("x"),
            EvalError::UnknownReference("AA1".to_string()),
            EvalError::DivisionByZero,
            EvalError::NonFinite,
            EvalError::TextReference(CellRef::new(1, 1)),
        ] {
            assert_eq!(err.sentinel(), ERR_FORM);
            assert_eq!(err.kind(), CellKind::ErrorForm);
        }
    }
}
