use super::error::EvalError;

/// Format an evaluated formula result for display.
///
/// Always carries a fractional part, so whole results read "8.0".
pub fn format_number(n: f64) -> String {
    format!("{:?}", n)
}

/// Format an evaluation outcome: the number, or the sentinel for its error.
pub fn format_outcome(outcome: &Result<f64, EvalError>) -> String {
    match outcome {
        Ok(n) => format_number(*n),
        Err(err) => err.sentinel().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CellRef, ERR_CYCLE, ERR_FORM};

    #[test]
    fn test_format_number_keeps_fraction() {
        assert_eq!(format_number(8.0), "8.0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-13.0), "-13.0");
    }

    #[test]
    fn test_format_outcome_sentinels() {
        assert_eq!(format_outcome(&Err(EvalError::DivisionByZero)), ERR_FORM);
        assert_eq!(
            format_outcome(&Err(EvalError::CircularReference(CellRef::new(0, 0)))),
            ERR_CYCLE
        );
    }
}
