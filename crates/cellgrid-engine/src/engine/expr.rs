//! Arithmetic over plain numeric expressions.
//!
//! The evaluator knows nothing about cells: references have already been
//! replaced by numbers when an expression reaches [`eval`]. Parentheses are
//! resolved innermost-first by evaluating the enclosed group and splicing the
//! result back into the text; what remains is a flat expression evaluated with
//! an operand stack and an operator stack.

use super::error::{EvalError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    fn from_byte(b: u8) -> Option<Op> {
        match b {
            b'+' => Some(Op::Add),
            b'-' => Some(Op::Sub),
            b'*' => Some(Op::Mul),
            b'/' => Some(Op::Div),
            _ => None,
        }
    }

    fn precedence(self) -> u8 {
        match self {
            Op::Add | Op::Sub => 1,
            Op::Mul | Op::Div => 2,
        }
    }

    fn apply(self, lhs: f64, rhs: f64) -> Result<f64> {
        let result = match self {
            Op::Add => lhs + rhs,
            Op::Sub => lhs - rhs,
            Op::Mul => lhs * rhs,
            Op::Div => {
                if rhs == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                lhs / rhs
            }
        };
        finite(result)
    }
}

/// Evaluate an arithmetic expression such as `"(5 + 5)/ 2"`.
///
/// Whitespace is ignored. Supports `+ - * /`, parentheses, decimal literals,
/// and a leading minus on a literal at the start of the expression or right
/// after another operator.
pub fn eval(expression: &str) -> Result<f64> {
    let mut expr: String = expression.chars().filter(|c| !c.is_whitespace()).collect();

    while let Some(open) = expr.rfind('(') {
        let close = expr[open..]
            .find(')')
            .map(|offset| open + offset)
            .ok_or_else(|| EvalError::malformed("unmatched '('"))?;

        // A group must stand where an operand can: "5(2)" and "(1)(2)" are not products.
        let before = expr[..open].bytes().last();
        let after = expr[close + 1..].bytes().next();
        if before.is_some_and(|b| !is_group_boundary(b)) || after.is_some_and(|b| !is_group_boundary(b)) {
            return Err(EvalError::malformed("parenthesised group next to an operand"));
        }
        // Minus only signs literals, never a whole group.
        if before == Some(b'-') && is_sign_position(expr.as_bytes(), open - 1) {
            return Err(EvalError::malformed("unary minus before a parenthesised group"));
        }

        let inner = eval_flat(&expr[open + 1..close])?;
        expr = format!("{}{}{}", &expr[..open], render_operand(inner), &expr[close + 1..]);
    }

    eval_flat(&expr)
}

/// Render a number so it can be spliced back into an expression.
///
/// `Display` for `f64` never switches to exponent notation, so the text always
/// re-parses as a plain decimal literal.
pub fn render_operand(value: f64) -> String {
    format!("{}", value)
}

fn is_group_boundary(b: u8) -> bool {
    Op::from_byte(b).is_some() || b == b'(' || b == b')'
}

/// Whether the '-' at `index` sits where it would sign an operand.
fn is_sign_position(bytes: &[u8], index: usize) -> bool {
    match index.checked_sub(1).map(|i| bytes[i]) {
        None => true,
        Some(prev) => Op::from_byte(prev).is_some() || prev == b'(',
    }
}

fn finite(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFinite)
    }
}

/// Evaluate an expression without parentheses, honouring `*`/`/` over `+`/`-`.
fn eval_flat(expr: &str) -> Result<f64> {
    if expr.is_empty() {
        return Err(EvalError::malformed("empty expression"));
    }

    let bytes = expr.as_bytes();
    let mut operands: Vec<f64> = Vec::new();
    let mut operators: Vec<Op> = Vec::new();
    let mut expect_operand = true;
    let mut i = 0;

    while i < bytes.len() {
        if expect_operand {
            let start = i;
            if bytes[i] == b'-' {
                i += 1;
            }
            let digits = i;
            while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                i += 1;
            }
            if i == digits {
                return Err(EvalError::malformed(format!(
                    "expected a number at offset {} in '{}'",
                    start, expr
                )));
            }
            let literal = &expr[start..i];
            let value = literal
                .parse::<f64>()
                .map_err(|_| EvalError::malformed(format!("invalid number '{}'", literal)))?;
            operands.push(value);
            expect_operand = false;
        } else {
            let op = Op::from_byte(bytes[i]).ok_or_else(|| {
                EvalError::malformed(format!("unexpected character at offset {} in '{}'", i, expr))
            })?;
            while let Some(&top) = operators.last() {
                if top.precedence() < op.precedence() {
                    break;
                }
                operators.pop();
                reduce(&mut operands, top)?;
            }
            operators.push(op);
            expect_operand = true;
            i += 1;
        }
    }

    if expect_operand {
        return Err(EvalError::malformed("expression ends with an operator"));
    }

    while let Some(op) = operators.pop() {
        reduce(&mut operands, op)?;
    }

    match operands.as_slice() {
        [value] => finite(*value),
        _ => Err(EvalError::malformed("dangling operands")),
    }
}

fn reduce(operands: &mut Vec<f64>, op: Op) -> Result<()> {
    let (Some(rhs), Some(lhs)) = (operands.pop(), operands.pop()) else {
        return Err(EvalError::malformed("operator is missing an operand"));
    };
    operands.push(op.apply(lhs, rhs)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_parenthesised_examples() {
        assert_eq!(eval("(5 + 5)/ 2").unwrap(), 5.0);
        assert_eq!(eval("(2+3)*1").unwrap(), 5.0);
        assert_eq!(eval("(10*100)/100").unwrap(), 10.0);
    }

    #[test]
    fn test_eval_precedence_and_associativity() {
        assert_eq!(eval("2+3*4").unwrap(), 14.0);
        assert_eq!(eval("2*3+4").unwrap(), 10.0);
        assert_eq!(eval("10-4-3").unwrap(), 3.0);
        assert_eq!(eval("100/10/5").unwrap(), 2.0);
        assert_eq!(eval("8-6/3*2").unwrap(), 4.0);
        assert_eq!(eval("1+2*3-4/2").unwrap(), 5.0);
    }

    #[test]
    fn test_eval_nested_parentheses() {
        assert_eq!(eval("((2))").unwrap(), 2.0);
        assert_eq!(eval("(1+(2*(3+1)))*2").unwrap(), 18.0);
        assert_eq!(eval("(1+2)*(3+4)").unwrap(), 21.0);
        assert_eq!(eval("(2)-(3)").unwrap(), -1.0);
    }

    #[test]
    fn test_eval_unary_minus_on_literals() {
        assert_eq!(eval("-5+2").unwrap(), -3.0);
        assert_eq!(eval("2*-3").unwrap(), -6.0);
        assert_eq!(eval("2--3").unwrap(), 5.0);
        assert_eq!(eval("2-(0-3)").unwrap(), 5.0);
        assert_eq!(eval("(0-2)*(0-3)").unwrap(), 6.0);
        assert!(eval("--3").is_err());
        assert!(eval("-(3)").is_err());
        assert!(eval("+3").is_err());
    }

    #[test]
    fn test_eval_decimals() {
        assert_eq!(eval("1.5*2").unwrap(), 3.0);
        assert_eq!(eval(".5+.25").unwrap(), 0.75);
        assert!(matches!(eval("1.2.3"), Err(EvalError::MalformedExpression(_))));
        assert!(matches!(eval("."), Err(EvalError::MalformedExpression(_))));
    }

    #[test]
    fn test_eval_tiny_and_huge_intermediates_resplice() {
        assert_eq!(render_operand(0.0000001), "0.0000001");
        assert_eq!(render_operand(1e21), "1000000000000000000000");
        assert_eq!(eval("(1/4)*8").unwrap(), 2.0);
        assert_eq!(eval("(1000000000000000000000*10)/1000000000000000000000").unwrap(), 10.0);
    }

    #[test]
    fn test_eval_malformed() {
        for expr in ["", "()", "1+", "1**2", "*1", "(1+2", "1+2)", "5(2)", "(1)(2)", "2(", "a+1", "1^2"] {
            assert!(
                matches!(eval(expr), Err(EvalError::MalformedExpression(_))),
                "expected malformed for {:?}",
                expr
            );
        }
    }

    #[test]
    fn test_eval_division_by_zero() {
        assert_eq!(eval("5/0"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("1/(2-2)"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("0/5").unwrap(), 0.0);
    }

    #[test]
    fn test_eval_overflow_is_non_finite() {
        let big = render_operand(f64::MAX);
        assert_eq!(eval(&format!("{}*10", big)), Err(EvalError::NonFinite));
    }
}
