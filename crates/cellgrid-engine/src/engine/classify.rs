//! Classification of raw cell text.
//!
//! Every write to a cell runs its text through [`classify`]:
//! - Empty string or whitespace -> Empty
//! - Valid floating-point literal -> Number
//! - Starts with '=' -> Formula if the expression is well formed, else ErrorForm
//! - Otherwise -> Text

use super::cell::CellKind;

/// Classify raw cell text.
pub fn classify(text: &str) -> CellKind {
    if text.trim().is_empty() {
        return CellKind::Empty;
    }

    if is_number(text) {
        return CellKind::Number;
    }

    if let Some(expression) = text.strip_prefix('=') {
        return if is_valid_expression(expression) {
            CellKind::Formula
        } else {
            CellKind::ErrorForm
        };
    }

    CellKind::Text
}

/// Parse a numeric literal, e.g. "42", "-3.5", "1e3".
///
/// Rust's float parser also accepts words like "inf" and "NaN"; those are text
/// in a cell, so only digits, signs, '.', and exponent markers are allowed.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    let plausible = text.bytes().any(|b| b.is_ascii_digit())
        && text
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'+' | b'-' | b'e' | b'E'));
    if !plausible {
        return None;
    }
    text.parse::<f64>().ok()
}

pub fn is_number(text: &str) -> bool {
    parse_number(text).is_some()
}

/// Check formula text (with its leading '=') for syntactic validity.
pub fn is_formula(text: &str) -> bool {
    text.strip_prefix('=').is_some_and(is_valid_expression)
}

/// Single left-to-right scan over the expression after '='.
fn is_valid_expression(expression: &str) -> bool {
    let expression = expression.trim();
    if expression.is_empty() {
        return false;
    }

    let mut open_parens = 0usize;
    // A leading operator is as invalid as a doubled one.
    let mut after_operator = true;

    for c in expression.chars() {
        match c {
            '0'..='9' | '.' | 'A'..='Z' | 'a'..='z' => after_operator = false,
            '+' | '-' | '*' | '/' => {
                if after_operator {
                    return false;
                }
                after_operator = true;
            }
            '(' => {
                open_parens += 1;
                after_operator = true;
            }
            ')' => {
                if open_parens == 0 || after_operator {
                    return false;
                }
                open_parens -= 1;
            }
            _ => return false,
        }
    }

    open_parens == 0 && !after_operator
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_basic_kinds() {
        assert_eq!(classify(""), CellKind::Empty);
        assert_eq!(classify("   "), CellKind::Empty);
        assert_eq!(classify("42"), CellKind::Number);
        assert_eq!(classify("-3.5"), CellKind::Number);
        assert_eq!(classify("+1e3"), CellKind::Number);
        assert_eq!(classify("2.5E-2"), CellKind::Number);
        assert_eq!(classify("Hello"), CellKind::Text);
        assert_eq!(classify("inf"), CellKind::Text);
        assert_eq!(classify("NaN"), CellKind::Text);
        assert_eq!(classify("1.2.3"), CellKind::Text);
        assert_eq!(classify("=1+2"), CellKind::Formula);
        assert_eq!(classify("=1+"), CellKind::ErrorForm);
    }

    #[test]
    fn test_classify_is_idempotent() {
        for text in ["", "5", "abc", "=A1*(2+B3)", "=(1", "=-1", "12e"] {
            assert_eq!(classify(text), classify(text));
        }
    }

    #[test]
    fn test_formula_accepts_references_and_parens() {
        assert!(is_formula("=A1+3"));
        assert!(is_formula("=(a1+b2)*c3"));
        assert!(is_formula("=((2))"));
        assert!(is_formula("= 5*2 "));
        assert!(is_formula("=3.25/0.5"));
    }

    #[test]
    fn test_formula_rejects_operator_placement() {
        assert!(!is_formula("="));
        assert!(!is_formula("=   "));
        assert!(!is_formula("=+1"));
        assert!(!is_formula("=-1"));
        assert!(!is_formula("=1++2"));
        assert!(!is_formula("=1*-2"));
        assert!(!is_formula("=1-"));
        assert!(!is_formula("=(1+)"));
        assert!(!is_formula("=()"));
    }

    #[test]
    fn test_formula_rejects_unbalanced_parens() {
        assert!(!is_formula("=(1+2"));
        assert!(!is_formula("=1+2)"));
        assert!(!is_formula("=)1+2("));
    }

    #[test]
    fn test_formula_rejects_foreign_characters() {
        assert!(!is_formula("=1 + 2"));
        assert!(!is_formula("=1^2"));
        assert!(!is_formula("=SUM(A1:A3)"));
        assert!(!is_formula("=\"a\"&\"b\""));
        assert!(!is_formula("1+2"));
    }
}
