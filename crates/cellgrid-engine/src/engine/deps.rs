//! Reference extraction from formula text.
//!
//! A reference token is a single letter followed by any run of digits,
//! matched greedily left to right. "AB1" is the two tokens "A" and "B1";
//! whether a token names a real cell is up to the label parser.

use regex::{Matches, Regex};
use std::sync::OnceLock;

use super::cell_ref::CellRef;

/// Iterate over every reference token in a formula, with byte offsets.
pub fn reference_tokens(formula: &str) -> Matches<'static, '_> {
    reference_re().find_iter(formula)
}

/// Extract the cell references a formula mentions, in order of appearance.
/// Tokens that are not valid labels are skipped.
pub fn extract_dependencies(formula: &str) -> Vec<CellRef> {
    reference_tokens(formula)
        .filter_map(|token| CellRef::parse_label(token.as_str()))
        .collect()
}

fn reference_re() -> &'static Regex {
    static REFERENCE_RE: OnceLock<Regex> = OnceLock::new();
    REFERENCE_RE.get_or_init(|| {
        Regex::new(r"[A-Za-z][0-9]*").expect("reference token regex must compile")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_tokens_are_letter_then_digits() {
        let tokens: Vec<&str> = reference_tokens("=A1+b22*(AB3-4)").map(|m| m.as_str()).collect();
        assert_eq!(tokens, vec!["A1", "b22", "A", "B3"]);
    }

    #[test]
    fn test_extract_dependencies_skips_invalid_labels() {
        let deps = extract_dependencies("=A1+X+C100+c3");
        assert_eq!(deps, vec![CellRef::new(0, 0), CellRef::new(2, 2)]);
    }

    #[test]
    fn test_extract_dependencies_keeps_duplicates() {
        assert_eq!(extract_dependencies("A1+A1").len(), 2);
        assert!(extract_dependencies("10+20").is_empty());
    }
}
