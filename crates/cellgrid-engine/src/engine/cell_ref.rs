//! Cell reference parsing and formatting.
//!
//! Provides bidirectional conversion between spreadsheet-style labels
//! (e.g., "A1", "b12", "Z99") and zero-indexed column/row coordinates.
//!
//! Labels use a single column letter and a 1-based row in `1..=99`; the row is
//! shifted down by one when converted to a coordinate. Whether a coordinate
//! actually fits a particular grid is a separate check, see
//! [`Grid::parse_label`](super::Grid::parse_label).
//!
//! # Examples
//!
//! ```ignore
//! let cell = CellRef::parse_label("B3").unwrap();
//! assert_eq!(cell.col, 1);  // 0-indexed
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Number of addressable columns (`A` through `Z`).
pub const MAX_LABEL_COLS: usize = 26;
/// Highest row number a label may carry.
pub const MAX_LABEL_ROWS: usize = 99;

/// A reference to a cell by column and row indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellRef {
    pub col: usize,
    pub row: usize,
}

impl CellRef {
    pub fn new(col: usize, row: usize) -> CellRef {
        CellRef { col, row }
    }

    /// Parse a label such as "A1" or "c42".
    /// Returns None if the label is not a letter followed by a row in 1..=99.
    pub fn parse_label(label: &str) -> Option<CellRef> {
        if label.len() < 2 {
            return None;
        }
        let caps = label_re().captures(label)?;

        let letter = caps["letter"].as_bytes()[0].to_ascii_uppercase();
        let col = (letter - b'A') as usize;

        let row = caps["row"].parse::<usize>().ok()?;
        if !(1..=MAX_LABEL_ROWS).contains(&row) {
            return None;
        }

        Some(CellRef::new(col, row - 1))
    }

    /// Convert a column index to its letter (0 -> A, 25 -> Z).
    /// Returns None for columns past `Z`.
    pub fn col_to_letter(col: usize) -> Option<char> {
        (col < MAX_LABEL_COLS).then(|| (b'A' + col as u8) as char)
    }
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_label(s).ok_or_else(|| format!("Invalid cell reference: {}", s))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match CellRef::col_to_letter(self.col) {
            Some(letter) => write!(f, "{}{}", letter, self.row + 1),
            None => write!(f, "#{}:{}", self.col, self.row + 1),
        }
    }
}

fn label_re() -> &'static Regex {
    static LABEL_RE: OnceLock<Regex> = OnceLock::new();
    LABEL_RE.get_or_init(|| {
        Regex::new(r"^(?<letter>[A-Za-z])(?<row>[0-9]+)$").expect("cell label regex must compile")
    })
}
