//! Parser for the flat-text sheet format

use crate::error::Result;
use cellgrid_engine::engine::Grid;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Parse a sheet file into a new `width × height` grid
pub fn parse_sheet(path: &Path, width: usize, height: usize) -> Result<Grid> {
    let content = fs::read_to_string(path)?;
    let mut grid = Grid::new(width, height);
    let loaded = parse_sheet_content(&content, &mut grid);
    info!(path = %path.display(), cells = loaded, "loaded sheet");
    Ok(grid)
}

/// Apply sheet content to a grid. Returns the number of cells written.
///
/// Malformed lines are logged and skipped; they never fail the load.
pub fn parse_sheet_content(content: &str, grid: &mut Grid) -> usize {
    let mut loaded = 0;

    // The first line is reserved.
    for (line_num, line) in content.lines().enumerate().skip(1) {
        if line.is_empty() {
            continue;
        }

        let mut parts = line.splitn(3, ',');
        let (Some(col), Some(row), Some(text)) = (parts.next(), parts.next(), parts.next()) else {
            warn!(line = line_num + 1, "skipping line: expected 'column,row,text'");
            continue;
        };

        let (Ok(col), Ok(row)) = (col.trim().parse::<usize>(), row.trim().parse::<usize>()) else {
            warn!(line = line_num + 1, "skipping line: coordinates are not integers");
            continue;
        };

        if !grid.set(col, row, text) {
            warn!(line = line_num + 1, col, row, "skipping line: cell is outside the sheet");
            continue;
        }
        loaded += 1;
    }

    loaded
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellgrid_engine::engine::CellKind;

    #[test]
    fn test_first_line_is_ignored() {
        let mut grid = Grid::new(5, 5);
        let loaded = parse_sheet_content("0,0,99\n0,1,7\n", &mut grid);
        assert_eq!(loaded, 1);
        assert!(grid.get(0, 0).unwrap().is_empty());
        assert_eq!(grid.get(0, 1).unwrap().raw_text(), "7");
    }

    #[test]
    fn test_parse_kinds() {
        let mut grid = Grid::new(5, 5);
        parse_sheet_content("\n0,0,42\n1,0,Hello\n2,0,=A1+1\n", &mut grid);
        assert_eq!(grid.get(0, 0).unwrap().kind(), CellKind::Number);
        assert_eq!(grid.get(1, 0).unwrap().kind(), CellKind::Text);
        assert_eq!(grid.get(2, 0).unwrap().kind(), CellKind::Formula);
        assert_eq!(grid.value(2, 0), "43.0");
    }

    #[test]
    fn test_text_keeps_commas() {
        let mut grid = Grid::new(5, 5);
        parse_sheet_content("\n3,4,one, two, three\n", &mut grid);
        assert_eq!(grid.get(3, 4).unwrap().raw_text(), "one, two, three");
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let content = "header\n\
                       0,0,1\n\
                       just text\n\
                       1,2\n\
                       x,0,5\n\
                       0,-1,5\n\
                       9,9,out of bounds\n\
                       1,1,=A1*2\n";
        let mut grid = Grid::new(5, 5);
        let loaded = parse_sheet_content(content, &mut grid);
        assert_eq!(loaded, 2);
        assert_eq!(grid.non_empty().count(), 2);
        assert_eq!(grid.value(1, 1), "2.0");
    }

    #[test]
    fn test_empty_content() {
        let mut grid = Grid::new(2, 2);
        assert_eq!(parse_sheet_content("", &mut grid), 0);
    }
}
