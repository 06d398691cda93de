//! Tab-separated matrix rendering.

use std::fmt::Display;

/// Format a square matrix as tab-separated rows, one row per line.
///
/// Each cell is followed by a tab, matching the layout spreadsheet tools
/// paste cleanly.
pub fn format_matrix<T: Display>(rows: &[Vec<T>]) -> String {
    let mut output = String::new();
    for row in rows {
        for cell in row {
            output.push_str(&cell.to_string());
            output.push('\t');
        }
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_matrix() {
        let rows = vec![vec![0u64, 2], vec![2, 0]];
        assert_eq!(format_matrix(&rows), "0\t2\t\n2\t0\t\n");
    }

    #[test]
    fn test_format_empty_matrix() {
        let rows: Vec<Vec<u64>> = Vec::new();
        assert_eq!(format_matrix(&rows), "");
    }
}
