//! Station-major to train-major conversion.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// No rows, so there is no column count to transpose around
    #[error("grid has no rows")]
    Empty,

    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Check that every row has as many columns as the first, returning that count.
pub fn column_count<T>(grid: &[Vec<T>]) -> Result<usize, GridError> {
    let expected = grid.first().ok_or(GridError::Empty)?.len();
    for (row, cells) in grid.iter().enumerate() {
        if cells.len() != expected {
            return Err(GridError::Ragged {
                row,
                expected,
                found: cells.len(),
            });
        }
    }
    Ok(expected)
}

/// Transpose an `R x C` grid into a `C x R` grid.
///
/// ```
/// use timetable_scraper::grid::transpose;
///
/// let grid = vec![vec![1, 2, 3], vec![4, 5, 6]];
/// assert_eq!(transpose(&grid).unwrap(), vec![vec![1, 4], vec![2, 5], vec![3, 6]]);
/// ```
pub fn transpose<T: Clone>(grid: &[Vec<T>]) -> Result<Vec<Vec<T>>, GridError> {
    let columns = column_count(grid)?;
    Ok((0..columns)
        .map(|col| grid.iter().map(|row| row[col].clone()).collect())
        .collect())
}
