use crate::model::OdError;
use serde::{Deserialize, Serialize};

/// a dense n×n matrix of f64 values stored as a flat row-major vector.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SquareMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SquareMatrix {
    pub fn zeros(size: usize) -> SquareMatrix {
        SquareMatrix {
            size,
            values: vec![0.0; size * size],
        }
    }

    /// builds a matrix from nested rows, failing if the rows are ragged or not square.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<SquareMatrix, OdError> {
        let size = rows.len();
        let mut values = Vec::with_capacity(size * size);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(OdError::DimensionMismatch {
                    expected: size,
                    found: format!("row {idx} with {} columns", row.len()),
                });
            }
            values.extend(row);
        }
        Ok(SquareMatrix { size, values })
    }

    /// number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// value at row `i`, column `j`. panics when out of bounds, like slice indexing.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size + j]
    }

    pub(crate) fn set(&mut self, i: usize, j: usize, value: f64) {
        self.values[i * self.size + j] = value;
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.size..(i + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        // chunks_exact of an empty vec with size 0 would panic
        self.values.chunks_exact(self.size.max(1))
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// sum of row `i` excluding the diagonal entry, accumulated left to right.
    pub fn off_diagonal_row_sum(&self, i: usize) -> f64 {
        self.row(i)
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .fold(0.0, |acc, (_, v)| acc + v)
    }

    /// sum of all off-diagonal entries. rows are summed individually and the partial
    /// sums are folded in row order, so any row-partitioned computation of the same
    /// total is bit-identical.
    pub fn off_diagonal_sum(&self) -> f64 {
        (0..self.size)
            .map(|i| self.off_diagonal_row_sum(i))
            .fold(0.0, |acc, v| acc + v)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_row_major() {
        let m = SquareMatrix::from_rows(vec![vec![0.0, 1.0], vec![2.0, 3.0]]).unwrap();
        assert_eq!(m.size(), 2);
        assert_eq!(m.get(0, 1), 1.0);
        assert_eq!(m.get(1, 0), 2.0);
        assert_eq!(m.row(1), &[2.0, 3.0]);
        assert_eq!(m.as_slice(), &[0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_from_rows_ragged() {
        let result = SquareMatrix::from_rows(vec![vec![0.0, 1.0], vec![2.0]]);
        assert!(matches!(
            result,
            Err(OdError::DimensionMismatch { expected: 2, .. })
        ));
    }

    #[test]
    fn test_off_diagonal_sum_skips_diagonal() {
        let m = SquareMatrix::from_rows(vec![
            vec![100.0, 1.0, 2.0],
            vec![3.0, 100.0, 4.0],
            vec![5.0, 6.0, 100.0],
        ])
        .unwrap();
        assert_eq!(m.off_diagonal_row_sum(0), 3.0);
        assert_eq!(m.off_diagonal_sum(), 21.0);
    }

    #[test]
    fn test_empty_matrix() {
        let m = SquareMatrix::zeros(0);
        assert!(m.is_empty());
        assert_eq!(m.rows().count(), 0);
        assert_eq!(m.off_diagonal_sum(), 0.0);
    }
}
