use super::OdError;
use crate::util::SquareMatrix;

/// externally supplied seed (population) demand between stop pairs, used as the
/// gravity-model mass. every entry is finite and non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedDemand {
    values: SquareMatrix,
}

impl SeedDemand {
    /// validates and wraps a seed demand matrix.
    pub fn new(values: SquareMatrix) -> Result<SeedDemand, OdError> {
        for (origin, row) in values.rows().enumerate() {
            for (destination, value) in row.iter().enumerate() {
                if !value.is_finite() || *value < 0.0 {
                    return Err(OdError::InvalidSeedDemand {
                        origin,
                        destination,
                        value: *value,
                    });
                }
            }
        }
        Ok(SeedDemand { values })
    }

    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<SeedDemand, OdError> {
        SeedDemand::new(SquareMatrix::from_rows(rows)?)
    }

    /// placeholder demand with the same value for every off-diagonal pair.
    pub fn uniform(size: usize, value: f64) -> Result<SeedDemand, OdError> {
        let rows = (0..size)
            .map(|i| (0..size).map(|j| if i == j { 0.0 } else { value }).collect())
            .collect();
        SeedDemand::from_rows(rows)
    }

    pub fn size(&self) -> usize {
        self.values.size()
    }

    pub fn get(&self, origin: usize, destination: usize) -> f64 {
        self.values.get(origin, destination)
    }

    pub fn as_matrix(&self) -> &SquareMatrix {
        &self.values
    }

    /// the raw, unweighted off-diagonal total. this is the OD normalizer.
    pub fn total(&self) -> f64 {
        self.values.off_diagonal_sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_skips_diagonal() {
        let seed = SeedDemand::from_rows(vec![vec![7.0, 4.0], vec![6.0, 9.0]]).unwrap();
        assert_eq!(seed.total(), 10.0);
    }

    #[test]
    fn test_uniform() {
        let seed = SeedDemand::uniform(3, 1.0).unwrap();
        assert_eq!(seed.get(1, 1), 0.0);
        assert_eq!(seed.get(1, 2), 1.0);
        assert_eq!(seed.total(), 6.0);
    }

    #[test]
    fn test_rejects_negative_and_nan() {
        let negative = SeedDemand::from_rows(vec![vec![0.0, -1.0], vec![1.0, 0.0]]);
        assert_eq!(
            negative,
            Err(OdError::InvalidSeedDemand {
                origin: 0,
                destination: 1,
                value: -1.0
            })
        );
        let nan = SeedDemand::from_rows(vec![vec![0.0, 1.0], vec![f64::NAN, 0.0]]);
        assert!(matches!(
            nan,
            Err(OdError::InvalidSeedDemand {
                origin: 1,
                destination: 0,
                ..
            })
        ));
    }
}
