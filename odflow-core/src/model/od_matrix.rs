use super::{DistanceMatrix, GravityModel, OdError, OdRow, SeedDemand};
use crate::util::{CancellationToken, SquareMatrix};
use rayon::prelude::*;

/// estimated directional demand between every ordered pair of stops, along with the
/// seed demand total used to normalize it.
///
/// entries are `seed[i][j] * attraction(dist[i][j]) / total_seed_demand`, where the
/// total is the raw (unweighted) seed demand. the matrix therefore does not sum to 1
/// unless every attraction is 1.
#[derive(Debug, Clone, PartialEq)]
pub struct OdMatrix {
    values: SquareMatrix,
    total_seed_demand: f64,
}

impl OdMatrix {
    pub fn size(&self) -> usize {
        self.values.size()
    }

    pub fn get(&self, origin: usize, destination: usize) -> f64 {
        self.values.get(origin, destination)
    }

    pub fn total_seed_demand(&self) -> f64 {
        self.total_seed_demand
    }

    pub fn as_matrix(&self) -> &SquareMatrix {
        &self.values
    }

    /// every ordered pair in row-major order, including the zero diagonal.
    pub fn rows(&self) -> impl Iterator<Item = OdRow> + '_ {
        let n = self.size();
        (0..n).flat_map(move |origin| {
            (0..n).map(move |destination| OdRow {
                origin_id: origin,
                destination_id: destination,
                demand: self.get(origin, destination),
            })
        })
    }
}

/// combines distances, seed demand and a gravity model into an [`OdMatrix`].
#[derive(Debug, Clone, Default)]
pub struct OdMatrixBuilder {
    pub gravity_model: GravityModel,
    /// compute rows in parallel. results are identical to the sequential sweep.
    pub parallelize: bool,
}

impl OdMatrixBuilder {
    pub fn new(gravity_model: GravityModel, parallelize: bool) -> OdMatrixBuilder {
        OdMatrixBuilder {
            gravity_model,
            parallelize,
        }
    }

    /// builds the OD matrix. the seed demand total must be known before any entry is
    /// written, so the sum is always taken in full first.
    ///
    /// # Arguments
    ///
    /// * `distances` - stop-to-stop distances in km
    /// * `seed_demand` - gravity model mass for each stop pair
    /// * `cancel` - optional token checked before each row
    ///
    /// # Returns
    ///
    /// * the OD matrix, or [`OdError::NoSeedDemand`] when the off-diagonal seed demand is zero
    pub fn build(
        &self,
        distances: &DistanceMatrix,
        seed_demand: &SeedDemand,
        cancel: Option<&CancellationToken>,
    ) -> Result<OdMatrix, OdError> {
        let n = distances.size();
        if seed_demand.size() != n {
            return Err(OdError::DimensionMismatch {
                expected: n,
                found: format!("seed demand of size {}", seed_demand.size()),
            });
        }

        let total_seed_demand = seed_demand.total();
        if !total_seed_demand.is_finite() {
            return Err(OdError::SeedDemandOverflow(total_seed_demand));
        }
        if total_seed_demand <= 0.0 {
            return Err(OdError::NoSeedDemand);
        }

        let mut values = SquareMatrix::zeros(n);
        let fill = |(origin, row): (usize, &mut [f64])| -> Result<(), OdError> {
            if cancel.is_some_and(|c| c.is_cancelled()) {
                return Err(OdError::Cancelled(String::from("OD matrix")));
            }
            for (destination, cell) in row.iter_mut().enumerate() {
                if origin != destination {
                    let trips = seed_demand.get(origin, destination);
                    let attraction = self
                        .gravity_model
                        .attraction(distances.get(origin, destination));
                    *cell = (trips * attraction) / total_seed_demand;
                }
            }
            Ok(())
        };
        if self.parallelize {
            values
                .values_mut()
                .par_chunks_mut(n)
                .enumerate()
                .try_for_each(fill)?;
        } else {
            values.values_mut().chunks_mut(n).enumerate().try_for_each(fill)?;
        }

        log::debug!("built {n}x{n} OD matrix with total seed demand {total_seed_demand}");
        Ok(OdMatrix {
            values,
            total_seed_demand,
        })
    }
}
