use super::{OdError, StopCoordinate};
use crate::util::{CancellationToken, SquareMatrix};
use geo::{Distance, HaversineMeasure, Point};
use std::f64::consts::PI;

/// mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// great-circle distance in kilometers between two lat,lon positions in degrees.
///
/// the result never exceeds half the Earth's circumference. near-antipodal pairs can
/// round past that bound (or to NaN inside the formula), and `f64::min` maps both back
/// to the bound.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let haversine = HaversineMeasure::new(EARTH_RADIUS_KM * 1000.0);
    let meters = haversine.distance(Point::new(lon1, lat1), Point::new(lon2, lat2));
    (meters / 1000.0).min(PI * EARTH_RADIUS_KM)
}

/// pairwise haversine distances (km) between all stops, indexed by stop position.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    distances: SquareMatrix,
}

impl DistanceMatrix {
    /// computes the distance between every ordered pair of stops. the diagonal is
    /// zero by definition and is never evaluated through the formula.
    ///
    /// # Arguments
    ///
    /// * `coordinates` - stop locations, where position `i` is stop index `i`
    /// * `cancel` - optional token checked before each row
    ///
    /// # Returns
    ///
    /// * the n×n distance matrix, or an error if any coordinate is malformed
    pub fn build(
        coordinates: &[StopCoordinate],
        cancel: Option<&CancellationToken>,
    ) -> Result<DistanceMatrix, OdError> {
        for coordinate in coordinates.iter() {
            coordinate.validate()?;
        }
        let n = coordinates.len();
        let mut distances = SquareMatrix::zeros(n);
        for (i, src) in coordinates.iter().enumerate() {
            if cancel.is_some_and(|c| c.is_cancelled()) {
                return Err(OdError::Cancelled(String::from("distance matrix")));
            }
            for (j, dst) in coordinates.iter().enumerate() {
                if i != j {
                    let d = haversine_km(src.latitude, src.longitude, dst.latitude, dst.longitude);
                    distances.set(i, j, d);
                }
            }
        }
        log::debug!("computed distance matrix for {n} stops");
        Ok(DistanceMatrix { distances })
    }

    pub fn size(&self) -> usize {
        self.distances.size()
    }

    /// distance in km from stop `i` to stop `j`
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.distances.get(i, j)
    }

    pub fn as_matrix(&self) -> &SquareMatrix {
        &self.distances
    }
}
