use super::OdError;
use serde::{Deserialize, Serialize};

/// default distance decay parameter (per km)
pub const DEFAULT_DISTANCE_DECAY: f64 = 0.15;

/// exponential distance-decay gravity model. the attraction between two stops
/// falls off as `exp(-ddp * distance)`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct GravityModel {
    distance_decay: f64,
}

impl Default for GravityModel {
    fn default() -> Self {
        GravityModel {
            distance_decay: DEFAULT_DISTANCE_DECAY,
        }
    }
}

impl GravityModel {
    pub fn new(distance_decay: f64) -> Result<GravityModel, OdError> {
        if !distance_decay.is_finite() || distance_decay < 0.0 {
            return Err(OdError::InvalidParameter {
                name: String::from("distance_decay"),
                message: format!("must be finite and non-negative, found {distance_decay}"),
            });
        }
        Ok(GravityModel { distance_decay })
    }

    pub fn distance_decay(&self) -> f64 {
        self.distance_decay
    }

    /// dimensionless attraction factor for a distance in km. 1.0 at distance zero.
    pub fn attraction(&self, distance_km: f64) -> f64 {
        (-self.distance_decay * distance_km).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attraction_at_zero() {
        assert_eq!(GravityModel::default().attraction(0.0), 1.0);
    }

    #[test]
    fn test_attraction_strictly_decreasing() {
        let model = GravityModel::default();
        let values: Vec<f64> = [0.0, 0.5, 1.0, 5.0, 20.0, 100.0]
            .iter()
            .map(|d| model.attraction(*d))
            .collect();
        assert!(values.windows(2).all(|w| w[1] < w[0]));
        assert!(values.iter().all(|v| *v > 0.0));
    }

    #[test]
    fn test_known_value() {
        let model = GravityModel::new(0.15).unwrap();
        let expected = (-1.5f64).exp();
        assert_eq!(model.attraction(10.0), expected);
    }

    #[test]
    fn test_rejects_invalid_decay() {
        assert!(GravityModel::new(-0.1).is_err());
        assert!(GravityModel::new(f64::NAN).is_err());
        assert!(GravityModel::new(0.0).is_ok());
    }
}
