use super::OdError;
use geo::Point;
use serde::{Deserialize, Serialize};

/// location of a transit stop, identified by its index in the stop list.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct StopCoordinate {
    pub index: usize,
    /// latitude in degrees
    pub latitude: f64,
    /// longitude in degrees
    pub longitude: f64,
}

impl StopCoordinate {
    pub fn new(index: usize, latitude: f64, longitude: f64) -> StopCoordinate {
        StopCoordinate {
            index,
            latitude,
            longitude,
        }
    }

    /// builds a coordinate from a lon,lat point (x=lon, y=lat).
    pub fn from_point(index: usize, point: &Point<f64>) -> StopCoordinate {
        StopCoordinate::new(index, point.y(), point.x())
    }

    /// confirms the coordinate is finite and within the WGS84 degree ranges.
    pub fn validate(&self) -> Result<(), OdError> {
        let valid_lat = self.latitude.is_finite() && (-90.0..=90.0).contains(&self.latitude);
        let valid_lon = self.longitude.is_finite() && (-180.0..=180.0).contains(&self.longitude);
        if valid_lat && valid_lon {
            Ok(())
        } else {
            Err(OdError::MalformedCoordinate {
                index: self.index,
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

impl From<&StopCoordinate> for Point<f64> {
    fn from(value: &StopCoordinate) -> Self {
        Point::new(value.longitude, value.latitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_roundtrip_axis_order() {
        let point = Point::new(4.900, 52.379);
        let coord = StopCoordinate::from_point(3, &point);
        assert_eq!(coord.latitude, 52.379);
        assert_eq!(coord.longitude, 4.900);
        assert_eq!(Point::from(&coord), point);
    }

    #[test]
    fn test_validate() {
        assert!(StopCoordinate::new(0, 90.0, -180.0).validate().is_ok());
        assert!(StopCoordinate::new(0, 90.5, 0.0).validate().is_err());
        assert!(StopCoordinate::new(0, 0.0, 181.0).validate().is_err());
        assert!(StopCoordinate::new(0, f64::NAN, 0.0).validate().is_err());
        assert!(StopCoordinate::new(0, 0.0, f64::INFINITY).validate().is_err());
    }
}
