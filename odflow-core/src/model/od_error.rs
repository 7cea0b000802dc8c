#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum OdError {
    #[error("no seed demand: off-diagonal seed demand sums to zero, OD normalizer is undefined")]
    NoSeedDemand,
    #[error("malformed coordinate for stop {index}: (lat={latitude}, lon={longitude})")]
    MalformedCoordinate {
        index: usize,
        latitude: f64,
        longitude: f64,
    },
    #[error("invalid seed demand at ({origin}, {destination}): {value}, must be finite and non-negative")]
    InvalidSeedDemand {
        origin: usize,
        destination: usize,
        value: f64,
    },
    #[error("seed demand total overflows: off-diagonal seed demand sums to {0}")]
    SeedDemandOverflow(f64),
    #[error("matrix dimension mismatch: expected {expected}x{expected}, found {found}")]
    DimensionMismatch { expected: usize, found: String },
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter { name: String, message: String },
    #[error("computation cancelled during {0}")]
    Cancelled(String),
}
