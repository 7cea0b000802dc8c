mod distance_matrix;
mod edge_flow;
mod gravity_model;
mod od_error;
mod od_matrix;
mod od_row;
mod pipeline;
pub mod progress;
mod seed_demand;
mod stop_coordinate;

pub use distance_matrix::{haversine_km, DistanceMatrix, EARTH_RADIUS_KM};
pub use edge_flow::{EdgeFlowEstimator, EdgeFlows, OdPair, DEFAULT_FLOW_SCALE};
pub use gravity_model::{GravityModel, DEFAULT_DISTANCE_DECAY};
pub use od_error::OdError;
pub use od_matrix::{OdMatrix, OdMatrixBuilder};
pub use od_row::{EdgeFlowRow, OdRow};
pub use pipeline::{OdFlowOutput, OdFlowParameters};
pub use seed_demand::SeedDemand;
pub use stop_coordinate::StopCoordinate;
