mod feed_ops;
mod gtfs_error;
mod missing_stop_location_policy;
mod transit_graph;

pub use feed_ops::read_transit_graph;
pub use gtfs_error::GtfsError;
pub use missing_stop_location_policy::MissingStopLocationPolicy;
pub use transit_graph::{StopVertex, TransitEdge, TransitGraph};
