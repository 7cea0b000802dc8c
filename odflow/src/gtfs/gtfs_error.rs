#[derive(thiserror::Error, Debug)]
pub enum GtfsError {
    #[error("Failed to parse gtfs feed into `Gtfs` struct: {0}")]
    FeedReadError(#[from] gtfs_structures::Error),
    #[error("Missing lon,lat data and parent_location for stop: {0}")]
    MissingStopLocationAndParentError(String),
    #[error("GTFS feed contains no stops with a location: {0}")]
    EmptyFeedError(String),
}
