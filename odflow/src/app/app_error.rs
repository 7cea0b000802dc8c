use crate::gtfs::GtfsError;
use odflow_core::model::OdError;

#[derive(thiserror::Error, Debug)]
pub enum OdFlowAppError {
    #[error("failure reading run configuration: {0}")]
    ConfigurationError(String),
    #[error("{msg}: {source}")]
    ConfigReadError {
        msg: String,
        source: config::ConfigError,
    },
    #[error("failure reading GTFS feed: {source}")]
    GtfsError {
        #[from]
        source: GtfsError,
    },
    #[error("OD flow computation failed: {source}")]
    OdError {
        #[from]
        source: OdError,
    },
    #[error("failure reading seed demand from '{filepath}': {error}")]
    SeedDemandReadError { filepath: String, error: String },
    #[error("failure writing '{filepath}': {error}")]
    WriteError { filepath: String, error: String },
    #[error("{0} output file(s) failed to write")]
    OutputFailures(usize),
}
