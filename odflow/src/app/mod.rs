mod app_error;
mod configuration;
mod context;
mod kdam_progress;
mod odflow_app;
mod operation;
mod output_writer;
mod seed_demand_source;
mod summary;

pub use app_error::OdFlowAppError;
pub use configuration::OdFlowConfiguration;
pub use context::OdFlowContext;
pub use kdam_progress::KdamProgress;
pub use odflow_app::OdFlowApp;
pub use operation::OdFlowOperation;
pub use output_writer::{write_outputs, EDGE_FLOWS_FILENAME, OD_MATRIX_FILENAME};
pub use seed_demand_source::SeedDemandSource;
pub use summary::OdFlowSummary;
