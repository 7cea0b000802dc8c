pub mod app;
pub mod gtfs;
