use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Enumerates alternative ways to handle
/// missing lon,lat data for a stop
#[derive(Serialize, Deserialize, Debug, ValueEnum, Clone, Copy, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum MissingStopLocationPolicy {
    #[default]
    Fail,
    DropStop,
}
