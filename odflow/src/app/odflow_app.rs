use super::OdFlowOperation;
use clap::Parser;

/// command line tool estimating gravity-model OD demand and synthetic edge flows
/// between the stops of a GTFS feed
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct OdFlowApp {
    #[command(subcommand)]
    pub op: OdFlowOperation,
}
