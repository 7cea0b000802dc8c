use super::OdFlowContext;
use itertools::Itertools;
use serde::Serialize;

/// statistics of a loaded feed and its seed demand
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OdFlowSummary {
    pub stops: usize,
    pub trip_edges: usize,
    /// distinct trips contributing at least one edge
    pub trips_with_edges: usize,
    /// ordered pairs of distinct stops, i.e. the number of edge flows a run produces
    pub od_pairs: usize,
    pub total_seed_demand: f64,
}

impl From<&OdFlowContext> for OdFlowSummary {
    fn from(ctx: &OdFlowContext) -> Self {
        let stops = ctx.graph.n_vertices();
        let trips_with_edges = ctx.graph.edges().iter().map(|e| &e.trip_id).unique().count();
        OdFlowSummary {
            stops,
            trip_edges: ctx.graph.n_edges(),
            trips_with_edges,
            od_pairs: stops * stops.saturating_sub(1),
            total_seed_demand: ctx.seed_demand.total(),
        }
    }
}
