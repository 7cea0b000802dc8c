use super::{OdFlowAppError, OdFlowConfiguration};
use crate::gtfs::{read_transit_graph, TransitGraph};
use odflow_core::{
    model::{progress::ProgressReporter, OdFlowOutput, SeedDemand},
    util::CancellationToken,
};

/// everything a run needs, loaded once and passed by reference.
pub struct OdFlowContext {
    pub graph: TransitGraph,
    pub seed_demand: SeedDemand,
    pub configuration: OdFlowConfiguration,
}

impl OdFlowContext {
    /// reads the GTFS feed and the configured seed demand source.
    pub fn build(
        gtfs_path: &str,
        configuration: OdFlowConfiguration,
    ) -> Result<OdFlowContext, OdFlowAppError> {
        let graph = read_transit_graph(gtfs_path, &configuration.missing_stop_location_policy)?;
        let seed_demand = configuration.seed_demand.build(&graph)?;
        Ok(OdFlowContext {
            graph,
            seed_demand,
            configuration,
        })
    }

    /// computes the OD matrix and edge flows for the stops of this context
    pub fn run(
        &self,
        reporter: &mut dyn ProgressReporter,
        cancel: Option<&CancellationToken>,
    ) -> Result<OdFlowOutput, OdFlowAppError> {
        let coordinates = self.graph.stop_coordinates();
        let parameters = self.configuration.parameters();
        log::info!(
            "computing OD demand for {} stops with {parameters:?}",
            coordinates.len()
        );
        let output = parameters.run(&coordinates, &self.seed_demand, reporter, cancel)?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SeedDemandSource;
    use odflow_core::model::progress::{NoProgress, ProgressEvent};
    use std::path::PathBuf;

    fn fixture_path(name: &str) -> String {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test")
            .join(name)
            .to_string_lossy()
            .to_string()
    }

    #[test]
    fn test_run_uniform_seed() {
        let ctx =
            OdFlowContext::build(&fixture_path("mini-gtfs"), OdFlowConfiguration::default())
                .unwrap();
        let output = ctx.run(&mut NoProgress, None).unwrap();
        assert_eq!(output.od_matrix.size(), 5);
        assert_eq!(output.od_matrix.total_seed_demand(), 20.0);
        assert_eq!(output.edge_flows.len(), 20);
        // CS-1 shares its parent's location, so the pair is undiscounted
        let cs = ctx.graph.index_of("CS").unwrap();
        let cs1 = ctx.graph.index_of("CS-1").unwrap();
        assert_eq!(output.od_matrix.get(cs, cs1), 1.0 / 20.0);
    }

    #[test]
    fn test_run_csv_seed_with_progress() {
        let configuration = OdFlowConfiguration {
            seed_demand: SeedDemandSource::Csv {
                file: fixture_path("seed-demand.csv"),
            },
            progress_batch_size: 4,
            parallelize: true,
            ..Default::default()
        };
        let ctx = OdFlowContext::build(&fixture_path("mini-gtfs"), configuration).unwrap();
        let mut events: Vec<ProgressEvent> = vec![];
        let mut reporter = |e: ProgressEvent| events.push(e);
        let output = ctx.run(&mut reporter, None).unwrap();
        assert_eq!(output.od_matrix.total_seed_demand(), 400.0);

        let dam = ctx.graph.index_of("DAM").unwrap();
        let lsp = ctx.graph.index_of("LSP").unwrap();
        assert_eq!(output.edge_flows.get(dam, lsp), Some(0.0));
        assert!(output.edge_flows.get(dam, dam).is_none());

        let processed: Vec<usize> = events.iter().map(|e| e.processed).collect();
        assert_eq!(processed, vec![4, 8, 12, 16, 20]);
    }

    #[test]
    fn test_missing_feed() {
        let result =
            OdFlowContext::build(&fixture_path("no-such-feed"), OdFlowConfiguration::default());
        assert!(matches!(result, Err(OdFlowAppError::GtfsError { .. })));
    }
}
