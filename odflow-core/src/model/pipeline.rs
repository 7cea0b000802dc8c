use super::{
    progress::{ProgressReporter, DEFAULT_PROGRESS_BATCH_SIZE},
    DistanceMatrix, EdgeFlowEstimator, EdgeFlows, GravityModel, OdError, OdMatrix,
    OdMatrixBuilder, SeedDemand, StopCoordinate, DEFAULT_DISTANCE_DECAY, DEFAULT_FLOW_SCALE,
};
use crate::util::CancellationToken;
use serde::{Deserialize, Serialize};

/// numeric parameters of a full stops → distances → OD → edge flows computation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OdFlowParameters {
    pub distance_decay: f64,
    pub flow_scale: f64,
    pub progress_batch_size: usize,
    pub parallelize: bool,
}

impl Default for OdFlowParameters {
    fn default() -> Self {
        OdFlowParameters {
            distance_decay: DEFAULT_DISTANCE_DECAY,
            flow_scale: DEFAULT_FLOW_SCALE,
            progress_batch_size: DEFAULT_PROGRESS_BATCH_SIZE,
            parallelize: false,
        }
    }
}

/// result of a single computation. nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct OdFlowOutput {
    pub od_matrix: OdMatrix,
    pub edge_flows: EdgeFlows,
}

impl OdFlowParameters {
    /// runs every stage from scratch. distances are dropped once the OD matrix is built.
    pub fn run(
        &self,
        coordinates: &[StopCoordinate],
        seed_demand: &SeedDemand,
        reporter: &mut dyn ProgressReporter,
        cancel: Option<&CancellationToken>,
    ) -> Result<OdFlowOutput, OdError> {
        let gravity_model = GravityModel::new(self.distance_decay)?;
        let estimator = EdgeFlowEstimator::new(self.flow_scale, self.progress_batch_size)?;
        let builder = OdMatrixBuilder::new(gravity_model, self.parallelize);

        let od_matrix = {
            let distances = DistanceMatrix::build(coordinates, cancel)?;
            builder.build(&distances, seed_demand, cancel)?
        };
        let edge_flows = estimator.estimate(&od_matrix, reporter, cancel)?;
        Ok(OdFlowOutput {
            od_matrix,
            edge_flows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::progress::NoProgress;

    #[test]
    fn test_two_identical_stops_end_to_end() {
        let stops = vec![
            StopCoordinate::new(0, 52.379, 4.900),
            StopCoordinate::new(1, 52.379, 4.900),
        ];
        let seed = SeedDemand::from_rows(vec![vec![0.0, 4.0], vec![6.0, 0.0]]).unwrap();
        let output = OdFlowParameters::default()
            .run(&stops, &seed, &mut NoProgress, None)
            .unwrap();
        assert_eq!(output.od_matrix.total_seed_demand(), 10.0);
        assert_eq!(output.od_matrix.get(0, 1), 0.4);
        assert_eq!(output.od_matrix.get(1, 0), 0.6);
        let flow_01 = output.edge_flows.get(0, 1).unwrap();
        let flow_10 = output.edge_flows.get(1, 0).unwrap();
        assert!((flow_01 - 4.0e6).abs() < 1e-6);
        assert!((flow_10 - 6.0e6).abs() < 1e-6);
        let rows: Vec<_> = output.edge_flows.rows().collect();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_antipodal_stops_produce_finite_flows() {
        let stops = vec![
            StopCoordinate::new(0, 0.08, 0.0),
            StopCoordinate::new(1, -0.08, -180.0),
        ];
        let seed = SeedDemand::uniform(2, 1.0).unwrap();
        let output = OdFlowParameters::default()
            .run(&stops, &seed, &mut NoProgress, None)
            .unwrap();
        for (i, j) in [(0, 1), (1, 0)] {
            let od = output.od_matrix.get(i, j);
            assert!(od.is_finite() && od >= 0.0, "bad OD value {od}");
            let flow = output.edge_flows.get(i, j).unwrap();
            assert!(flow.is_finite() && flow >= 0.0, "bad flow {flow}");
        }
    }

    #[test]
    fn test_zero_seed_demand_produces_no_output() {
        let stops = vec![
            StopCoordinate::new(0, 52.379, 4.900),
            StopCoordinate::new(1, 52.3676, 4.9041),
        ];
        let seed = SeedDemand::uniform(2, 0.0).unwrap();
        let result = OdFlowParameters::default().run(&stops, &seed, &mut NoProgress, None);
        assert!(matches!(result, Err(OdError::NoSeedDemand)));
    }

    #[test]
    fn test_rejects_invalid_decay() {
        let params = OdFlowParameters {
            distance_decay: -1.0,
            ..Default::default()
        };
        let seed = SeedDemand::uniform(1, 1.0).unwrap();
        let result = params.run(&[StopCoordinate::new(0, 0.0, 0.0)], &seed, &mut NoProgress, None);
        assert!(matches!(result, Err(OdError::InvalidParameter { .. })));
    }
}
