use super::{
    progress::{BatchProgress, ProgressReporter, DEFAULT_PROGRESS_BATCH_SIZE},
    EdgeFlowRow, OdError, OdMatrix,
};
use crate::util::CancellationToken;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, time::Instant};

/// scale converting a normalized OD share into an absolute flow count
pub const DEFAULT_FLOW_SCALE: f64 = 1.0e7;

/// identifies a synthetic directed edge between two stops
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OdPair {
    pub origin: usize,
    pub destination: usize,
}

/// flow per synthetic origin-destination edge. enumeration is row-major by
/// (origin, destination), which fixes the sequential edge ids used for output.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EdgeFlows {
    flows: BTreeMap<OdPair, f64>,
}

impl EdgeFlows {
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    pub fn get(&self, origin: usize, destination: usize) -> Option<f64> {
        self.flows
            .get(&OdPair {
                origin,
                destination,
            })
            .copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OdPair, &f64)> {
        self.flows.iter()
    }

    /// output rows with edge ids assigned in enumeration order
    pub fn rows(&self) -> impl Iterator<Item = EdgeFlowRow> + '_ {
        self.flows
            .iter()
            .enumerate()
            .map(|(edge_id, (pair, flow))| EdgeFlowRow {
                edge_id,
                from_stop: pair.origin,
                to_stop: pair.destination,
                flow: *flow,
            })
    }
}

/// relabels OD demand as flow on a synthetic edge per ordered stop pair. no routing
/// over the transit network takes place; every pair of distinct stops gets its own edge.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct EdgeFlowEstimator {
    pub flow_scale: f64,
    pub progress_batch_size: usize,
}

impl Default for EdgeFlowEstimator {
    fn default() -> Self {
        EdgeFlowEstimator {
            flow_scale: DEFAULT_FLOW_SCALE,
            progress_batch_size: DEFAULT_PROGRESS_BATCH_SIZE,
        }
    }
}

impl EdgeFlowEstimator {
    pub fn new(flow_scale: f64, progress_batch_size: usize) -> Result<EdgeFlowEstimator, OdError> {
        if !flow_scale.is_finite() || flow_scale < 0.0 {
            return Err(OdError::InvalidParameter {
                name: String::from("flow_scale"),
                message: format!("must be finite and non-negative, found {flow_scale}"),
            });
        }
        if progress_batch_size == 0 {
            return Err(OdError::InvalidParameter {
                name: String::from("progress_batch_size"),
                message: String::from("must be greater than zero"),
            });
        }
        Ok(EdgeFlowEstimator {
            flow_scale,
            progress_batch_size,
        })
    }

    /// computes `flow(i,j) = OD[i][j] * flow_scale` for every `i != j`.
    ///
    /// # Arguments
    ///
    /// * `od_matrix` - OD demand shares
    /// * `reporter` - receives a notification every `progress_batch_size` pairs
    /// * `cancel` - optional token checked before each origin
    ///
    /// # Returns
    ///
    /// * n·(n−1) edge flows, or a cancellation error
    pub fn estimate(
        &self,
        od_matrix: &OdMatrix,
        reporter: &mut dyn ProgressReporter,
        cancel: Option<&CancellationToken>,
    ) -> Result<EdgeFlows, OdError> {
        let start_time = Instant::now();
        let n = od_matrix.size();
        let total_pairs = n * n.saturating_sub(1);
        let mut progress = BatchProgress::new(reporter, self.progress_batch_size, total_pairs);
        let mut flows = BTreeMap::new();

        for origin in 0..n {
            if cancel.is_some_and(|c| c.is_cancelled()) {
                return Err(OdError::Cancelled(String::from("edge flows")));
            }
            for destination in 0..n {
                if origin != destination {
                    let demand = od_matrix.get(origin, destination);
                    let pair = OdPair {
                        origin,
                        destination,
                    };
                    flows.insert(pair, demand * self.flow_scale);
                    progress.tick();
                }
            }
        }
        progress.finish();

        log::info!(
            "edge flow calculation completed for {} pairs in {:.1} minutes",
            flows.len(),
            start_time.elapsed().as_secs_f64() / 60.0
        );
        Ok(EdgeFlows { flows })
    }
}
