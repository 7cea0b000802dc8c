use super::OdFlowAppError;
use crate::gtfs::TransitGraph;
use odflow_core::model::SeedDemand;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// source of the seed (population) demand matrix for a transit graph
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum SeedDemandSource {
    /// placeholder demand, the same value for every pair of distinct stops
    Uniform { value: f64 },
    /// long-format CSV with `origin_stop_id,destination_stop_id,demand` rows.
    /// pairs missing from the file have zero demand, repeated pairs are summed.
    Csv { file: String },
}

impl Default for SeedDemandSource {
    fn default() -> Self {
        SeedDemandSource::Uniform { value: 1.0 }
    }
}

#[derive(Deserialize, Debug)]
struct SeedDemandRow {
    origin_stop_id: String,
    destination_stop_id: String,
    demand: f64,
}

impl SeedDemandSource {
    pub fn build(&self, graph: &TransitGraph) -> Result<SeedDemand, OdFlowAppError> {
        let n = graph.n_vertices();
        match self {
            SeedDemandSource::Uniform { value } => {
                log::info!("using uniform seed demand of {value} for {n} stops");
                Ok(SeedDemand::uniform(n, *value)?)
            }
            SeedDemandSource::Csv { file } => read_seed_demand_csv(Path::new(file), graph),
        }
    }
}

/// reads long-format seed demand rows keyed by GTFS stop id into an n×n matrix
fn read_seed_demand_csv(
    filepath: &Path,
    graph: &TransitGraph,
) -> Result<SeedDemand, OdFlowAppError> {
    let filename = filepath.to_string_lossy().to_string();
    let read_error = |error: String| OdFlowAppError::SeedDemandReadError {
        filepath: filename.clone(),
        error,
    };
    let reader = csv::Reader::from_path(filepath).map_err(|e| read_error(e.to_string()))?;

    let n = graph.n_vertices();
    let mut rows = vec![vec![0.0; n]; n];
    for (idx, record) in reader.into_deserialize::<SeedDemandRow>().enumerate() {
        let row = record.map_err(|e| read_error(format!("row {idx}: {e}")))?;
        let origin = graph
            .index_of(&row.origin_stop_id)
            .ok_or_else(|| read_error(format!("row {idx}: unknown stop {}", row.origin_stop_id)))?;
        let destination = graph.index_of(&row.destination_stop_id).ok_or_else(|| {
            read_error(format!("row {idx}: unknown stop {}", row.destination_stop_id))
        })?;
        if origin == destination {
            return Err(read_error(format!(
                "row {idx}: origin and destination are both {}",
                row.origin_stop_id
            )));
        }
        rows[origin][destination] += row.demand;
    }
    log::info!("read seed demand for {n} stops from {filename}");
    Ok(SeedDemand::from_rows(rows)?)
}
