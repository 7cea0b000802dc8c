use geo::Point;
use odflow_core::model::StopCoordinate;
use std::collections::HashMap;

/// a transit stop in the graph. `index` is the stop's position in the OD matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct StopVertex {
    pub index: usize,
    pub stop_id: String,
    /// lon,lat location of the stop (or its parent station)
    pub point: Point<f64>,
}

/// a hop between consecutive stops of a trip
#[derive(Debug, Clone, PartialEq)]
pub struct TransitEdge {
    pub src: usize,
    pub dst: usize,
    pub trip_id: String,
}

/// stops and trip hops read from a GTFS feed. the OD computation only consumes the
/// vertices; edges describe the real network and are reported, not routed over.
#[derive(Debug, Clone, Default)]
pub struct TransitGraph {
    vertices: Vec<StopVertex>,
    edges: Vec<TransitEdge>,
    stop_id_to_index: HashMap<String, usize>,
}

impl TransitGraph {
    pub fn new(vertices: Vec<StopVertex>, edges: Vec<TransitEdge>) -> TransitGraph {
        let stop_id_to_index = vertices
            .iter()
            .map(|v| (v.stop_id.clone(), v.index))
            .collect();
        TransitGraph {
            vertices,
            edges,
            stop_id_to_index,
        }
    }

    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn vertices(&self) -> &[StopVertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[TransitEdge] {
        &self.edges
    }

    pub fn index_of(&self, stop_id: &str) -> Option<usize> {
        self.stop_id_to_index.get(stop_id).copied()
    }

    /// stop coordinates in vertex order, as consumed by the distance matrix
    pub fn stop_coordinates(&self) -> Vec<StopCoordinate> {
        self.vertices
            .iter()
            .map(|v| StopCoordinate::from_point(v.index, &v.point))
            .collect()
    }
}
