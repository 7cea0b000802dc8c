use super::{GtfsError, MissingStopLocationPolicy, StopVertex, TransitEdge, TransitGraph};
use geo::Point;
use gtfs_structures::{Gtfs, Stop, StopTime, Trip};
use itertools::Itertools;
use std::collections::HashMap;

/// reads a GTFS feed (zip archive or directory) into a transit graph.
///
/// stops are indexed in ascending `stop_id` order so that repeated runs over the same
/// feed produce the same matrices. each trip contributes one edge per consecutive pair
/// of its stop times, ordered by `stop_sequence`.
///
/// # Arguments
///
/// * `feed_path` - path to a GTFS zip or an unzipped GTFS directory
/// * `missing_stop_location_policy` - what to do with stops that have no location
///
/// # Returns
///
/// * the transit graph, or an error if the feed cannot be read
pub fn read_transit_graph(
    feed_path: &str,
    missing_stop_location_policy: &MissingStopLocationPolicy,
) -> Result<TransitGraph, GtfsError> {
    log::info!("reading GTFS feed {feed_path}");
    let gtfs = Gtfs::new(feed_path)?;

    let mut vertices: Vec<StopVertex> = vec![];
    for stop_id in gtfs.stops.keys().sorted() {
        let stop = &gtfs.stops[stop_id];
        match (get_stop_location(stop, &gtfs), missing_stop_location_policy) {
            (Some(point), _) => vertices.push(StopVertex {
                index: vertices.len(),
                stop_id: stop_id.clone(),
                point,
            }),
            (None, MissingStopLocationPolicy::Fail) => {
                return Err(GtfsError::MissingStopLocationAndParentError(
                    stop_id.clone(),
                ))
            }
            (None, MissingStopLocationPolicy::DropStop) => {
                log::warn!("dropping stop {stop_id} with no location");
            }
        }
    }
    if vertices.is_empty() {
        return Err(GtfsError::EmptyFeedError(feed_path.to_string()));
    }
    let stop_index: HashMap<&str, usize> = vertices
        .iter()
        .map(|v| (v.stop_id.as_str(), v.index))
        .collect();

    let mut edges: Vec<TransitEdge> = vec![];
    let mut skipped = 0;
    for (trip_id, trip) in gtfs.trips.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
        for (src, dst) in get_ordered_stops(trip).into_iter().tuple_windows() {
            match (
                stop_index.get(src.stop.id.as_str()),
                stop_index.get(dst.stop.id.as_str()),
            ) {
                (Some(src_index), Some(dst_index)) => edges.push(TransitEdge {
                    src: *src_index,
                    dst: *dst_index,
                    trip_id: trip_id.clone(),
                }),
                _ => skipped += 1,
            }
        }
    }
    if skipped > 0 {
        log::warn!("skipped {skipped} trip hops touching dropped stops");
    }
    log::info!(
        "created transit graph with {} vertices and {} edges",
        vertices.len(),
        edges.len()
    );
    Ok(TransitGraph::new(vertices, edges))
}

/// location of a stop, falling back to its parent station. None when neither has lon,lat.
/// the parent's own parent is not consulted.
fn get_stop_location(stop: &Stop, gtfs: &Gtfs) -> Option<Point<f64>> {
    stop_point(stop).or_else(|| {
        let parent = gtfs.stops.get(stop.parent_station.as_ref()?)?;
        stop_point(parent.as_ref())
    })
}

fn stop_point(stop: &Stop) -> Option<Point<f64>> {
    Some(Point::new(stop.longitude?, stop.latitude?))
}

/// stop times of a trip in ascending `stop_sequence` order. feeds do not have to list
/// stop times in sequence order.
fn get_ordered_stops(trip: &Trip) -> Vec<&StopTime> {
    trip.stop_times
        .iter()
        .sorted_by_key(|stop_time| stop_time.stop_sequence)
        .collect()
}
