//! Bus line types.
//!
//! A `Bus` stores its traversal order: for a one-way line that is the forward
//! stop list followed by the way back, with the turnaround stop not repeated.

use std::collections::HashSet;


use super::{BusId, StopId};

/// Expand a defining stop list into the order a bus actually visits stops.
///
/// A one-way line `A - B - C` is driven as `A, B, C, B, A`.
///
/// # Examples
///
/// ```
/// use transit_catalogue::domain::{StopId, expand_route};
///
/// let route = [StopId(0), StopId(1), StopId(2)];
/// let full = expand_route(&route, true);
/// assert_eq!(full, vec![StopId(0), StopId(1), StopId(2), StopId(1), StopId(0)]);
///
/// assert_eq!(expand_route(&route, false), route.to_vec());
/// ```
pub fn expand_route(route: &[StopId], is_one_way: bool) -> Vec<StopId> {
    let mut stops = route.to_vec();
    if is_one_way {
        stops.extend(route.iter().rev().skip(1));
    }
    stops
}

/// A bus line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bus {
    /// Interned bus name
    pub id: BusId,
    /// Stops in traversal order
    pub stops: Vec<StopId>,
    /// Whether the line was defined as a round trip
    pub is_roundtrip: bool,
}

impl Bus {
    /// Create a bus from its defining stop list.
    pub fn new(id: BusId, route: &[StopId], is_one_way: bool) -> Self {
        Self {
            id,
            stops: expand_route(route, is_one_way),
            is_roundtrip: !is_one_way,
        }
    }

    /// The stop list the line was defined with.
    ///
    /// For one-way lines this is the forward half of the traversal,
    /// up to and including the turnaround stop.
    pub fn defining_stops(&self) -> &[StopId] {
        if self.is_roundtrip || self.stops.is_empty() {
            &self.stops
        } else {
            &self.stops[..self.stops.len() / 2 + 1]
        }
    }

    /// Number of distinct stops on the line.
    pub fn unique_stop_count(&self) -> usize {
        self.stops.iter().collect::<HashSet<_>>().len()
    }

    /// Consecutive stop pairs in traversal order.
    pub fn legs(&self) -> impl Iterator<Item = (StopId, StopId)> + '_ {
        self.stops.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

/// Statistics derived from a bus and the catalogue it lives in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BusInfo {
    /// Length of the traversal, counting revisits
    pub stops_count: usize,
    /// Number of distinct stops
    pub unique_stops_count: usize,
    /// Sum of great-circle distances between consecutive stops, in meters
    pub geo_distance: f64,
    /// Sum of registered road distances between consecutive stops, in meters
    pub road_distance: u64,
    /// `road_distance / geo_distance`, or `None` when the geographic length is zero
    pub curvature: Option<f64>,
}

impl BusInfo {
    /// Assemble statistics, deriving curvature from the two lengths.
    pub fn new(
        stops_count: usize,
        unique_stops_count: usize,
        geo_distance: f64,
        road_distance: u64,
    ) -> Self {
        let curvature = if geo_distance == 0.0 {
            None
        } else {
            Some(road_distance as f64 / geo_distance)
        };

        Self {
            stops_count,
            unique_stops_count,
            geo_distance,
            road_distance,
            curvature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u32]) -> Vec<StopId> {
        raw.iter().copied().map(StopId).collect()
    }

    #[test]
    fn one_way_route_is_mirrored_without_turnaround_repeat() {
        let bus = Bus::new(BusId(0), &ids(&[0, 1, 1, 2]), true);
        assert_eq!(bus.stops, ids(&[0, 1, 1, 2, 1, 1, 0]));
        assert!(!bus.is_roundtrip);
        assert_eq!(bus.stops.len(), 7);
        assert_eq!(bus.unique_stop_count(), 3);
    }

    #[test]
    fn round_trip_route_is_kept_verbatim() {
        let bus = Bus::new(BusId(0), &ids(&[0, 1, 2, 3, 4, 0]), false);
        assert_eq!(bus.stops, ids(&[0, 1, 2, 3, 4, 0]));
        assert!(bus.is_roundtrip);
        assert_eq!(bus.unique_stop_count(), 5);
    }

    #[test]
    fn defining_stops_recover_the_forward_half() {
        let one_way = Bus::new(BusId(0), &ids(&[4, 5, 6]), true);
        assert_eq!(one_way.defining_stops(), ids(&[4, 5, 6]).as_slice());

        let single = Bus::new(BusId(1), &ids(&[4]), true);
        assert_eq!(single.stops, ids(&[4]));
        assert_eq!(single.defining_stops(), ids(&[4]).as_slice());

        let empty = Bus::new(BusId(2), &[], true);
        assert!(empty.defining_stops().is_empty());

        let round = Bus::new(BusId(3), &ids(&[4, 5, 4]), false);
        assert_eq!(round.defining_stops(), ids(&[4, 5, 4]).as_slice());
    }

    #[test]
    fn legs_walk_consecutive_pairs() {
        let bus = Bus::new(BusId(0), &ids(&[0, 1, 2]), true);
        let legs: Vec<_> = bus.legs().collect();
        assert_eq!(
            legs,
            vec![
                (StopId(0), StopId(1)),
                (StopId(1), StopId(2)),
                (StopId(2), StopId(1)),
                (StopId(1), StopId(0)),
            ]
        );
    }

    #[test]
    fn curvature_is_road_over_geo() {
        let info = BusInfo::new(6, 5, 4371.0, 5950);
        let curvature = info.curvature.unwrap();
        assert!((curvature - 5950.0 / 4371.0).abs() < 1e-12);
    }

    #[test]
    fn zero_geo_distance_has_no_curvature() {
        let info = BusInfo::new(1, 1, 0.0, 0);
        assert_eq!(info.curvature, None);
    }
}
