//! Per-bus statistics.

use std::collections::HashMap;

use tracing::trace;

use super::distances::DistanceTable;
use crate::domain::{Bus, BusInfo, Stop, StopId};

/// Why statistics could not be computed for a bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum StatsError {
    /// A stop on the line has no coordinates
    UnknownStop(StopId),
    /// A leg has no registered road distance
    MissingDistance { from: StopId, to: StopId },
    /// The road length does not fit in a `u64`
    DistanceOverflow,
}

/// Sum of registered road distances over consecutive stops.
pub(super) fn road_distance(bus: &Bus, distances: &DistanceTable) -> Result<u64, StatsError> {
    bus.legs().try_fold(0u64, |total, (from, to)| {
        let meters = distances
            .get(from, to)
            .ok_or(StatsError::MissingDistance { from, to })?;
        total
            .checked_add(meters)
            .ok_or(StatsError::DistanceOverflow)
    })
}

/// Sum of great-circle distances over consecutive stops.
pub(super) fn geo_distance(bus: &Bus, stops: &HashMap<StopId, Stop>) -> Result<f64, StatsError> {
    let coordinates = |id: StopId| {
        stops
            .get(&id)
            .map(|stop| stop.coordinates)
            .ok_or(StatsError::UnknownStop(id))
    };

    bus.legs().try_fold(0.0, |total, (from, to)| -> Result<f64, StatsError> {
        let from = coordinates(from)?;
        let to = coordinates(to)?;
        Ok(total + from.distance_to(&to))
    })
}

/// Compute the full statistics record for a bus.
pub(super) fn compute(
    bus: &Bus,
    stops: &HashMap<StopId, Stop>,
    distances: &DistanceTable,
) -> Result<BusInfo, StatsError> {
    let geo = geo_distance(bus, stops)?;
    let road = road_distance(bus, distances)?;
    let info = BusInfo::new(bus.stops.len(), bus.unique_stop_count(), geo, road);

    trace!(
        bus = %bus.id,
        stops = info.stops_count,
        road = info.road_distance,
        geo = info.geo_distance,
        "computed bus statistics"
    );

    Ok(info)
}
