//! Transit catalogue: stops, bus lines and road distances.
//!
//! A catalogue is populated through a [`CatalogueBuilder`] (stops, then
//! distances, then buses) and frozen with [`CatalogueBuilder::build`], which
//! computes every bus's statistics exactly once. The resulting [`Catalogue`]
//! is immutable and can be shared across threads for queries.

mod distances;
mod stats;

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

pub use distances::DistanceTable;

use crate::domain::{
    Bus, BusId, BusInfo, CatalogueError, Coordinates, NameId, NameRegistry, Stop, StopId,
    expand_route,
};
use stats::StatsError;

/// Mutable population phase of a catalogue.
#[derive(Debug, Clone, Default)]
pub struct CatalogueBuilder {
    stop_names: NameRegistry<StopId>,
    bus_names: NameRegistry<BusId>,
    stops: HashMap<StopId, Stop>,
    buses: HashMap<BusId, Bus>,
    distances: DistanceTable,
}

impl CatalogueBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stop, or move it if a stop with this name already exists.
    pub fn add_stop(&mut self, name: &str, coordinates: Coordinates) {
        let id = self.stop_names.intern(name);
        self.stops
            .entry(id)
            .and_modify(|stop| stop.coordinates = coordinates)
            .or_insert_with(|| Stop::new(id, coordinates));
    }

    /// Register road distances in order.
    ///
    /// Each `(from, to, meters)` overwrites the forward distance and fills the
    /// reverse one only if it is still unknown, so earlier entries can pre-empt
    /// the mirror of later ones. Stops may be named here before they are added.
    pub fn set_distances<'a, I>(&mut self, distances: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str, u64)>,
    {
        for (from, to, meters) in distances {
            let from = self.stop_names.intern(from);
            let to = self.stop_names.intern(to);
            self.distances.set(from, to, meters);
        }
    }

    /// Register exactly one directed distance, without mirroring.
    pub(crate) fn set_directed_distance(&mut self, from: &str, to: &str, meters: u64) {
        let from = self.stop_names.intern(from);
        let to = self.stop_names.intern(to);
        self.distances.set_directed(from, to, meters);
    }

    /// Add a bus line over already added stops.
    ///
    /// A one-way line is expanded to its full traversal (forward, then back
    /// without repeating the turnaround stop). Adding a bus under an existing
    /// name replaces the old line.
    ///
    /// # Errors
    ///
    /// Returns `Err` and records nothing if:
    /// - a stop on the line was never added
    /// - two consecutive stops of the traversal have no road distance
    pub fn add_bus<S: AsRef<str>>(
        &mut self,
        name: &str,
        stops: &[S],
        is_one_way: bool,
    ) -> Result<(), CatalogueError> {
        let route = stops
            .iter()
            .map(|stop| {
                let stop = stop.as_ref();
                self.stop_names
                    .get(stop)
                    .filter(|id| self.stops.contains_key(id))
                    .ok_or_else(|| CatalogueError::UnknownStop {
                        bus: name.to_string(),
                        stop: stop.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let sequence = expand_route(&route, is_one_way);
        if let Some(pair) = sequence
            .windows(2)
            .find(|pair| self.distances.get(pair[0], pair[1]).is_none())
        {
            return Err(CatalogueError::MissingDistance {
                bus: name.to_string(),
                from: self.stop_names.name(pair[0]).to_string(),
                to: self.stop_names.name(pair[1]).to_string(),
            });
        }

        let id = self.bus_names.intern(name);

        if let Some(previous) = self.buses.remove(&id) {
            debug!(bus = name, "replacing existing bus");
            for stop in &previous.stops {
                if let Some(stop) = self.stops.get_mut(stop) {
                    stop.buses.remove(&id);
                }
            }
        }

        for stop in &sequence {
            if let Some(stop) = self.stops.get_mut(stop) {
                stop.buses.insert(id);
            }
        }

        self.buses.insert(
            id,
            Bus {
                id,
                stops: sequence,
                is_roundtrip: !is_one_way,
            },
        );

        Ok(())
    }

    /// Freeze the dataset, computing every bus's statistics.
    ///
    /// # Errors
    ///
    /// Fails on the first bus (in name order) whose statistics cannot be
    /// computed, including one whose road length overflows `u64`. No
    /// catalogue is produced in that case.
    pub fn build(self) -> Result<Catalogue, CatalogueError> {
        let stop_order = sorted_by_name(self.stops.keys().copied(), &self.stop_names);
        let bus_order = sorted_by_name(self.buses.keys().copied(), &self.bus_names);

        let mut bus_infos = HashMap::with_capacity(self.buses.len());
        for id in &bus_order {
            let bus = &self.buses[id];
            let info = stats::compute(bus, &self.stops, &self.distances)
                .map_err(|err| self.describe(bus.id, err))?;
            bus_infos.insert(bus.id, info);
        }

        debug!(
            stops = self.stops.len(),
            buses = self.buses.len(),
            distances = self.distances.len(),
            "catalogue built"
        );

        Ok(Catalogue {
            stop_names: self.stop_names,
            bus_names: self.bus_names,
            stops: self.stops,
            buses: self.buses,
            bus_infos,
            distances: self.distances,
            stop_order,
            bus_order,
        })
    }

    fn describe(&self, bus: BusId, err: StatsError) -> CatalogueError {
        let bus = self.bus_names.name(bus).to_string();
        match err {
            StatsError::UnknownStop(stop) => CatalogueError::UnknownStop {
                bus,
                stop: self.stop_names.name(stop).to_string(),
            },
            StatsError::MissingDistance { from, to } => CatalogueError::MissingDistance {
                bus,
                from: self.stop_names.name(from).to_string(),
                to: self.stop_names.name(to).to_string(),
            },
            StatsError::DistanceOverflow => CatalogueError::DistanceOverflow { bus },
        }
    }
}

fn sorted_by_name<I>(ids: impl Iterator<Item = I>, names: &NameRegistry<I>) -> Vec<I>
where
    I: NameId,
{
    let mut ids: Vec<I> = ids.collect();
    ids.sort_by(|a, b| names.name(*a).cmp(names.name(*b)));
    ids
}

/// A stop as seen by callers: name, location and serving buses.
#[derive(Debug, Clone, PartialEq)]
pub struct StopView<'a> {
    pub name: &'a str,
    pub coordinates: Coordinates,
    /// Serving buses, ascending by name
    pub buses: BTreeSet<&'a str>,
}

/// A bus as seen by callers.
#[derive(Debug, Clone, PartialEq)]
pub struct BusView<'a> {
    pub name: &'a str,
    /// Stops in traversal order
    pub stops: Vec<&'a str>,
    /// Stops the line was defined with
    pub route: Vec<&'a str>,
    pub is_roundtrip: bool,
    pub info: &'a BusInfo,
}

/// An immutable, fully computed catalogue.
#[derive(Debug, Clone)]
pub struct Catalogue {
    stop_names: NameRegistry<StopId>,
    bus_names: NameRegistry<BusId>,
    stops: HashMap<StopId, Stop>,
    buses: HashMap<BusId, Bus>,
    /// Statistics cached per bus at build time
    bus_infos: HashMap<BusId, BusInfo>,
    distances: DistanceTable,
    stop_order: Vec<StopId>,
    bus_order: Vec<BusId>,
}

impl Catalogue {
    /// Statistics of a bus, or `None` if no such bus exists.
    pub fn bus_info(&self, name: &str) -> Option<&BusInfo> {
        let id = self.bus_names.get(name)?;
        self.bus_infos.get(&id)
    }

    /// Names of the buses serving a stop, ascending.
    ///
    /// Returns `None` if the stop was never added, and an empty set if it
    /// was added but no bus calls there.
    pub fn buses_by_stop(&self, name: &str) -> Option<BTreeSet<&str>> {
        let id = self.stop_names.get(name)?;
        let stop = self.stops.get(&id)?;
        Some(self.bus_name_set(stop))
    }

    /// Registered road distance from one stop to another, in meters.
    pub fn distance(&self, from: &str, to: &str) -> Option<u64> {
        let from = self.stop_names.get(from)?;
        let to = self.stop_names.get(to)?;
        self.distances.get(from, to)
    }

    /// Look up a stop by name.
    pub fn stop(&self, name: &str) -> Option<StopView<'_>> {
        let id = self.stop_names.get(name)?;
        self.stops.get(&id).map(|stop| self.stop_view(stop))
    }

    /// All stops, ascending by name.
    pub fn stops(&self) -> impl Iterator<Item = StopView<'_>> {
        self.ordered_stops().map(|stop| self.stop_view(stop))
    }

    /// Look up a bus by name.
    pub fn bus(&self, name: &str) -> Option<BusView<'_>> {
        let id = self.bus_names.get(name)?;
        self.buses.get(&id).map(|bus| self.bus_view(bus))
    }

    /// All buses, ascending by name.
    pub fn buses(&self) -> impl Iterator<Item = BusView<'_>> {
        self.ordered_buses().map(|bus| self.bus_view(bus))
    }

    /// Every directed road distance, ascending by `(from, to)` name.
    pub fn distances(&self) -> Vec<(&str, &str, u64)> {
        let mut all: Vec<_> = self
            .distances
            .iter()
            .map(|(from, to, meters)| {
                (self.stop_names.name(from), self.stop_names.name(to), meters)
            })
            .collect();
        all.sort();
        all
    }

    /// Number of added stops.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Number of buses.
    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }

    /// Stops ascending by name.
    pub fn ordered_stops(&self) -> impl Iterator<Item = &Stop> {
        self.stop_order.iter().map(|id| &self.stops[id])
    }

    /// Buses ascending by name.
    ///
    /// Graph construction walks buses in this order, so it decides which of
    /// several equally fast routes the router reports.
    pub fn ordered_buses(&self) -> impl Iterator<Item = &Bus> {
        self.bus_order.iter().map(|id| &self.buses[id])
    }

    /// Road distance between two interned stops.
    pub fn distance_between(&self, from: StopId, to: StopId) -> Option<u64> {
        self.distances.get(from, to)
    }

    /// Drop one directed distance from a finished catalogue, leaving a gap
    /// the builder would have rejected.
    #[cfg(test)]
    pub(crate) fn remove_distance(&mut self, from: &str, to: &str) {
        if let (Some(from), Some(to)) = (self.stop_names.get(from), self.stop_names.get(to)) {
            self.distances.remove(from, to);
        }
    }

    /// The raw distance table.
    pub fn distance_table(&self) -> &DistanceTable {
        &self.distances
    }

    /// Registry of every stop name, including names only used by distances.
    pub fn stop_names(&self) -> &NameRegistry<StopId> {
        &self.stop_names
    }

    /// Registry of bus names.
    pub fn bus_names(&self) -> &NameRegistry<BusId> {
        &self.bus_names
    }

    fn bus_name_set(&self, stop: &Stop) -> BTreeSet<&str> {
        stop.buses
            .iter()
            .map(|&bus| self.bus_names.name(bus))
            .collect()
    }

    fn stop_view(&self, stop: &Stop) -> StopView<'_> {
        StopView {
            name: self.stop_names.name(stop.id),
            coordinates: stop.coordinates,
            buses: self.bus_name_set(stop),
        }
    }

    fn bus_view(&self, bus: &Bus) -> BusView<'_> {
        let names = |ids: &[StopId]| {
            ids.iter()
                .map(|&id| self.stop_names.name(id))
                .collect::<Vec<_>>()
        };

        BusView {
            name: self.bus_names.name(bus.id),
            stops: names(&bus.stops),
            route: names(bus.defining_stops()),
            is_roundtrip: bus.is_roundtrip,
            info: &self.bus_infos[&bus.id],
        }
    }
}
