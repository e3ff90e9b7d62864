//! Name-level routing API over a finished catalogue.

use tracing::debug;

use super::builder::{RouteGraph, RouteGraphBuilder};
use super::config::RoutingSettings;
use super::error::RouterError;
use super::graph::VertexId;
use super::table::RoutingTable;
use crate::catalogue::Catalogue;
use crate::domain::{BusId, NameRegistry, StopId};

/// One ride of a route: board `bus` at `from`, alight at `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEdge<'a> {
    pub from: &'a str,
    pub to: &'a str,
    /// Wait plus riding time, in minutes
    pub weight: f64,
    pub bus: &'a str,
    /// Number of stop-to-stop hops ridden
    pub span_count: usize,
}

/// Fastest route between two stops.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInfo<'a> {
    /// Wait paid before every ride, in minutes
    pub bus_wait_time: u32,
    /// Total time, in minutes
    pub total_weight: f64,
    /// Rides in travel order; empty when origin and destination coincide
    pub edges: Vec<RouteEdge<'a>>,
}

/// Answers fastest-route queries between named stops.
///
/// The router owns copies of the name registries it needs, so it does not
/// borrow the catalogue it was built from.
#[derive(Debug, Clone)]
pub struct TransportRouter {
    settings: RoutingSettings,
    stop_names: NameRegistry<StopId>,
    bus_names: NameRegistry<BusId>,
    graph: RouteGraph,
    table: RoutingTable,
}

impl TransportRouter {
    /// Build the routing graph and precompute all shortest paths.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidSettings`] if the settings would make
    /// travel times meaningless.
    pub fn new(catalogue: &Catalogue, settings: RoutingSettings) -> Result<Self, RouterError> {
        settings.validate()?;

        let graph = RouteGraphBuilder::new(catalogue, &settings).build();
        let table = RoutingTable::new(graph.graph());

        debug!(
            bus_wait_time = settings.bus_wait_time,
            bus_velocity = settings.bus_velocity,
            "transport router ready"
        );

        Ok(Self {
            settings,
            stop_names: catalogue.stop_names().clone(),
            bus_names: catalogue.bus_names().clone(),
            graph,
            table,
        })
    }

    /// Fastest route from one stop to another.
    ///
    /// Returns `None` if either stop is unknown or served by no bus, or if no
    /// route connects them.
    pub fn route_info(&self, from: &str, to: &str) -> Option<RouteInfo<'_>> {
        let from = self.vertex(from)?;
        let to = self.vertex(to)?;
        let route = self.table.route(self.graph.graph(), from, to)?;

        let edges = route
            .edges
            .iter()
            .map(|&id| {
                let edge = self.graph.graph().edge(id);
                RouteEdge {
                    from: self.stop_names.name(self.graph.stop(edge.from)),
                    to: self.stop_names.name(self.graph.stop(edge.to)),
                    weight: edge.weight,
                    bus: self.bus_names.name(edge.bus),
                    span_count: edge.span_count,
                }
            })
            .collect();

        Some(RouteInfo {
            bus_wait_time: self.settings.bus_wait_time,
            total_weight: route.weight,
            edges,
        })
    }

    /// Settings the router was built with.
    pub fn settings(&self) -> &RoutingSettings {
        &self.settings
    }

    /// The routing graph.
    pub fn graph(&self) -> &RouteGraph {
        &self.graph
    }

    fn vertex(&self, stop: &str) -> Option<VertexId> {
        let id = self.stop_names.get(stop)?;
        self.graph.vertex(id)
    }
}
