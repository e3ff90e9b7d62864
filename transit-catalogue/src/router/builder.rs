//! Route graph construction.
//!
//! Every bus contributes an edge for each (boarding index `i`, alighting
//! index `j > i`) pair of its traversal, weighted by the boarding wait plus
//! the riding time of every hop in between. That is quadratic in the stops of
//! a bus, but a route query never has to ride a bus stop by stop.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::config::RoutingSettings;
use super::graph::{DirectedWeightedGraph, Edge, VertexId};
use crate::catalogue::Catalogue;
use crate::domain::{Bus, StopId};

/// The routing graph plus the mapping between stops and vertices.
#[derive(Debug, Clone)]
pub struct RouteGraph {
    graph: DirectedWeightedGraph,
    /// Stop at each vertex
    stops: Vec<StopId>,
    vertices: HashMap<StopId, VertexId>,
}

impl RouteGraph {
    /// The underlying graph.
    pub fn graph(&self) -> &DirectedWeightedGraph {
        &self.graph
    }

    /// Vertex of a stop, if any bus serves it.
    pub fn vertex(&self, stop: StopId) -> Option<VertexId> {
        self.vertices.get(&stop).copied()
    }

    /// Stop represented by a vertex.
    pub fn stop(&self, vertex: VertexId) -> StopId {
        self.stops[vertex.0]
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.stops.len()
    }
}

/// Builds a [`RouteGraph`] from a finished catalogue.
pub struct RouteGraphBuilder<'a> {
    catalogue: &'a Catalogue,
    settings: &'a RoutingSettings,
}

impl<'a> RouteGraphBuilder<'a> {
    /// Create a builder over a catalogue.
    pub fn new(catalogue: &'a Catalogue, settings: &'a RoutingSettings) -> Self {
        Self {
            catalogue,
            settings,
        }
    }

    /// Build the graph.
    ///
    /// Vertex ids are assigned up front, in the order stops are first met
    /// while walking buses by name. Stops no bus calls at get no vertex.
    ///
    /// A leg without a road distance ends the edges from that boarding
    /// point: alighting beyond it would ride through the unknown hop.
    /// Catalogues built through [`CatalogueBuilder::add_bus`] never have such
    /// a gap.
    ///
    /// [`CatalogueBuilder::add_bus`]: crate::catalogue::CatalogueBuilder::add_bus
    pub fn build(&self) -> RouteGraph {
        let (stops, vertices) = self.assign_vertices();
        let mut graph = DirectedWeightedGraph::with_vertex_count(stops.len());

        for bus in self.catalogue.ordered_buses() {
            self.add_bus_edges(bus, &vertices, &mut graph);
        }

        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "route graph built"
        );

        RouteGraph {
            graph,
            stops,
            vertices,
        }
    }

    fn assign_vertices(&self) -> (Vec<StopId>, HashMap<StopId, VertexId>) {
        let mut stops = Vec::new();
        let mut vertices = HashMap::new();

        for bus in self.catalogue.ordered_buses() {
            for &stop in &bus.stops {
                vertices.entry(stop).or_insert_with(|| {
                    stops.push(stop);
                    VertexId(stops.len() - 1)
                });
            }
        }

        (stops, vertices)
    }

    fn add_bus_edges(
        &self,
        bus: &Bus,
        vertices: &HashMap<StopId, VertexId>,
        graph: &mut DirectedWeightedGraph,
    ) {
        let stops = &bus.stops;

        for i in 0..stops.len() {
            let from = vertices[&stops[i]];
            let mut weight = self.settings.wait_minutes();

            for j in (i + 1)..stops.len() {
                let Some(meters) = self.catalogue.distance_between(stops[j - 1], stops[j]) else {
                    // later alighting points would ride through the unknown hop
                    warn!(
                        bus = self.catalogue.bus_names().name(bus.id),
                        from = self.catalogue.stop_names().name(stops[j - 1]),
                        to = self.catalogue.stop_names().name(stops[j]),
                        "no road distance, skipping edges"
                    );
                    break;
                };
                weight += self.settings.travel_minutes(meters);

                graph.add_edge(Edge {
                    from,
                    to: vertices[&stops[j]],
                    weight,
                    bus: bus.id,
                    span_count: j - i,
                });
            }
        }
    }
}
