//! Fastest-route queries over the bus network.
//!
//! The catalogue is turned into a weighted directed graph with one vertex per
//! served stop and one edge per (boarding, alighting) pair along each bus.
//! Shortest paths from every vertex are precomputed once with Dijkstra's
//! algorithm, so answering a query is a table lookup plus path reconstruction.

mod builder;
mod config;
mod error;
mod graph;
mod table;
mod transport;

pub use builder::{RouteGraph, RouteGraphBuilder};
pub use config::RoutingSettings;
pub use error::RouterError;
pub use graph::{DirectedWeightedGraph, Edge, EdgeId, VertexId};
pub use table::{Route, RoutingTable};
pub use transport::{RouteEdge, RouteInfo, TransportRouter};
