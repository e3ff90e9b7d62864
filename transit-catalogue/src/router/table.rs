//! Precomputed shortest paths between every pair of vertices.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use super::graph::{DirectedWeightedGraph, EdgeId, VertexId};

/// Best known way to reach a vertex from a given source.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Reach {
    weight: f64,
    /// Last edge on the path, `None` at the source itself
    prev_edge: Option<EdgeId>,
}

/// A shortest path.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Total weight, in minutes
    pub weight: f64,
    /// Edges from source to destination
    pub edges: Vec<EdgeId>,
}

/// Heap entry; ordered so that [`BinaryHeap`] pops the lightest first.
#[derive(Debug, Clone, Copy)]
struct State {
    weight: f64,
    vertex: VertexId,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest-path trees rooted at every vertex.
///
/// Construction runs Dijkstra once per vertex; queries only walk back along
/// the stored predecessor edges.
#[derive(Debug, Clone)]
pub struct RoutingTable {
    trees: Vec<Vec<Option<Reach>>>,
}

impl RoutingTable {
    /// Compute the table for a graph with non-negative weights.
    pub fn new(graph: &DirectedWeightedGraph) -> Self {
        let trees: Vec<_> = (0..graph.vertex_count())
            .map(|source| shortest_paths_from(graph, VertexId(source)))
            .collect();

        debug!(sources = trees.len(), "routing table computed");

        Self { trees }
    }

    /// Shortest path from `from` to `to`, or `None` if `to` is unreachable.
    ///
    /// A path from a vertex to itself is empty with weight zero.
    pub fn route(&self, graph: &DirectedWeightedGraph, from: VertexId, to: VertexId) -> Option<Route> {
        let tree = self.trees.get(from.0)?;
        let reach = (*tree.get(to.0)?)?;

        let mut edges = Vec::new();
        let mut prev_edge = reach.prev_edge;
        while let Some(id) = prev_edge {
            edges.push(id);
            let edge_from = graph.edge(id).from;
            prev_edge = tree[edge_from.0].and_then(|r| r.prev_edge);
        }
        edges.reverse();

        Some(Route {
            weight: reach.weight,
            edges,
        })
    }
}

fn shortest_paths_from(graph: &DirectedWeightedGraph, source: VertexId) -> Vec<Option<Reach>> {
    let mut reach: Vec<Option<Reach>> = vec![None; graph.vertex_count()];
    let mut settled = vec![false; graph.vertex_count()];
    let mut heap = BinaryHeap::new();

    reach[source.0] = Some(Reach {
        weight: 0.0,
        prev_edge: None,
    });
    heap.push(State {
        weight: 0.0,
        vertex: source,
    });

    while let Some(State { weight, vertex }) = heap.pop() {
        if settled[vertex.0] {
            continue;
        }
        settled[vertex.0] = true;

        for &id in graph.incident_edges(vertex) {
            let edge = graph.edge(id);
            let candidate = weight + edge.weight;
            // strict improvement only: among equal paths the first edge found wins
            let improves = match reach[edge.to.0] {
                Some(current) => candidate < current.weight,
                None => true,
            };
            if improves && !settled[edge.to.0] {
                reach[edge.to.0] = Some(Reach {
                    weight: candidate,
                    prev_edge: Some(id),
                });
                heap.push(State {
                    weight: candidate,
                    vertex: edge.to,
                });
            }
        }
    }

    reach
}
