//! Arena-backed directed weighted graph.
//!
//! Vertices and edges are small integer ids indexing flat vectors; names are
//! only resolved at the API boundary.

use crate::domain::BusId;

/// Index of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

/// Index of an edge, in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

/// A bus ride between two stops without changing.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    /// Wait plus riding time, in minutes
    pub weight: f64,
    /// Bus ridden along this edge
    pub bus: BusId,
    /// Number of consecutive stop-to-stop hops covered
    pub span_count: usize,
}

/// Directed graph with per-vertex outgoing edge lists.
#[derive(Debug, Clone, Default)]
pub struct DirectedWeightedGraph {
    edges: Vec<Edge>,
    incidence: Vec<Vec<EdgeId>>,
}

impl DirectedWeightedGraph {
    /// Create a graph with `vertex_count` vertices and no edges.
    pub fn with_vertex_count(vertex_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            incidence: vec![Vec::new(); vertex_count],
        }
    }

    /// Append an edge, growing the vertex set if needed.
    pub fn add_edge(&mut self, edge: Edge) -> EdgeId {
        let id = EdgeId(self.edges.len());
        let needed = edge.from.0.max(edge.to.0) + 1;
        if self.incidence.len() < needed {
            self.incidence.resize(needed, Vec::new());
        }
        self.incidence[edge.from.0].push(id);
        self.edges.push(edge);
        id
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.incidence.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the edge with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not returned by [`add_edge`](Self::add_edge).
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    /// Outgoing edges of a vertex, in insertion order.
    pub fn incident_edges(&self, vertex: VertexId) -> &[EdgeId] {
        self.incidence
            .get(vertex.0)
            .map(|edges| edges.as_slice())
            .unwrap_or(&[])
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(index, edge)| (EdgeId(index), edge))
    }
}
