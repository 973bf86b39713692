//! Identity handles for graphs, vertices, and edges.
//!
//! Vertices and edges are compared by identity, never by payload. A
//! [`VertexId`] or [`EdgeId`] pairs the owning graph's [`GraphId`] with an
//! petgraph index, so a handle from one graph can never be mistaken for a
//! vertex of another graph even when the indices coincide.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use petgraph::graph::{EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of a [`Graph`](crate::graph::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GraphId(pub u64);

impl GraphId {
    /// Allocates a fresh id. Ids are never reused within a process.
    pub(crate) fn next() -> Self {
        GraphId(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Stable vertex handle: owning graph plus `NodeIndex<u32>` position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId {
    graph: GraphId,
    index: u32,
}

impl VertexId {
    pub(crate) fn new(graph: GraphId, index: u32) -> Self {
        VertexId { graph, index }
    }

    /// The graph this vertex was created by.
    pub fn graph(&self) -> GraphId {
        self.graph
    }

    /// Position of the vertex in its graph's insertion order.
    pub fn index(&self) -> u32 {
        self.index
    }
}

/// Stable edge handle: owning graph plus `EdgeIndex<u32>` position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId {
    graph: GraphId,
    index: u32,
}

impl EdgeId {
    pub(crate) fn new(graph: GraphId, index: u32) -> Self {
        EdgeId { graph, index }
    }

    /// The graph this edge was created by.
    pub fn graph(&self) -> GraphId {
        self.graph
    }

    /// Position of the edge in its graph's insertion order.
    pub fn index(&self) -> u32 {
        self.index
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:v{}", self.graph, self.index)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:e{}", self.graph, self.index)
    }
}

// Bridge from handles to petgraph indices. The reverse direction needs the
// owning graph and goes through the stored vertex or edge.

impl From<VertexId> for NodeIndex<u32> {
    fn from(id: VertexId) -> Self {
        NodeIndex::new(id.index as usize)
    }
}

impl From<EdgeId> for EdgeIndex<u32> {
    fn from(id: EdgeId) -> Self {
        EdgeIndex::new(id.index as usize)
    }
}
