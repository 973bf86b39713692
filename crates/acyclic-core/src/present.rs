//! The contract between a graph and an external presentation layer.
//!
//! [`Graph::render`](crate::graph::Graph::render) drives a [`Presenter`]:
//! every vertex is registered first, in insertion order, and then every edge,
//! in insertion order, wired through the handles the presenter returned for
//! its endpoints. What the presenter builds (a DOT document, a petgraph
//! value, a UI model) is its own business.

use crate::edge::Edge;
use crate::vertex::Vertex;

pub trait Presenter<V, E> {
    /// Opaque handle the presenter uses to wire edges.
    type Handle;

    /// Registers a vertex and returns its handle.
    fn add_vertex(&mut self, vertex: &Vertex<V>) -> Self::Handle;

    /// Registers an edge between two previously returned handles.
    fn add_edge(&mut self, from: &Self::Handle, to: &Self::Handle, edge: &Edge<E>);
}
