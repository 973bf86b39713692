//! Edges and the keyed edge specification accepted by
//! [`Graph::add_edge`](crate::graph::Graph::add_edge).

use std::any::Any;
use std::sync::Arc;

use crate::extension::{downcast, Capability};
use crate::id::{EdgeId, VertexId};

/// A directed arc between two vertices of the same graph.
///
/// Edges are immutable once created. Two edges with the same endpoints and
/// equal properties are still distinct; identity is the [`EdgeId`].
#[derive(Debug)]
pub struct Edge<E> {
    id: EdgeId,
    origin: VertexId,
    destination: VertexId,
    properties: Arc<E>,
    capability: Option<Capability>,
}

impl<E> Edge<E> {
    pub(crate) fn new(
        id: EdgeId,
        origin: VertexId,
        destination: VertexId,
        properties: Arc<E>,
        capability: Option<Capability>,
    ) -> Self {
        Edge {
            id,
            origin,
            destination,
            properties,
            capability,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// The vertex this edge leaves.
    pub fn origin(&self) -> VertexId {
        self.origin
    }

    /// The vertex this edge arrives at.
    pub fn destination(&self) -> VertexId {
        self.destination
    }

    /// Caller-supplied properties. Never interpreted by the graph.
    pub fn properties(&self) -> &E {
        &self.properties
    }

    /// Shared handle to the properties, as reused by subgraph copies.
    pub fn shared_properties(&self) -> &Arc<E> {
        &self.properties
    }

    /// The capability attached by the graph's extension, if it has the
    /// requested type.
    pub fn capability<T: Any>(&self) -> Option<&T> {
        downcast(&self.capability)
    }
}

/// Endpoints and properties for a new edge.
///
/// Each endpoint can be given under any of four keys. When more than one key
/// of a side is set, the first in this order wins:
///
/// | side        | priority                                   |
/// |-------------|--------------------------------------------|
/// | origin      | `origin` > `source` > `from` > `start`     |
/// | destination | `destination` > `sink` > `to` > `end`      |
///
/// Omitted properties default to `E::default()`.
#[derive(Debug, Clone)]
pub struct EdgeSpec<E> {
    pub origin: Option<VertexId>,
    pub source: Option<VertexId>,
    pub from: Option<VertexId>,
    pub start: Option<VertexId>,
    pub destination: Option<VertexId>,
    pub sink: Option<VertexId>,
    pub to: Option<VertexId>,
    pub end: Option<VertexId>,
    pub properties: Option<E>,
}

impl<E> Default for EdgeSpec<E> {
    fn default() -> Self {
        EdgeSpec {
            origin: None,
            source: None,
            from: None,
            start: None,
            destination: None,
            sink: None,
            to: None,
            end: None,
            properties: None,
        }
    }
}

impl<E> EdgeSpec<E> {
    /// An empty spec. At least one key per side must be set before use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for `EdgeSpec::new().from(from).to(to)`.
    pub fn between(from: VertexId, to: VertexId) -> Self {
        Self::new().from(from).to(to)
    }

    pub fn origin(mut self, v: VertexId) -> Self {
        self.origin = Some(v);
        self
    }

    pub fn source(mut self, v: VertexId) -> Self {
        self.source = Some(v);
        self
    }

    pub fn from(mut self, v: VertexId) -> Self {
        self.from = Some(v);
        self
    }

    pub fn start(mut self, v: VertexId) -> Self {
        self.start = Some(v);
        self
    }

    pub fn destination(mut self, v: VertexId) -> Self {
        self.destination = Some(v);
        self
    }

    pub fn sink(mut self, v: VertexId) -> Self {
        self.sink = Some(v);
        self
    }

    pub fn to(mut self, v: VertexId) -> Self {
        self.to = Some(v);
        self
    }

    pub fn end(mut self, v: VertexId) -> Self {
        self.end = Some(v);
        self
    }

    pub fn properties(mut self, properties: E) -> Self {
        self.properties = Some(properties);
        self
    }

    /// The origin after alias resolution.
    pub fn resolved_origin(&self) -> Option<VertexId> {
        self.origin.or(self.source).or(self.from).or(self.start)
    }

    /// The destination after alias resolution.
    pub fn resolved_destination(&self) -> Option<VertexId> {
        self.destination.or(self.sink).or(self.to).or(self.end)
    }
}
