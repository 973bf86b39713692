//! Graph: the owning container for vertices and edges.
//!
//! [`Graph`] is the single entry point for building a DAG. It owns every
//! [`Vertex`] and [`Edge`] it creates, stored as the node and edge weights
//! of a petgraph `StableGraph`. All mutation goes through its methods so the
//! acyclic invariant is enforced in one place:
//!
//! - [`add_vertex`](Graph::add_vertex) always succeeds.
//! - [`add_edge`](Graph::add_edge) validates both endpoints, then asks
//!   whether the destination already reaches the origin. Only when it does
//!   not is the edge recorded, in the graph and in both endpoints' edge
//!   lists together.
//!
//! The graph only grows. Nothing is ever removed, so petgraph indices are
//! dense and follow insertion order, and a failed call always leaves the
//! graph exactly as it was.
//!
//! # Subgraph extraction
//!
//! [`subgraph`](Graph::subgraph) builds an independent graph from the
//! ancestor closure of one root set and the descendant closure of another,
//! plus every edge between copied vertices. Payloads and properties are
//! shared with the source through `Arc`, not deep-cloned.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;
use petgraph::algo::has_path_connecting;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::stable_graph::StableGraph;
use petgraph::Directed;
use tracing::{debug, trace};

use crate::edge::{Edge, EdgeSpec};
use crate::error::{CoreError, EndpointFault, EndpointRole};
use crate::extension::Extension;
use crate::id::{EdgeId, GraphId, VertexId};
use crate::present::Presenter;
use crate::vertex::{Vertex, VertexRef};

/// Default payload and edge property type: a JSON object. Its default is the
/// empty object.
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// The petgraph storage behind a [`Graph`].
pub type Dag<V, E> = StableGraph<Vertex<V>, Edge<E>, Directed, u32>;

/// An append-only directed acyclic graph.
///
/// `V` is the vertex payload type and `E` the edge property type; both are
/// opaque to the graph. Graphs are not `Clone`; identity is part of every
/// handle. Use [`subgraph`](Self::subgraph) to copy.
///
/// Indices are `u32`, so a graph holds fewer than `u32::MAX` vertices and
/// fewer than `u32::MAX` edges. petgraph panics at that limit instead of
/// reusing an index, so handles never alias.
pub struct Graph<V = Properties, E = Properties> {
    id: GraphId,
    /// Vertices and edges, in insertion order.
    dag: Dag<V, E>,
    /// Capability decorator applied to every new vertex and edge.
    extension: Option<Arc<dyn Extension<V, E>>>,
}

impl<V, E> Default for Graph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug, E: fmt::Debug> fmt::Debug for Graph<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("id", &self.id)
            .field("dag", &self.dag)
            .field("extension", &self.extension)
            .finish()
    }
}

impl<V, E> Graph<V, E> {
    /// Creates an empty graph with no extension.
    pub fn new() -> Self {
        Graph {
            id: GraphId::next(),
            dag: StableGraph::new(),
            extension: None,
        }
    }

    /// Creates an empty graph whose vertices and edges are decorated by
    /// `extension` as they are created.
    pub fn with_extension(extension: Arc<dyn Extension<V, E>>) -> Self {
        Graph {
            extension: Some(extension),
            ..Self::new()
        }
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    pub fn id(&self) -> GraphId {
        self.id
    }

    /// Read-only access to the underlying petgraph storage, for running
    /// petgraph algorithms directly.
    pub fn dag(&self) -> &Dag<V, E> {
        &self.dag
    }

    /// All vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<V>> + '_ {
        self.dag.node_indices().map(move |idx| &self.dag[idx])
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge<E>> + '_ {
        self.dag.edge_indices().map(move |idx| &self.dag[idx])
    }

    pub fn extension(&self) -> Option<&Arc<dyn Extension<V, E>>> {
        self.extension.as_ref()
    }

    pub fn vertex_count(&self) -> usize {
        self.dag.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.dag.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.dag.node_count() == 0
    }

    /// Returns `true` if `id` names a vertex of this graph.
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.check_vertex(id, EndpointRole::Origin).is_ok()
    }

    /// Looks up a vertex. `None` for foreign or unknown handles.
    pub fn vertex(&self, id: VertexId) -> Option<VertexRef<'_, V, E>> {
        self.check_vertex(id, EndpointRole::Origin).ok()?;
        Some(VertexRef::new(self, self.vertex_at(id)))
    }

    /// Looks up an edge. `None` for foreign or unknown handles.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge<E>> {
        if id.graph() != self.id {
            return None;
        }
        self.dag.edge_weight(id.into())
    }

    /// Iterates over all vertices, with graph access, in insertion order.
    pub fn vertex_refs(&self) -> impl Iterator<Item = VertexRef<'_, V, E>> {
        self.vertices().map(move |v| VertexRef::new(self, v))
    }

    /// Returns whether a nonempty directed path leads from `from` to `to`.
    pub fn has_path(&self, from: VertexId, to: VertexId) -> Result<bool, CoreError> {
        self.check_vertex(from, EndpointRole::Origin)?;
        self.check_vertex(to, EndpointRole::Destination)?;
        Ok(VertexRef::new(self, self.vertex_at(from)).has_path_to(to))
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Adds a vertex carrying `payload` and returns its handle.
    pub fn add_vertex(&mut self, payload: V) -> VertexId {
        self.push_vertex(Arc::new(payload))
    }

    /// Adds a vertex with the default (empty) payload.
    pub fn add_default_vertex(&mut self) -> VertexId
    where
        V: Default,
    {
        self.add_vertex(V::default())
    }

    /// Adds an edge described by `spec`.
    ///
    /// See [`EdgeSpec`] for the accepted endpoint keys and their priority.
    ///
    /// # Errors
    ///
    /// - [`CoreError::InvalidEndpoint`] if an endpoint is missing, belongs to
    ///   another graph, or names no vertex of this graph.
    /// - [`CoreError::CycleRejected`] if origin and destination are the same
    ///   vertex, or the destination already reaches the origin.
    ///
    /// On error the graph is unchanged.
    pub fn add_edge(&mut self, spec: EdgeSpec<E>) -> Result<EdgeId, CoreError>
    where
        E: Default,
    {
        let origin = self.resolve_endpoint(spec.resolved_origin(), EndpointRole::Origin)?;
        let destination =
            self.resolve_endpoint(spec.resolved_destination(), EndpointRole::Destination)?;

        if origin == destination
            || has_path_connecting(
                &self.dag,
                NodeIndex::from(destination),
                NodeIndex::from(origin),
                None,
            )
        {
            debug!(%origin, %destination, graph = %self.id, "rejected edge: would create a cycle");
            return Err(CoreError::CycleRejected {
                origin,
                destination,
            });
        }

        let properties = Arc::new(spec.properties.unwrap_or_default());
        let id = self.commit_edge(origin, destination, properties);
        trace!(edge = %id, %origin, %destination, "added edge");

        #[cfg(debug_assertions)]
        self.assert_consistency();

        Ok(id)
    }

    /// Adds an edge from `from` to `to` with default properties.
    pub fn connect(&mut self, from: VertexId, to: VertexId) -> Result<EdgeId, CoreError>
    where
        E: Default,
    {
        self.add_edge(EdgeSpec::between(from, to))
    }

    // -----------------------------------------------------------------------
    // Extraction and presentation
    // -----------------------------------------------------------------------

    /// Builds a new, independent graph from:
    ///
    /// 1. every vertex of `predecessors_of` and all of its ancestors;
    /// 2. every vertex of `successors_of` and all of its descendants;
    /// 3. every edge whose endpoints were both copied.
    ///
    /// Each vertex and each edge is copied exactly once. Vertices appear in
    /// discovery order, ancestor closure first; edges keep their original
    /// order. Payloads and properties are shared with this graph, and the
    /// copy is decorated by the same extension.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidEndpoint`] if any root is not a vertex of this
    /// graph. Roots are validated before anything is built.
    pub fn subgraph(
        &self,
        predecessors_of: &[VertexId],
        successors_of: &[VertexId],
    ) -> Result<Graph<V, E>, CoreError> {
        for &root in predecessors_of.iter().chain(successors_of) {
            self.check_vertex(root, EndpointRole::Root)?;
        }

        let mut predecessors = IndexSet::new();
        for &root in predecessors_of {
            predecessors.insert(root);
            VertexRef::new(self, self.vertex_at(root)).ancestors(&mut predecessors);
        }

        let mut successors = IndexSet::new();
        for &root in successors_of {
            successors.insert(root);
            VertexRef::new(self, self.vertex_at(root)).descendants(&mut successors);
        }

        let mut result = Graph {
            extension: self.extension.clone(),
            ..Graph::new()
        };

        // original vertex -> copied vertex
        let mut mapping: HashMap<VertexId, VertexId> =
            HashMap::with_capacity(predecessors.len() + successors.len());
        for &original in predecessors.iter().chain(successors.iter()) {
            if !mapping.contains_key(&original) {
                let payload = Arc::clone(self.vertex_at(original).shared_payload());
                mapping.insert(original, result.push_vertex(payload));
            }
        }

        for edge in self.edges() {
            let origin = mapping.get(&edge.origin());
            let destination = mapping.get(&edge.destination());
            if let (Some(&origin), Some(&destination)) = (origin, destination) {
                result.commit_edge(origin, destination, Arc::clone(edge.shared_properties()));
            }
        }

        debug!(
            source = %self.id,
            result = %result.id,
            vertices = result.vertex_count(),
            edges = result.edge_count(),
            "extracted subgraph"
        );

        #[cfg(debug_assertions)]
        result.assert_consistency();

        Ok(result)
    }

    /// Walks the graph into `presenter` and returns it.
    ///
    /// Every vertex is registered before any edge; vertices and edges are
    /// presented in insertion order.
    pub fn render<P: Presenter<V, E>>(&self, mut presenter: P) -> P {
        let handles: Vec<P::Handle> = self
            .vertices()
            .map(|vertex| presenter.add_vertex(vertex))
            .collect();

        for edge in self.edges() {
            let from = &handles[edge.origin().index() as usize];
            let to = &handles[edge.destination().index() as usize];
            presenter.add_edge(from, to, edge);
        }

        presenter
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Vertex by a handle already known to belong to this graph.
    pub(crate) fn vertex_at(&self, id: VertexId) -> &Vertex<V> {
        &self.dag[NodeIndex::from(id)]
    }

    /// Edge by a handle already known to belong to this graph.
    pub(crate) fn edge_at(&self, id: EdgeId) -> &Edge<E> {
        &self.dag[EdgeIndex::from(id)]
    }

    fn check_vertex(&self, id: VertexId, role: EndpointRole) -> Result<VertexId, CoreError> {
        if id.graph() != self.id {
            return Err(CoreError::InvalidEndpoint {
                role,
                reason: EndpointFault::ForeignGraph {
                    expected: self.id,
                    found: id.graph(),
                },
            });
        }
        if self.dag.node_weight(id.into()).is_none() {
            return Err(CoreError::InvalidEndpoint {
                role,
                reason: EndpointFault::UnknownVertex {
                    graph: self.id,
                    index: id.index(),
                },
            });
        }
        Ok(id)
    }

    fn resolve_endpoint(
        &self,
        endpoint: Option<VertexId>,
        role: EndpointRole,
    ) -> Result<VertexId, CoreError> {
        let id = endpoint.ok_or(CoreError::InvalidEndpoint {
            role,
            reason: EndpointFault::Missing,
        })?;
        self.check_vertex(id, role)
    }

    fn push_vertex(&mut self, payload: Arc<V>) -> VertexId {
        // Append-only: the next node index is the current node count.
        let id = VertexId::new(self.id, self.dag.node_count() as u32);
        let capability = self
            .extension
            .as_ref()
            .and_then(|ext| ext.vertex_capability(id, &payload));
        let idx = self.dag.add_node(Vertex::new(id, payload, capability));
        debug_assert_eq!(idx, NodeIndex::from(id));
        id
    }

    /// Records an edge whose endpoints and acyclicity are already verified.
    fn commit_edge(
        &mut self,
        origin: VertexId,
        destination: VertexId,
        properties: Arc<E>,
    ) -> EdgeId {
        let id = EdgeId::new(self.id, self.dag.edge_count() as u32);
        let capability = self
            .extension
            .as_ref()
            .and_then(|ext| ext.edge_capability(id, &properties));
        let idx = self.dag.add_edge(
            origin.into(),
            destination.into(),
            Edge::new(id, origin, destination, properties, capability),
        );
        debug_assert_eq!(idx, EdgeIndex::from(id));
        self.dag[NodeIndex::from(origin)].push_outgoing(id);
        self.dag[NodeIndex::from(destination)].push_incoming(id);
        id
    }

    // -----------------------------------------------------------------------
    // Debug consistency assertion
    // -----------------------------------------------------------------------

    /// Verifies that each vertex's edge lists mirror petgraph's adjacency
    /// and that every stored handle matches its petgraph index.
    ///
    /// Only called in debug builds (via `cfg(debug_assertions)`).
    #[cfg(debug_assertions)]
    fn assert_consistency(&self) {
        for idx in self.dag.node_indices() {
            let vertex = &self.dag[idx];
            assert_eq!(
                NodeIndex::from(vertex.id()),
                idx,
                "Vertex {} stored at {:?}",
                vertex.id(),
                idx
            );
            assert_eq!(
                vertex.outgoing_edges().len(),
                self.dag.edges_directed(idx, petgraph::Outgoing).count(),
                "Outgoing list of {} disagrees with the graph",
                vertex.id()
            );
            assert_eq!(
                vertex.incoming_edges().len(),
                self.dag.edges_directed(idx, petgraph::Incoming).count(),
                "Incoming list of {} disagrees with the graph",
                vertex.id()
            );
            for &e in vertex.outgoing_edges() {
                assert_eq!(
                    self.edge_at(e).origin(),
                    vertex.id(),
                    "Edge {} listed as outgoing of {} but leaves elsewhere",
                    e,
                    vertex.id()
                );
            }
            for &e in vertex.incoming_edges() {
                assert_eq!(
                    self.edge_at(e).destination(),
                    vertex.id(),
                    "Edge {} listed as incoming of {} but arrives elsewhere",
                    e,
                    vertex.id()
                );
            }
        }
        for idx in self.dag.edge_indices() {
            let edge = &self.dag[idx];
            assert_eq!(
                EdgeIndex::from(edge.id()),
                idx,
                "Edge {} stored at {:?}",
                edge.id(),
                idx
            );
            assert_eq!(
                self.dag.edge_endpoints(idx),
                Some((
                    NodeIndex::from(edge.origin()),
                    NodeIndex::from(edge.destination())
                )),
                "Edge {} endpoints disagree with the graph",
                edge.id()
            );
            assert_ne!(edge.origin(), edge.destination(), "Self-loop {}", edge.id());
        }
    }
}
