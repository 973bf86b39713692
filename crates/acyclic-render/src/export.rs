//! Export into a petgraph `StableGraph`.
//!
//! Node and edge weights are the shared `Arc` payloads and properties, so
//! the export does not clone any caller data. Node indices follow vertex
//! insertion order.

use std::sync::Arc;

use acyclic_core::{Edge, Graph, Presenter, Vertex};
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableGraph;
use petgraph::Directed;

/// The exported petgraph type.
pub type ExportGraph<V, E> = StableGraph<Arc<V>, Arc<E>, Directed, u32>;

/// Presenter building an [`ExportGraph`].
#[derive(Debug)]
pub struct PetgraphPresenter<V, E> {
    graph: ExportGraph<V, E>,
}

impl<V, E> Default for PetgraphPresenter<V, E> {
    fn default() -> Self {
        PetgraphPresenter {
            graph: StableGraph::default(),
        }
    }
}

impl<V, E> PetgraphPresenter<V, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_graph(self) -> ExportGraph<V, E> {
        self.graph
    }
}

impl<V, E> Presenter<V, E> for PetgraphPresenter<V, E> {
    type Handle = NodeIndex<u32>;

    fn add_vertex(&mut self, vertex: &Vertex<V>) -> NodeIndex<u32> {
        self.graph.add_node(Arc::clone(vertex.shared_payload()))
    }

    fn add_edge(&mut self, from: &NodeIndex<u32>, to: &NodeIndex<u32>, edge: &Edge<E>) {
        self.graph
            .add_edge(*from, *to, Arc::clone(edge.shared_properties()));
    }
}

/// Exports `graph` as a petgraph `StableGraph`.
pub fn to_petgraph<V, E>(graph: &Graph<V, E>) -> ExportGraph<V, E> {
    graph.render(PetgraphPresenter::new()).into_graph()
}

/// Returns `true` if the exported graph has a topological order.
pub fn is_acyclic<V, E>(graph: &ExportGraph<V, E>) -> bool {
    petgraph::algo::toposort(graph, None).is_ok()
}
