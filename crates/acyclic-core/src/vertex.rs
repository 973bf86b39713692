//! Vertices and their local reachability queries.
//!
//! [`Vertex`] holds the payload and the incident-edge bookkeeping. Queries
//! that walk the graph need the owning [`Graph`] as well, so they live on
//! the borrowed view [`VertexRef`], obtained from
//! [`Graph::vertex`](crate::graph::Graph::vertex).
//!
//! Traversals run on the graph's petgraph storage: depth-first, each vertex
//! expanded at most once per query regardless of how many parallel edges
//! lead to it. Ancestor walks use the reversed view.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;
use petgraph::algo::has_path_connecting;
use petgraph::graph::NodeIndex;
use petgraph::visit::{Dfs, IntoNeighbors, Reversed, VisitMap, Visitable};
use smallvec::SmallVec;

use crate::edge::Edge;
use crate::extension::{downcast, Capability};
use crate::graph::Graph;
use crate::id::{EdgeId, VertexId};

/// Incident edge list. Most vertices have a handful of edges, kept inline.
pub(crate) type EdgeList = SmallVec<[EdgeId; 4]>;

/// A vertex: identity, opaque payload, and incident edges in insertion order.
#[derive(Debug)]
pub struct Vertex<V> {
    id: VertexId,
    payload: Arc<V>,
    outgoing: EdgeList,
    incoming: EdgeList,
    capability: Option<Capability>,
}

impl<V> Vertex<V> {
    pub(crate) fn new(id: VertexId, payload: Arc<V>, capability: Option<Capability>) -> Self {
        Vertex {
            id,
            payload,
            outgoing: EdgeList::new(),
            incoming: EdgeList::new(),
            capability,
        }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Caller-supplied payload. Never interpreted by the graph.
    pub fn payload(&self) -> &V {
        &self.payload
    }

    /// Shared handle to the payload, as reused by subgraph copies.
    pub fn shared_payload(&self) -> &Arc<V> {
        &self.payload
    }

    /// Edges leaving this vertex, in insertion order.
    pub fn outgoing_edges(&self) -> &[EdgeId] {
        &self.outgoing
    }

    /// Edges arriving at this vertex, in insertion order.
    pub fn incoming_edges(&self) -> &[EdgeId] {
        &self.incoming
    }

    /// The capability attached by the graph's extension, if it has the
    /// requested type.
    pub fn capability<T: Any>(&self) -> Option<&T> {
        downcast(&self.capability)
    }

    pub(crate) fn push_outgoing(&mut self, edge: EdgeId) {
        self.outgoing.push(edge);
    }

    pub(crate) fn push_incoming(&mut self, edge: EdgeId) {
        self.incoming.push(edge);
    }
}

/// A vertex together with the graph that owns it.
pub struct VertexRef<'g, V, E> {
    graph: &'g Graph<V, E>,
    vertex: &'g Vertex<V>,
}

impl<'g, V, E> Clone for VertexRef<'g, V, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'g, V, E> Copy for VertexRef<'g, V, E> {}

impl<'g, V: fmt::Debug, E> fmt::Debug for VertexRef<'g, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VertexRef")
            .field("graph", &self.graph.id())
            .field("vertex", self.vertex)
            .finish()
    }
}

impl<'g, V, E> VertexRef<'g, V, E> {
    pub(crate) fn new(graph: &'g Graph<V, E>, vertex: &'g Vertex<V>) -> Self {
        VertexRef { graph, vertex }
    }

    pub fn id(&self) -> VertexId {
        self.vertex.id
    }

    pub fn vertex(&self) -> &'g Vertex<V> {
        self.vertex
    }

    pub fn graph(&self) -> &'g Graph<V, E> {
        self.graph
    }

    pub fn payload(&self) -> &'g V {
        &self.vertex.payload
    }

    pub fn capability<T: Any>(&self) -> Option<&'g T> {
        downcast(&self.vertex.capability)
    }

    pub fn outgoing_edges(&self) -> &'g [EdgeId] {
        &self.vertex.outgoing
    }

    pub fn incoming_edges(&self) -> &'g [EdgeId] {
        &self.vertex.incoming
    }

    /// Outgoing edges resolved against the graph.
    pub fn outgoing(&self) -> impl Iterator<Item = &'g Edge<E>> + 'g {
        let (graph, vertex) = (self.graph, self.vertex);
        vertex.outgoing.iter().map(move |&e| graph.edge_at(e))
    }

    /// Incoming edges resolved against the graph.
    pub fn incoming(&self) -> impl Iterator<Item = &'g Edge<E>> + 'g {
        let (graph, vertex) = (self.graph, self.vertex);
        vertex.incoming.iter().map(move |&e| graph.edge_at(e))
    }

    /// Returns `true` if a nonempty directed path leads from this vertex to
    /// `other`.
    ///
    /// A vertex never reaches itself: the empty path does not count and the
    /// graph admits no cycles. Handles from other graphs are never reached.
    pub fn has_path_to(&self, other: VertexId) -> bool {
        if other == self.id() || !self.graph.contains_vertex(other) {
            return false;
        }
        has_path_connecting(
            self.graph.dag(),
            NodeIndex::from(self.id()),
            NodeIndex::from(other),
            None,
        )
    }

    /// Adds every vertex with a directed path to this vertex into
    /// `accumulator`, excluding this vertex itself.
    ///
    /// Union semantics: members already present are kept and not expanded
    /// again, so their own ancestors are assumed to be present as well.
    /// New members are appended in discovery order.
    pub fn ancestors(&self, accumulator: &mut IndexSet<VertexId>) {
        self.collect(Reversed(self.graph.dag()), accumulator);
    }

    /// Adds every vertex reachable from this vertex into `accumulator`,
    /// excluding this vertex itself. Same union semantics as
    /// [`ancestors`](Self::ancestors).
    pub fn descendants(&self, accumulator: &mut IndexSet<VertexId>) {
        self.collect(self.graph.dag(), accumulator);
    }

    /// Depth-first walk from this vertex over `walk`, treating current
    /// members of `accumulator` as already discovered.
    fn collect<G>(&self, walk: G, accumulator: &mut IndexSet<VertexId>)
    where
        G: IntoNeighbors<NodeId = NodeIndex<u32>> + Visitable,
    {
        let start = self.id();
        let mut dfs = Dfs::empty(walk);
        for &member in accumulator.iter() {
            if member != start && self.graph.contains_vertex(member) {
                dfs.discovered.visit(NodeIndex::from(member));
            }
        }

        dfs.move_to(NodeIndex::from(start));
        while let Some(idx) = dfs.next(walk) {
            let found = self.graph.dag()[idx].id();
            if found != start {
                accumulator.insert(found);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    /// A -> B -> C -> D, plus an unrelated E.
    fn chain() -> (Graph<&'static str, ()>, Vec<VertexId>) {
        let mut graph = Graph::new();
        let ids: Vec<VertexId> = ["A", "B", "C", "D", "E"]
            .into_iter()
            .map(|name| graph.add_vertex(name))
            .collect();
        graph.connect(ids[0], ids[1]).unwrap();
        graph.connect(ids[1], ids[2]).unwrap();
        graph.connect(ids[2], ids[3]).unwrap();
        (graph, ids)
    }

    fn names(graph: &Graph<&'static str, ()>, set: &IndexSet<VertexId>) -> Vec<&'static str> {
        set.iter()
            .map(|&id| *graph.vertex(id).unwrap().payload())
            .collect()
    }

    #[test]
    fn new_vertex_has_no_edges() {
        let mut graph: Graph<(), ()> = Graph::new();
        let v = graph.add_vertex(());
        let v = graph.vertex(v).unwrap();
        assert!(v.outgoing_edges().is_empty());
        assert!(v.incoming_edges().is_empty());
    }

    #[test]
    fn has_path_follows_direction() {
        let (graph, ids) = chain();
        let a = graph.vertex(ids[0]).unwrap();
        let d = graph.vertex(ids[3]).unwrap();
        assert!(a.has_path_to(ids[3]));
        assert!(a.has_path_to(ids[1]));
        assert!(!d.has_path_to(ids[0]));
        assert!(!a.has_path_to(ids[4]));
    }

    #[test]
    fn no_path_to_self() {
        let (graph, ids) = chain();
        for &id in &ids {
            assert!(!graph.vertex(id).unwrap().has_path_to(id));
        }
    }

    #[test]
    fn ancestors_of_tail() {
        let (graph, ids) = chain();
        let mut acc = IndexSet::new();
        graph.vertex(ids[3]).unwrap().ancestors(&mut acc);
        assert_eq!(names(&graph, &acc), vec!["C", "B", "A"]);
    }

    #[test]
    fn descendants_of_head() {
        let (graph, ids) = chain();
        let mut acc = IndexSet::new();
        graph.vertex(ids[0]).unwrap().descendants(&mut acc);
        assert_eq!(names(&graph, &acc), vec!["B", "C", "D"]);
    }

    #[test]
    fn isolated_vertex_has_no_relatives() {
        let (graph, ids) = chain();
        let e = graph.vertex(ids[4]).unwrap();
        let mut acc = IndexSet::new();
        e.ancestors(&mut acc);
        e.descendants(&mut acc);
        assert!(acc.is_empty());
    }

    #[test]
    fn ancestors_accumulate_with_union_semantics() {
        let (graph, ids) = chain();
        let mut acc = IndexSet::new();
        graph.vertex(ids[2]).unwrap().ancestors(&mut acc);
        assert_eq!(acc.len(), 2);

        // Re-running over a populated set is idempotent.
        graph.vertex(ids[2]).unwrap().ancestors(&mut acc);
        assert_eq!(acc.len(), 2);

        graph.vertex(ids[3]).unwrap().ancestors(&mut acc);
        assert_eq!(names(&graph, &acc), vec!["B", "A", "C"]);
    }

    #[test]
    fn start_already_in_accumulator_is_still_expanded() {
        let (graph, ids) = chain();
        let mut acc = IndexSet::new();
        acc.insert(ids[2]);
        graph.vertex(ids[2]).unwrap().ancestors(&mut acc);
        assert_eq!(names(&graph, &acc), vec!["C", "B", "A"]);
    }

    #[test]
    fn foreign_members_in_accumulator_are_kept() {
        let (graph, ids) = chain();
        let mut other: Graph<&'static str, ()> = Graph::new();
        let stranger = other.add_vertex("Z");

        let mut acc = IndexSet::new();
        acc.insert(stranger);
        graph.vertex(ids[3]).unwrap().descendants(&mut acc);
        graph.vertex(ids[3]).unwrap().ancestors(&mut acc);
        assert_eq!(acc.len(), 4);
        assert_eq!(acc[0], stranger);
        assert!(!graph.vertex(ids[0]).unwrap().has_path_to(stranger));
    }

    #[test]
    fn parallel_edges_visit_once() {
        let mut graph: Graph<u32, ()> = Graph::new();
        let a = graph.add_vertex(0);
        let b = graph.add_vertex(1);
        let c = graph.add_vertex(2);
        for _ in 0..5 {
            graph.connect(a, b).unwrap();
            graph.connect(b, c).unwrap();
        }

        let mut acc = IndexSet::new();
        graph.vertex(c).unwrap().ancestors(&mut acc);
        assert_eq!(acc.len(), 2);

        let va = graph.vertex(a).unwrap();
        assert_eq!(va.outgoing_edges().len(), 5);
        assert!(va.has_path_to(c));
    }

    #[test]
    fn diamond_descendants_once() {
        let mut graph: Graph<&'static str, ()> = Graph::new();
        let top = graph.add_vertex("top");
        let left = graph.add_vertex("left");
        let right = graph.add_vertex("right");
        let bottom = graph.add_vertex("bottom");
        graph.connect(top, left).unwrap();
        graph.connect(top, right).unwrap();
        graph.connect(left, bottom).unwrap();
        graph.connect(right, bottom).unwrap();

        let mut acc = IndexSet::new();
        graph.vertex(top).unwrap().descendants(&mut acc);
        assert_eq!(acc.len(), 3);
        assert!(!acc.contains(&top));
    }

    #[test]
    fn outgoing_and_incoming_resolve_edges() {
        let (graph, ids) = chain();
        let b = graph.vertex(ids[1]).unwrap();
        let out: Vec<VertexId> = b.outgoing().map(|e| e.destination()).collect();
        let inc: Vec<VertexId> = b.incoming().map(|e| e.origin()).collect();
        assert_eq!(out, vec![ids[2]]);
        assert_eq!(inc, vec![ids[0]]);
    }
}
