//! Property and end-to-end tests for the public graph API.
//!
//! Each proptest case builds a graph from an arbitrary sequence of edge
//! insertions and checks that acceptance and rejection match plain
//! reachability, and that the accepted arc set stays acyclic.

use acyclic_core::{CoreError, EdgeSpec, Graph, IndexSet, Properties, VertexId};
use petgraph::algo::toposort;
use proptest::prelude::*;

fn named(name: &str) -> Properties {
    let mut payload = Properties::new();
    payload.insert("name".into(), name.into());
    payload
}

fn names_of(graph: &Graph, ids: impl IntoIterator<Item = VertexId>) -> Vec<String> {
    ids.into_iter()
        .map(|id| {
            graph.vertex(id).unwrap().payload()["name"]
                .as_str()
                .unwrap()
                .to_string()
        })
        .collect()
}

/// Independent acyclicity oracle: petgraph's topological sort over the
/// graph's storage.
fn topologically_sortable<V, E>(graph: &Graph<V, E>) -> bool {
    toposort(graph.dag(), None).is_ok()
}

proptest! {
    #[test]
    fn insertion_sequence_stays_acyclic(
        vertex_count in 1usize..12,
        attempts in prop::collection::vec((0usize..64, 0usize..64), 0..48),
    ) {
        let mut graph: Graph<(), ()> = Graph::new();
        let ids: Vec<VertexId> = (0..vertex_count).map(|_| graph.add_vertex(())).collect();

        for (x, y) in attempts {
            let from = ids[x % vertex_count];
            let to = ids[y % vertex_count];
            let expected = from != to && !graph.has_path(to, from).unwrap();
            let edges_before = graph.edge_count();

            match graph.connect(from, to) {
                Ok(edge) => {
                    prop_assert!(expected);
                    prop_assert_eq!(graph.edge_count(), edges_before + 1);
                    let origin = graph.vertex(from).unwrap();
                    let destination = graph.vertex(to).unwrap();
                    prop_assert_eq!(origin.outgoing_edges().last(), Some(&edge));
                    prop_assert_eq!(destination.incoming_edges().last(), Some(&edge));
                }
                Err(err) => {
                    prop_assert!(!expected);
                    prop_assert_eq!(
                        err,
                        CoreError::CycleRejected { origin: from, destination: to }
                    );
                    prop_assert_eq!(graph.edge_count(), edges_before);
                }
            }
            prop_assert!(topologically_sortable(&graph));
        }

        for edge in graph.edges() {
            prop_assert!(!graph.has_path(edge.destination(), edge.origin()).unwrap());
        }
    }

    #[test]
    fn subgraph_never_duplicates(
        edges in prop::collection::vec((0usize..8, 0usize..8), 0..24),
        preds in prop::collection::vec(0usize..8, 0..4),
        succs in prop::collection::vec(0usize..8, 0..4),
    ) {
        let mut graph: Graph<usize, ()> = Graph::new();
        let ids: Vec<VertexId> = (0..8).map(|i| graph.add_vertex(i)).collect();
        for (x, y) in edges {
            // Orient low -> high so most attempts succeed.
            let (a, b) = if x < y { (x, y) } else { (y, x) };
            let _ = graph.connect(ids[a], ids[b]);
        }

        let pred_roots: Vec<VertexId> = preds.iter().map(|&i| ids[i]).collect();
        let succ_roots: Vec<VertexId> = succs.iter().map(|&i| ids[i]).collect();
        let sub = graph.subgraph(&pred_roots, &succ_roots).unwrap();

        let mut expected = IndexSet::new();
        for &root in &pred_roots {
            expected.insert(root);
            graph.vertex(root).unwrap().ancestors(&mut expected);
        }
        for &root in &succ_roots {
            expected.insert(root);
            graph.vertex(root).unwrap().descendants(&mut expected);
        }

        let payloads: Vec<usize> = sub.vertices().map(|v| *v.payload()).collect();
        let distinct: std::collections::HashSet<usize> = payloads.iter().copied().collect();
        prop_assert_eq!(payloads.len(), distinct.len());
        prop_assert_eq!(payloads.len(), expected.len());

        let induced = graph
            .edges()
            .filter(|e| expected.contains(&e.origin()) && expected.contains(&e.destination()))
            .count();
        prop_assert_eq!(sub.edge_count(), induced);
        prop_assert!(topologically_sortable(&sub));
    }
}

#[test]
fn chain_worked_example() {
    let mut graph: Graph = Graph::new();
    let a = graph.add_vertex(named("A"));
    let b = graph.add_vertex(named("B"));
    let c = graph.add_vertex(named("C"));
    let d = graph.add_vertex(named("D"));
    graph.add_edge(EdgeSpec::new().from(a).to(b)).unwrap();
    graph.add_edge(EdgeSpec::new().source(b).sink(c)).unwrap();
    graph.add_edge(EdgeSpec::new().start(c).end(d)).unwrap();

    let mut ancestors = IndexSet::new();
    graph.vertex(d).unwrap().ancestors(&mut ancestors);
    let mut found = names_of(&graph, ancestors);
    found.sort();
    assert_eq!(found, vec!["A", "B", "C"]);

    assert!(graph.vertex(a).unwrap().has_path_to(d));
    assert!(!graph.vertex(d).unwrap().has_path_to(a));
    assert!(graph.connect(d, a).unwrap_err().is_cycle_rejected());

    let sub = graph.subgraph(&[c], &[]).unwrap();
    assert_eq!(sub.vertex_count(), 3);
    assert_eq!(sub.edge_count(), 2);
}

#[test]
fn both_closures_snapshot() {
    let mut graph: Graph = Graph::new();
    let a = graph.add_vertex(named("A"));
    let b = graph.add_vertex(named("B"));
    let c = graph.add_vertex(named("C"));
    let d = graph.add_vertex(named("D"));
    graph.connect(a, b).unwrap();
    graph.connect(b, c).unwrap();
    graph.connect(c, d).unwrap();

    let sub = graph.subgraph(&[b], &[b]).unwrap();
    let vertices = names_of(&sub, sub.vertices().map(|v| v.id()));
    let edges: Vec<String> = sub
        .edges()
        .map(|e| {
            let ends = names_of(&sub, [e.origin(), e.destination()]);
            format!("{} -> {}", ends[0], ends[1])
        })
        .collect();

    insta::assert_debug_snapshot!(vertices, @r###"
    [
        "B",
        "A",
        "C",
        "D",
    ]
    "###);
    insta::assert_debug_snapshot!(edges, @r###"
    [
        "A -> B",
        "B -> C",
        "C -> D",
    ]
    "###);
}

#[test]
fn failed_insertions_leave_both_graphs_untouched() {
    let mut left: Graph = Graph::new();
    let mut right: Graph = Graph::new();
    let l = left.add_default_vertex();
    let r = right.add_default_vertex();

    assert!(left.connect(l, r).unwrap_err().is_invalid_endpoint());
    assert!(right.connect(l, r).unwrap_err().is_invalid_endpoint());
    assert!(left.add_edge(EdgeSpec::new()).unwrap_err().is_invalid_endpoint());

    assert_eq!((left.vertex_count(), left.edge_count()), (1, 0));
    assert_eq!((right.vertex_count(), right.edge_count()), (1, 0));
}
