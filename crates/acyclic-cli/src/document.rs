//! The JSON graph document read by the CLI.
//!
//! ```json
//! {
//!   "vertices": [ {"name": "fetch"}, {"name": "build"} ],
//!   "edges": [ {"from": 0, "to": 1, "properties": {"kind": "hard"}} ]
//! }
//! ```
//!
//! Vertices are payload objects; edges name their endpoints by index into
//! `vertices`, under any of the keys [`EdgeSpec`] accepts.

use acyclic_core::{EdgeSpec, Graph, Properties, VertexId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CliError;

/// A whole graph as it appears on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub vertices: Vec<Properties>,
    #[serde(default)]
    pub edges: Vec<EdgeDocument>,
}

/// One edge entry. Endpoint keys mirror [`EdgeSpec`], with vertex indices
/// in place of handles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sink: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
}

impl GraphDocument {
    pub fn from_json(text: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Builds the graph, inserting vertices then edges in document order.
    ///
    /// Returns the graph and the handle of each document vertex by index.
    pub fn build(&self) -> Result<(Graph, Vec<VertexId>), CliError> {
        let mut graph: Graph = Graph::new();
        let ids: Vec<VertexId> = self
            .vertices
            .iter()
            .map(|payload| graph.add_vertex(payload.clone()))
            .collect();

        for (n, edge) in self.edges.iter().enumerate() {
            let spec = edge.to_spec(&ids, n)?;
            graph
                .add_edge(spec)
                .map_err(|source| CliError::Edge { edge: n, source })?;
        }

        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "built graph from document"
        );
        Ok((graph, ids))
    }
}

impl EdgeDocument {
    fn to_spec(&self, ids: &[VertexId], n: usize) -> Result<EdgeSpec<Properties>, CliError> {
        let lookup = |key: &str, index: Option<usize>| -> Result<Option<VertexId>, CliError> {
            match index {
                None => Ok(None),
                Some(i) => resolve_index(ids, i, || format!("edge #{} {}", n, key)).map(Some),
            }
        };

        Ok(EdgeSpec {
            origin: lookup("origin", self.origin)?,
            source: lookup("source", self.source)?,
            from: lookup("from", self.from)?,
            start: lookup("start", self.start)?,
            destination: lookup("destination", self.destination)?,
            sink: lookup("sink", self.sink)?,
            to: lookup("to", self.to)?,
            end: lookup("end", self.end)?,
            properties: self.properties.clone(),
        })
    }
}

/// Maps a document vertex index to its handle.
pub fn resolve_index(
    ids: &[VertexId],
    index: usize,
    context: impl FnOnce() -> String,
) -> Result<VertexId, CliError> {
    ids.get(index).copied().ok_or_else(|| CliError::UnknownIndex {
        context: context(),
        index,
        count: ids.len(),
    })
}
