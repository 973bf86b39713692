//! Library side of the `acyclic` command.
//!
//! `main.rs` only parses arguments and maps errors to exit codes; the work
//! lives here so it can be tested without spawning the binary.
//!
//! # Modules
//!
//! - [`document`] -- the JSON graph document and how it becomes a graph
//! - [`error`] -- [`CliError`] and exit codes

pub mod document;
pub mod error;

pub use document::{EdgeDocument, GraphDocument};
pub use error::CliError;

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use acyclic_core::{Graph, Properties, VertexId};
use acyclic_render::{DotPresenter, DotStyle, JsonPresenter, RenderFormat};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Options controlling the `render` subcommand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Output format.
    pub format: RenderFormat,

    /// Vertex indices whose ancestor closure is extracted.
    pub ancestors_of: Vec<usize>,

    /// Vertex indices whose descendant closure is extracted.
    pub descendants_of: Vec<usize>,

    /// Payload key used as the DOT node label.
    /// `None` leaves nodes unlabelled.
    pub label_key: Option<String>,

    /// DOT styling.
    pub style: DotStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            format: RenderFormat::Dot,
            ancestors_of: Vec::new(),
            descendants_of: Vec::new(),
            label_key: None,
            style: DotStyle::default(),
        }
    }
}

impl RenderOptions {
    /// Whether a subgraph should be extracted before rendering.
    pub fn extracts_subgraph(&self) -> bool {
        !self.ancestors_of.is_empty() || !self.descendants_of.is_empty()
    }
}

/// Summary printed by the `check` subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub vertices: usize,
    pub edges: usize,
    /// Vertices with no incoming edges.
    pub roots: usize,
    /// Vertices with no outgoing edges.
    pub leaves: usize,
}

/// Reads a graph document from a file path, or from stdin when `input` is `-`.
pub fn load_document(input: &str) -> Result<GraphDocument, CliError> {
    let text = if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(input)?
    };
    GraphDocument::from_json(&text)
}

/// Reads a [`DotStyle`] from a JSON file. Missing blocks keep their defaults.
pub fn load_style(path: &Path) -> Result<DotStyle, CliError> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|source| CliError::Style {
        path: path.to_path_buf(),
        source,
    })
}

/// Builds the document's graph and renders it (or the requested subgraph).
pub fn render_document(doc: &GraphDocument, options: &RenderOptions) -> Result<String, CliError> {
    let (graph, ids) = doc.build()?;

    if options.extracts_subgraph() {
        let ancestors_of = roots(&ids, &options.ancestors_of, "--ancestors-of")?;
        let descendants_of = roots(&ids, &options.descendants_of, "--descendants-of")?;
        let sub = graph.subgraph(&ancestors_of, &descendants_of)?;
        info!(
            vertices = sub.vertex_count(),
            edges = sub.edge_count(),
            "rendering subgraph"
        );
        render_graph(&sub, options)
    } else {
        render_graph(&graph, options)
    }
}

/// Builds the document's graph and summarises it.
pub fn check_document(doc: &GraphDocument) -> Result<CheckReport, CliError> {
    let (graph, _) = doc.build()?;
    Ok(CheckReport {
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        roots: graph
            .vertices()
            .filter(|v| v.incoming_edges().is_empty())
            .count(),
        leaves: graph
            .vertices()
            .filter(|v| v.outgoing_edges().is_empty())
            .count(),
    })
}

fn render_graph(graph: &Graph, options: &RenderOptions) -> Result<String, CliError> {
    match options.format {
        RenderFormat::Dot => {
            let mut presenter = DotPresenter::new(&options.style);
            if let Some(key) = options.label_key.clone() {
                presenter = presenter
                    .with_vertex_label(move |payload: &Properties| label_for(payload, &key));
            }
            Ok(graph.render(presenter).finish())
        }
        RenderFormat::Json => {
            let doc = graph.render(JsonPresenter::new()).finish()?;
            Ok(format!("{}\n", serde_json::to_string_pretty(&doc)?))
        }
    }
}

fn roots(ids: &[VertexId], indices: &[usize], flag: &str) -> Result<Vec<VertexId>, CliError> {
    indices
        .iter()
        .map(|&i| document::resolve_index(ids, i, || flag.to_string()))
        .collect()
}

/// Strings are used verbatim; other JSON values in their compact form.
fn label_for(payload: &Properties, key: &str) -> Option<String> {
    match payload.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
