//! CLI error types and their exit codes.

use std::path::PathBuf;

use acyclic_core::CoreError;
use acyclic_render::RenderError;

/// Errors surfaced by the `acyclic` command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Reading the input or writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not a well-formed graph document.
    #[error("invalid graph document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The `--style` file is not a well-formed DOT style.
    #[error("invalid DOT style file {}: {source}", path.display())]
    Style {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An edge or root refers to a vertex index the document doesn't have.
    #[error("{context} refers to vertex {index}, but the document has {count} vertices")]
    UnknownIndex {
        context: String,
        index: usize,
        count: usize,
    },

    /// The graph rejected an edge from the document.
    #[error("edge #{edge}: {source}")]
    Edge {
        edge: usize,
        #[source]
        source: CoreError,
    },

    /// Any other graph operation failure.
    #[error(transparent)]
    Graph(#[from] CoreError),

    /// Rendering failed, or an unknown output format was requested.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl CliError {
    /// Process exit code: 1 = graph error, 2 = bad input document or
    /// options, 3 = I/O error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Io(_) => 3,
            CliError::Parse(_)
            | CliError::Style { .. }
            | CliError::UnknownIndex { .. }
            | CliError::Render(_) => 2,
            CliError::Edge { .. } | CliError::Graph(_) => 1,
        }
    }
}
