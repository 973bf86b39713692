//! Render error types.

/// Errors that can occur while presenting a graph.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A payload or edge property could not be serialized.
    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    /// Output format name not recognised.
    #[error("unknown output format '{0}', expected dot/json")]
    UnknownFormat(String),
}
