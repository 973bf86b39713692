//! Presentation layers for acyclic graphs.
//!
//! Everything here sits on the far side of the
//! [`Presenter`](acyclic_core::Presenter) contract: the core walks the graph,
//! these types decide what to build from it.
//!
//! # Modules
//!
//! - [`dot`] -- Graphviz DOT text with explicit [`DotStyle`] configuration
//! - [`json`] -- JSON document matching the CLI's input format
//! - [`export`] -- petgraph `StableGraph` export and acyclicity check
//! - [`error`] -- [`RenderError`]

pub mod dot;
pub mod error;
pub mod export;
pub mod json;

pub use dot::{render_dot, DotPresenter, DotStyle};
pub use error::RenderError;
pub use export::{is_acyclic, to_petgraph, ExportGraph, PetgraphPresenter};
pub use json::JsonPresenter;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Output formats a graph can be rendered to as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    /// Graphviz DOT.
    #[default]
    Dot,
    /// JSON document (vertices + edges).
    Json,
}

impl FromStr for RenderFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dot" | "DOT" | "gv" => Ok(RenderFormat::Dot),
            "json" | "JSON" => Ok(RenderFormat::Json),
            _ => Err(RenderError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderFormat::Dot => write!(f, "dot"),
            RenderFormat::Json => write!(f, "json"),
        }
    }
}
