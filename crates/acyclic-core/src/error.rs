//! Core error types for acyclic-core.
//!
//! Every rejected operation is a pure validation failure: the graph is left
//! exactly as it was before the call.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id::{GraphId, VertexId};

/// Which argument of an operation an endpoint error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndpointRole {
    /// The tail of a prospective edge.
    Origin,
    /// The head of a prospective edge.
    Destination,
    /// A root vertex passed to subgraph extraction.
    Root,
}

impl fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointRole::Origin => write!(f, "origin"),
            EndpointRole::Destination => write!(f, "destination"),
            EndpointRole::Root => write!(f, "subgraph root"),
        }
    }
}

/// Why an endpoint was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EndpointFault {
    /// None of the accepted keys carried a vertex.
    #[error("no vertex supplied")]
    Missing,

    /// The vertex was created by another graph.
    #[error("vertex belongs to graph {found}, not {expected}")]
    ForeignGraph { expected: GraphId, found: GraphId },

    /// The handle names this graph but no vertex exists at that index.
    #[error("graph {graph} has no vertex at index {index}")]
    UnknownVertex { graph: GraphId, index: u32 },
}

/// Errors produced by graph mutation and extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// An edge or subgraph operation referenced something that is not a
    /// vertex of this graph.
    #[error("invalid {role} endpoint: {reason}")]
    InvalidEndpoint {
        role: EndpointRole,
        reason: EndpointFault,
    },

    /// The edge would be a self-loop or would close a cycle.
    #[error("edge {origin} -> {destination} would create a cycle")]
    CycleRejected {
        origin: VertexId,
        destination: VertexId,
    },
}

impl CoreError {
    /// Returns `true` for [`CoreError::InvalidEndpoint`].
    pub fn is_invalid_endpoint(&self) -> bool {
        matches!(self, CoreError::InvalidEndpoint { .. })
    }

    /// Returns `true` for [`CoreError::CycleRejected`].
    pub fn is_cycle_rejected(&self) -> bool {
        matches!(self, CoreError::CycleRejected { .. })
    }
}
