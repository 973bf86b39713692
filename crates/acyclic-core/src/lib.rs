//! In-memory directed acyclic graph.
//!
//! Callers build a [`Graph`] incrementally with
//! [`add_vertex`](Graph::add_vertex) and [`add_edge`](Graph::add_edge); every
//! edge insertion is checked so the graph never contains a cycle.
//!
//! # Modules
//!
//! - [`id`] -- identity handles for graphs, vertices, and edges
//! - [`error`] -- [`CoreError`] and its endpoint details
//! - [`vertex`] -- vertices and reachability queries
//! - [`edge`] -- edges and the keyed [`EdgeSpec`]
//! - [`graph`] -- the owning container, cycle check, subgraph extraction
//! - [`extension`] -- capabilities attached at creation time
//! - [`present`] -- the presenter contract used by [`Graph::render`]

pub mod edge;
pub mod error;
pub mod extension;
pub mod graph;
pub mod id;
pub mod present;
pub mod vertex;

// Re-export commonly used types
pub use edge::{Edge, EdgeSpec};
pub use error::{CoreError, EndpointFault, EndpointRole};
pub use extension::{Capability, Extension};
pub use graph::{Graph, Properties};
pub use id::{EdgeId, GraphId, VertexId};
pub use present::Presenter;
pub use vertex::{Vertex, VertexRef};

pub use indexmap::IndexSet;
