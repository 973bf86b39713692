//! Capability extensions attached to vertices and edges at creation.
//!
//! A graph may be built with an [`Extension`]. Every time the graph creates
//! a vertex or an edge it asks the extension for a [`Capability`] and stores
//! the result alongside the new entity. Callers recover the typed value with
//! [`Vertex::capability`](crate::vertex::Vertex::capability) or
//! [`Edge::capability`](crate::edge::Edge::capability).
//!
//! ```
//! use std::sync::Arc;
//! use acyclic_core::{Capability, Extension, Graph, Properties, VertexId};
//!
//! #[derive(Debug)]
//! struct NameTag(String);
//!
//! #[derive(Debug)]
//! struct NameTags;
//!
//! impl Extension<Properties, Properties> for NameTags {
//!     fn vertex_capability(&self, _id: VertexId, payload: &Properties) -> Option<Capability> {
//!         let name = payload.get("name")?.as_str()?.to_string();
//!         Some(Arc::new(NameTag(name)))
//!     }
//! }
//!
//! let mut graph: Graph = Graph::with_extension(Arc::new(NameTags));
//! let mut payload = Properties::new();
//! payload.insert("name".into(), "Fred".into());
//! let fred = graph.add_vertex(payload);
//!
//! let tag = graph.vertex(fred).unwrap().capability::<NameTag>().unwrap();
//! assert_eq!(tag.0, "Fred");
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::id::{EdgeId, VertexId};

/// Type-erased behavior attached to a vertex or edge.
pub type Capability = Arc<dyn Any + Send + Sync>;

/// Decorator consulted by the graph whenever it creates a vertex or edge.
///
/// Both hooks default to attaching nothing, so an implementation only
/// overrides the side it cares about.
pub trait Extension<V, E>: fmt::Debug + Send + Sync {
    /// Capability for a newly created vertex.
    fn vertex_capability(&self, _id: VertexId, _payload: &V) -> Option<Capability> {
        None
    }

    /// Capability for a newly created edge.
    fn edge_capability(&self, _id: EdgeId, _properties: &E) -> Option<Capability> {
        None
    }
}

pub(crate) fn downcast<T: Any>(capability: &Option<Capability>) -> Option<&T> {
    capability.as_deref().and_then(|c| c.downcast_ref::<T>())
}
