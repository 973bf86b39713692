//! JSON presentation.
//!
//! Produces the same document shape the `acyclic` CLI reads:
//!
//! ```json
//! { "vertices": [ <payload>, ... ],
//!   "edges": [ { "from": 0, "to": 1, "properties": <properties> }, ... ] }
//! ```

use acyclic_core::{Edge, Presenter, Vertex};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::RenderError;

/// Presenter collecting payloads and properties as JSON values.
///
/// Serialization failures do not abort the walk; the first one is kept and
/// reported by [`finish`](Self::finish).
#[derive(Debug, Default)]
pub struct JsonPresenter {
    vertices: Vec<Value>,
    edges: Vec<Value>,
    error: Option<RenderError>,
}

impl JsonPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The finished document, or the first serialization error.
    pub fn finish(self) -> Result<Value, RenderError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Ok(json!({
            "vertices": self.vertices,
            "edges": self.edges,
        }))
    }

    fn convert<T: Serialize>(&mut self, value: &T, what: impl FnOnce() -> String) -> Value {
        match serde_json::to_value(value) {
            Ok(v) => v,
            Err(source) => {
                if self.error.is_none() {
                    self.error = Some(RenderError::Serialize {
                        what: what(),
                        source,
                    });
                }
                Value::Null
            }
        }
    }
}

impl<V: Serialize, E: Serialize> Presenter<V, E> for JsonPresenter {
    type Handle = usize;

    fn add_vertex(&mut self, vertex: &Vertex<V>) -> usize {
        let payload = self.convert(vertex.payload(), || {
            format!("payload of vertex {}", vertex.id())
        });
        self.vertices.push(payload);
        self.vertices.len() - 1
    }

    fn add_edge(&mut self, from: &usize, to: &usize, edge: &Edge<E>) {
        let properties = self.convert(edge.properties(), || {
            format!("properties of edge {}", edge.id())
        });
        self.edges.push(json!({
            "from": from,
            "to": to,
            "properties": properties,
        }));
    }
}
