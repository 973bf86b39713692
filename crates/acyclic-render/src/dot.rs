//! Graphviz DOT presentation.
//!
//! [`DotPresenter`] turns a graph into a `digraph` document. Styling comes
//! from a [`DotStyle`] the caller passes in; there is no shared default
//! state, so two renders with different styles never interfere.

use acyclic_core::{Edge, Graph, Presenter, Vertex};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Attribute blocks applied to every node and edge of a DOT document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotStyle {
    /// Name written after the `digraph` keyword.
    pub graph_name: String,
    /// Attributes for every node, in output order.
    pub vertex_attrs: IndexMap<String, String>,
    /// Attributes for every edge, in output order.
    pub edge_attrs: IndexMap<String, String>,
}

impl Default for DotStyle {
    fn default() -> Self {
        DotStyle {
            graph_name: "G".to_string(),
            vertex_attrs: attrs(&[
                ("shape", "record"),
                ("color", "black"),
                ("fillcolor", "white"),
                ("style", "filled"),
            ]),
            edge_attrs: attrs(&[("dir", "forward"), ("color", "blue")]),
        }
    }
}

impl DotStyle {
    /// A style with no attributes at all.
    pub fn plain(graph_name: &str) -> Self {
        DotStyle {
            graph_name: graph_name.to_string(),
            vertex_attrs: IndexMap::new(),
            edge_attrs: IndexMap::new(),
        }
    }
}

fn attrs(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

type LabelFn<'s, T> = Box<dyn Fn(&T) -> Option<String> + 's>;

/// Presenter producing Graphviz DOT text.
///
/// Node names are sequential (`"0"`, `"1"`, ...) in registration order.
pub struct DotPresenter<'s, V, E> {
    style: &'s DotStyle,
    vertex_label: Option<LabelFn<'s, V>>,
    edge_label: Option<LabelFn<'s, E>>,
    next_node: usize,
    statements: Vec<String>,
}

impl<'s, V, E> DotPresenter<'s, V, E> {
    pub fn new(style: &'s DotStyle) -> Self {
        DotPresenter {
            style,
            vertex_label: None,
            edge_label: None,
            next_node: 0,
            statements: Vec::new(),
        }
    }

    /// Derives a `label` attribute for each node from its payload.
    pub fn with_vertex_label(mut self, label: impl Fn(&V) -> Option<String> + 's) -> Self {
        self.vertex_label = Some(Box::new(label));
        self
    }

    /// Derives a `label` attribute for each edge from its properties.
    pub fn with_edge_label(mut self, label: impl Fn(&E) -> Option<String> + 's) -> Self {
        self.edge_label = Some(Box::new(label));
        self
    }

    /// Assembles the finished document.
    pub fn finish(self) -> String {
        let mut out = format!("digraph {} {{\n", quote(&self.style.graph_name));
        for statement in &self.statements {
            out.push_str("  ");
            out.push_str(statement);
            out.push_str(";\n");
        }
        out.push_str("}\n");
        out
    }
}

impl<'s, V, E> Presenter<V, E> for DotPresenter<'s, V, E> {
    type Handle = String;

    fn add_vertex(&mut self, vertex: &Vertex<V>) -> String {
        let name = self.next_node.to_string();
        self.next_node += 1;

        let label = self
            .vertex_label
            .as_ref()
            .and_then(|f| f(vertex.payload()));
        self.statements.push(format!(
            "{}{}",
            quote(&name),
            attr_list(&self.style.vertex_attrs, label)
        ));
        name
    }

    fn add_edge(&mut self, from: &String, to: &String, edge: &Edge<E>) {
        let label = self
            .edge_label
            .as_ref()
            .and_then(|f| f(edge.properties()));
        self.statements.push(format!(
            "{} -> {}{}",
            quote(from),
            quote(to),
            attr_list(&self.style.edge_attrs, label)
        ));
    }
}

/// Renders `graph` with `style` and no labels.
pub fn render_dot<V, E>(graph: &Graph<V, E>, style: &DotStyle) -> String {
    graph.render(DotPresenter::new(style)).finish()
}

fn attr_list(base: &IndexMap<String, String>, label: Option<String>) -> String {
    let record = matches!(
        base.get("shape").map(String::as_str),
        Some("record") | Some("Mrecord")
    );
    let mut parts: Vec<String> = base
        .iter()
        .filter(|(k, _)| !(label.is_some() && k.as_str() == "label"))
        .map(|(k, v)| format!("{}={}", attr_key(k), quote(v)))
        .collect();
    if let Some(label) = label {
        let label = if record {
            record_label(&label)
        } else {
            quote(&label)
        };
        parts.push(format!("label={}", label));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" [{}]", parts.join(", "))
    }
}

/// Plain identifiers are written bare, anything else quoted.
fn attr_key(key: &str) -> String {
    let mut chars = key.chars();
    let bare = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if bare {
        key.to_string()
    } else {
        quote(key)
    }
}

/// Quotes a DOT ID, escaping embedded quotes and backslashes.
fn quote(raw: &str) -> String {
    escape(raw, |_| false)
}

/// Quotes a label for a `record` shaped node. Graphviz parses record labels
/// into fields, so `{ } | < >` and spaces need a backslash to stay literal.
fn record_label(raw: &str) -> String {
    escape(raw, |c| matches!(c, '{' | '}' | '|' | '<' | '>' | ' '))
}

fn escape(raw: &str, special: impl Fn(char) -> bool) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for c in raw.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c if special(c) => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_escapes() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quote("a\\b"), "\"a\\\\b\"");
        assert_eq!(quote("two\nlines"), "\"two\\nlines\"");
    }

    #[test]
    fn record_labels_escape_field_syntax() {
        assert_eq!(record_label("fetch {x"), "\"fetch\\ \\{x\"");
        assert_eq!(record_label("a|b<c>}"), "\"a\\|b\\<c\\>\\}\"");
        assert_eq!(record_label("q\"\\"), "\"q\\\"\\\\\"");
    }

    #[test]
    fn labels_escaped_only_for_record_shapes() {
        let mut style = DotStyle::default();
        assert_eq!(
            attr_list(&style.vertex_attrs, Some("fetch {x".into())),
            " [shape=\"record\", color=\"black\", fillcolor=\"white\", style=\"filled\", \
             label=\"fetch\\ \\{x\"]"
        );
        style.vertex_attrs.insert("shape".into(), "Mrecord".into());
        assert!(attr_list(&style.vertex_attrs, Some("a b".into())).ends_with("label=\"a\\ b\"]"));
        style.vertex_attrs.insert("shape".into(), "box".into());
        assert!(attr_list(&style.vertex_attrs, Some("a b".into())).ends_with("label=\"a b\"]"));
    }

    #[test]
    fn odd_attribute_keys_are_quoted() {
        assert_eq!(attr_key("fontsize"), "fontsize");
        assert_eq!(attr_key("_x1"), "_x1");
        assert_eq!(attr_key("font size"), "\"font size\"");
        assert_eq!(attr_key("1st"), "\"1st\"");
        assert_eq!(attr_key("a];b"), "\"a];b\"");
        let base = attrs(&[("color]; x [y", "red")]);
        assert_eq!(attr_list(&base, None), " [\"color]; x [y\"=\"red\"]");
    }

    #[test]
    fn attr_list_empty() {
        assert_eq!(attr_list(&IndexMap::new(), None), "");
    }

    #[test]
    fn label_overrides_style_label() {
        let base = attrs(&[("label", "fixed"), ("color", "red")]);
        assert_eq!(
            attr_list(&base, Some("mine".into())),
            " [color=\"red\", label=\"mine\"]"
        );
        assert_eq!(
            attr_list(&base, None),
            " [label=\"fixed\", color=\"red\"]"
        );
    }

    #[test]
    fn default_style_matches_classic_look() {
        let style = DotStyle::default();
        assert_eq!(style.graph_name, "G");
        assert_eq!(style.vertex_attrs["shape"], "record");
        assert_eq!(style.edge_attrs["color"], "blue");
    }

    #[test]
    fn style_from_partial_json() {
        let style: DotStyle =
            serde_json::from_str(r#"{"graph_name": "deps", "edge_attrs": {"color": "red"}}"#)
                .unwrap();
        assert_eq!(style.graph_name, "deps");
        assert_eq!(style.edge_attrs.len(), 1);
        // Missing blocks fall back to the defaults.
        assert_eq!(style.vertex_attrs, DotStyle::default().vertex_attrs);
    }

    #[test]
    fn empty_graph() {
        let graph: Graph<(), ()> = Graph::new();
        let dot = render_dot(&graph, &DotStyle::plain("empty"));
        assert_eq!(dot, "digraph \"empty\" {\n}\n");
    }

    #[test]
    fn plain_style_writes_bare_statements() {
        let mut graph: Graph<(), ()> = Graph::new();
        let a = graph.add_vertex(());
        let b = graph.add_vertex(());
        graph.connect(a, b).unwrap();
        let dot = render_dot(&graph, &DotStyle::plain("G"));
        assert_eq!(dot, "digraph \"G\" {\n  \"0\";\n  \"1\";\n  \"0\" -> \"1\";\n}\n");
    }
}
