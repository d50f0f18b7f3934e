//! # Document Tree
//!
//! Arena-based DOM for the parametric engine.
//!
//! Nodes live in a flat `Vec` and are addressed by [`NodeId`], so attribute
//! and text patches during a traversal never invalidate sibling or child
//! handles. The tree is exclusively owned by one engine instance; consumers
//! receive serialized text, never node references.

use crate::qname::QName;
use crate::serializer;

/// Handle to a node inside a [`Document`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Single attribute, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: QName,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Element {
        name: QName,
        attributes: Vec<Attribute>,
    },
    Text(String),
    CData(String),
    Comment(String),
    ProcessingInstruction(String),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) children: Vec<NodeId>,
}

/// XML declaration captured at parse time, replayed on serialization.
#[derive(Debug, Clone, Default)]
pub struct XmlDecl {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

/// Fixed local name of the declarations region: declarations are read from
/// the first `defs` child of the root element.
pub const DECLARATIONS_REGION: &str = "defs";

/// Parsed markup document.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
    pub(crate) decl: Option<XmlDecl>,
    pub(crate) doctype: Option<String>,
}

impl Document {
    /// Parse markup text into a document tree.
    ///
    /// Fails on empty input or malformed markup; a missing declarations
    /// region is not a parse failure.
    pub fn parse(text: &str) -> crate::ParseResult<Self> {
        crate::parser::parse(text)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Element { .. })
    }

    /// Qualified name of an element node; `None` for other node kinds.
    pub fn name(&self, id: NodeId) -> Option<&QName> {
        match &self.node(id).kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Ordered attributes of an element; empty for non-elements.
    pub fn attributes(&self, id: NodeId) -> &[Attribute] {
        match &self.node(id).kind {
            NodeKind::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Look up an attribute value by name on an element.
    ///
    /// The name is matched as a parsed [`QName`], so `"width"` only finds
    /// the plain attribute even when a `parametric:width` directive is
    /// present on the same element.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        let wanted = QName::parse(name);
        self.attributes(id)
            .iter()
            .find(|attr| attr.name == wanted)
            .map(|attr| attr.value.as_str())
    }

    /// In-place attribute update; no-op when the attribute does not exist.
    pub fn set_attribute_value(&mut self, id: NodeId, name: &str, text: &str) {
        let wanted = QName::parse(name);
        if let NodeKind::Element { attributes, .. } = &mut self.nodes[id.0].kind {
            if let Some(attr) = attributes.iter_mut().find(|attr| attr.name == wanted) {
                attr.value = text.to_string();
            }
        }
    }

    /// Replace the text of the node's first child, when that child is a
    /// text or CDATA node. No-op otherwise.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        let Some(first) = self.node(id).children.first().copied() else {
            return;
        };
        match &mut self.nodes[first.0].kind {
            NodeKind::Text(content) | NodeKind::CData(content) => *content = text.to_string(),
            _ => {}
        }
    }

    /// Concatenated text of all descendant text and CDATA nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        for &child in self.children(id) {
            match &self.node(child).kind {
                NodeKind::Text(content) | NodeKind::CData(content) => out.push_str(content),
                NodeKind::Element { .. } => self.collect_text(child, out),
                _ => {}
            }
        }
    }

    /// First element child of the root whose local name is the fixed
    /// declarations-region name (`defs`). Namespace prefixes on the region
    /// element itself are ignored.
    pub fn declarations_region(&self) -> Option<NodeId> {
        self.children(self.root)
            .iter()
            .copied()
            .find(|&child| {
                self.name(child)
                    .is_some_and(|name| name.local == DECLARATIONS_REGION)
            })
    }

    /// All descendant elements of `start` (excluding `start` itself) whose
    /// qualified name is `namespace:local`, in depth-first document order.
    pub fn find_all_qualified(&self, start: NodeId, namespace: &str, local: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.find_qualified_into(start, namespace, local, &mut found);
        found
    }

    fn find_qualified_into(
        &self,
        id: NodeId,
        namespace: &str,
        local: &str,
        found: &mut Vec<NodeId>,
    ) {
        for &child in self.children(id) {
            if let Some(name) = self.name(child) {
                if name.in_namespace(namespace) && name.local == local {
                    found.push(child);
                }
                self.find_qualified_into(child, namespace, local, found);
            }
        }
    }

    /// Deterministic textual form of the tree, suitable for re-parsing.
    pub fn serialize(&self) -> String {
        serializer::serialize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document::parse(
            r#"<svg><defs><parametric:default param="w" value="10"/></defs><rect parametric:width="w*2" width="0"/><text>hi</text></svg>"#,
        )
        .unwrap()
    }

    #[test]
    fn test_attribute_lookup_ignores_namespaced_twin() {
        let doc = sample();
        let rect = doc.children(doc.root())[1];
        assert_eq!(doc.attribute(rect, "width"), Some("0"));
        assert_eq!(doc.attribute(rect, "parametric:width"), Some("w*2"));
        assert_eq!(doc.attribute(rect, "height"), None);
    }

    #[test]
    fn test_set_attribute_value_is_noop_for_missing_target() {
        let mut doc = sample();
        let rect = doc.children(doc.root())[1];
        doc.set_attribute_value(rect, "height", "5");
        assert_eq!(doc.attribute(rect, "height"), None);

        doc.set_attribute_value(rect, "width", "20");
        assert_eq!(doc.attribute(rect, "width"), Some("20"));
    }

    #[test]
    fn test_set_text_content_patches_first_text_child_only() {
        let mut doc = sample();
        let text_el = doc.children(doc.root())[2];
        doc.set_text_content(text_el, "patched");
        assert_eq!(doc.text_content(text_el), "patched");

        // First child of <svg> is <defs>, an element: no-op.
        let root = doc.root();
        doc.set_text_content(root, "ignored");
        assert!(!doc.serialize().contains("ignored"));
    }

    #[test]
    fn test_declarations_region_is_first_defs_child() {
        let doc = sample();
        let defs = doc.declarations_region().unwrap();
        assert_eq!(doc.name(defs).unwrap().local, "defs");

        let no_defs = Document::parse("<svg><rect/></svg>").unwrap();
        assert_eq!(no_defs.declarations_region(), None);
    }

    #[test]
    fn test_find_all_qualified_searches_all_depths() {
        let doc = Document::parse(
            r#"<svg><defs><g><parametric:default param="a" value="1"/></g><parametric:default param="b" value="2"/><other:default param="c" value="3"/></defs></svg>"#,
        )
        .unwrap();
        let defs = doc.declarations_region().unwrap();
        let hits = doc.find_all_qualified(defs, "parametric", "default");
        assert_eq!(hits.len(), 2);
        assert_eq!(doc.attribute(hits[0], "param"), Some("a"));
        assert_eq!(doc.attribute(hits[1], "param"), Some("b"));
    }

    #[test]
    fn test_text_content_concatenates_descendants() {
        let doc = Document::parse("<svg><g>a<span>b</span>c</g></svg>").unwrap();
        let g = doc.children(doc.root())[0];
        assert_eq!(doc.text_content(g), "abc");
    }
}
