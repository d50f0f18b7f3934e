//! Document tree → markup text.
//!
//! Output is deterministic: the same tree always serializes to the same
//! bytes. Formatting may differ from the parsed input (empty elements are
//! collapsed to `<name/>`), but round-tripping through the parser preserves
//! node and attribute structure and content.

use crate::dom::{Document, NodeId, NodeKind};
use quick_xml::escape::escape;

pub fn serialize(doc: &Document) -> String {
    let mut out = String::new();

    if let Some(decl) = &doc.decl {
        out.push_str("<?xml version=\"");
        out.push_str(&decl.version);
        out.push('"');
        if let Some(encoding) = &decl.encoding {
            out.push_str(" encoding=\"");
            out.push_str(encoding);
            out.push('"');
        }
        if let Some(standalone) = &decl.standalone {
            out.push_str(" standalone=\"");
            out.push_str(standalone);
            out.push('"');
        }
        out.push_str("?>");
    }
    if let Some(doctype) = &doc.doctype {
        out.push_str("<!DOCTYPE ");
        out.push_str(doctype);
        out.push('>');
    }

    write_node(doc, doc.root(), &mut out);
    out
}

fn write_node(doc: &Document, id: NodeId, out: &mut String) {
    match doc.kind(id) {
        NodeKind::Element { name, attributes } => {
            out.push('<');
            out.push_str(&name.to_string());
            for attr in attributes {
                out.push(' ');
                out.push_str(&attr.name.to_string());
                out.push_str("=\"");
                out.push_str(&escape(attr.value.as_str()));
                out.push('"');
            }

            let children = doc.children(id);
            if children.is_empty() {
                out.push_str("/>");
            } else {
                out.push('>');
                for &child in children {
                    write_node(doc, child, out);
                }
                out.push_str("</");
                out.push_str(&name.to_string());
                out.push('>');
            }
        }
        NodeKind::Text(content) => out.push_str(&escape(content.as_str())),
        NodeKind::CData(content) => {
            out.push_str("<![CDATA[");
            out.push_str(content);
            out.push_str("]]>");
        }
        NodeKind::Comment(content) => {
            out.push_str("<!--");
            out.push_str(content);
            out.push_str("-->");
        }
        NodeKind::ProcessingInstruction(content) => {
            out.push_str("<?");
            out.push_str(content);
            out.push_str("?>");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_escapes_text_and_attributes() {
        let doc = Document::parse(r#"<svg title="a &amp; b"><t>1 &lt; 2</t></svg>"#).unwrap();
        let out = doc.serialize();
        assert!(out.contains(r#"title="a &amp; b""#));
        assert!(out.contains("1 &lt; 2"));
    }

    #[test]
    fn test_serialize_is_deterministic() {
        let doc =
            Document::parse(r#"<svg a="1" b="2"><g><rect x="0"/></g><!--c--></svg>"#).unwrap();
        assert_eq!(doc.serialize(), doc.serialize());
    }

    #[test]
    fn test_attribute_order_is_preserved() {
        let doc = Document::parse(r#"<rect width="1" height="2" x="3"/>"#).unwrap();
        assert_eq!(doc.serialize(), r#"<rect width="1" height="2" x="3"/>"#);
    }
}
