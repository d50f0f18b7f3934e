//! Markup text → document tree.
//!
//! Built on the `quick-xml` event reader. Qualified names are split into
//! [`QName`] values once, here; nothing downstream re-splits raw names.

use crate::dom::{Attribute, Document, Node, NodeId, NodeKind, XmlDecl};
use crate::error::{ParseError, ParseResult};
use crate::qname::QName;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

pub fn parse(text: &str) -> ParseResult<Document> {
    if text.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut reader = Reader::from_str(text);
    let mut nodes: Vec<Node> = Vec::new();
    let mut stack: Vec<NodeId> = Vec::new();
    let mut root: Option<NodeId> = None;
    let mut decl: Option<XmlDecl> = None;
    let mut doctype: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Decl(d) => {
                let version = d
                    .version()
                    .map(|v| String::from_utf8_lossy(&v).into_owned())
                    .unwrap_or_else(|_| "1.0".to_string());
                let encoding = d
                    .encoding()
                    .and_then(|e| e.ok())
                    .map(|e| String::from_utf8_lossy(&e).into_owned());
                let standalone = d
                    .standalone()
                    .and_then(|s| s.ok())
                    .map(|s| String::from_utf8_lossy(&s).into_owned());
                decl = Some(XmlDecl {
                    version,
                    encoding,
                    standalone,
                });
            }
            Event::DocType(t) => {
                doctype = Some(String::from_utf8_lossy(t.as_ref()).into_owned());
            }
            Event::Start(start) => {
                let id = attach_element(&mut nodes, &mut stack, &mut root, &start)?;
                stack.push(id);
            }
            Event::Empty(start) => {
                attach_element(&mut nodes, &mut stack, &mut root, &start)?;
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Text(t) => {
                let content = t
                    .unescape()
                    .map_err(|e| ParseError::malformed(e.to_string()))?;
                attach(&mut nodes, &stack, NodeKind::Text(content.into_owned()));
            }
            Event::CData(c) => {
                let content = String::from_utf8_lossy(&c.into_inner()).into_owned();
                attach(&mut nodes, &stack, NodeKind::CData(content));
            }
            Event::Comment(c) => {
                let content = String::from_utf8_lossy(c.as_ref()).into_owned();
                attach(&mut nodes, &stack, NodeKind::Comment(content));
            }
            Event::PI(pi) => {
                let content = String::from_utf8_lossy(pi.as_ref()).into_owned();
                attach(&mut nodes, &stack, NodeKind::ProcessingInstruction(content));
            }
            Event::Eof => break,
        }
    }

    let root = root.ok_or(ParseError::NoRootElement)?;
    Ok(Document {
        nodes,
        root,
        decl,
        doctype,
    })
}

fn attach_element(
    nodes: &mut Vec<Node>,
    stack: &mut Vec<NodeId>,
    root: &mut Option<NodeId>,
    start: &BytesStart<'_>,
) -> ParseResult<NodeId> {
    let name = QName::parse(&String::from_utf8_lossy(start.name().as_ref()));

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ParseError::malformed(e.to_string()))?;
        let key = QName::parse(&String::from_utf8_lossy(attr.key.as_ref()));
        let value = attr
            .unescape_value()
            .map_err(|e| ParseError::malformed(e.to_string()))?
            .into_owned();
        attributes.push(Attribute { name: key, value });
    }

    let id = NodeId(nodes.len());
    nodes.push(Node {
        kind: NodeKind::Element { name, attributes },
        children: Vec::new(),
    });

    match stack.last() {
        Some(&parent) => nodes[parent.0].children.push(id),
        None => {
            if root.is_some() {
                return Err(ParseError::MultipleRoots);
            }
            *root = Some(id);
        }
    }
    Ok(id)
}

/// Attach a non-element node under the current open element. Text outside
/// the root element (inter-prolog whitespace) is dropped.
fn attach(nodes: &mut Vec<Node>, stack: &[NodeId], kind: NodeKind) {
    let Some(&parent) = stack.last() else {
        return;
    };
    let id = NodeId(nodes.len());
    nodes.push(Node {
        kind,
        children: Vec::new(),
    });
    nodes[parent.0].children.push(id);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_a_parse_error() {
        assert!(matches!(parse(""), Err(ParseError::EmptyInput)));
        assert!(matches!(parse("   \n "), Err(ParseError::EmptyInput)));
    }

    #[test]
    fn test_malformed_markup_is_a_parse_error() {
        assert!(parse("<svg><rect></svg>").is_err());
        assert!(parse("not markup at all").is_err());
    }

    #[test]
    fn test_multiple_roots_rejected() {
        assert!(matches!(
            parse("<a/><b/>"),
            Err(ParseError::MultipleRoots)
        ));
    }

    #[test]
    fn test_entities_in_attributes_are_unescaped() {
        let doc = parse(r#"<svg title="a &amp; b"/>"#).unwrap();
        assert_eq!(doc.attribute(doc.root(), "title"), Some("a & b"));
    }

    #[test]
    fn test_cdata_and_comments_survive() {
        let doc = parse("<svg><!-- note --><script><![CDATA[x < 1]]></script></svg>").unwrap();
        let children = doc.children(doc.root());
        assert!(matches!(doc.kind(children[0]), NodeKind::Comment(c) if c == " note "));
        let script = children[1];
        assert_eq!(doc.text_content(script), "x < 1");
    }

    #[test]
    fn test_xml_decl_is_captured() {
        let doc = parse(r#"<?xml version="1.0" encoding="UTF-8"?><svg/>"#).unwrap();
        let serialized = doc.serialize();
        assert!(serialized.starts_with("<?xml"));
        assert!(serialized.contains("UTF-8"));
    }
}
