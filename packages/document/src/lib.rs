//! # Parametric Document Model
//!
//! In-memory markup tree for the parametric SVG engine: namespace-qualified
//! names, node/attribute lookup and mutation, parsing and deterministic
//! re-serialization.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use parametric_document::Document;
//!
//! let mut doc = Document::parse(r#"<svg><rect width="0"/></svg>"#)?;
//! let rect = doc.children(doc.root())[0];
//! doc.set_attribute_value(rect, "width", "10");
//! let markup = doc.serialize();
//! ```

pub mod dom;
pub mod error;
pub mod parser;
pub mod qname;
pub mod serializer;

pub use dom::{Attribute, Document, NodeId, NodeKind, DECLARATIONS_REGION};
pub use error::{ParseError, ParseResult};
pub use qname::QName;
