//! Declaration parsing.
//!
//! Reads `<ns:default>` and `<ns:expression>` elements out of the document's
//! declarations region. A malformed declaration (missing or empty required
//! attribute) is discarded on its own; it never fails the load.

use crate::expressions::Expression;
use crate::params::{ParamValue, Parameter, DEFAULT_MAX, DEFAULT_MIN};
use parametric_document::{Document, NodeId};
use tracing::debug;

/// `<ns:default param="NAME" value="V" min="MIN" max="MAX"/>` → [`Parameter`].
///
/// `param` and `value` are required; `min`/`max` fall back to ±99999 when
/// absent or unparsable as numbers.
pub fn parameter_from_declaration(doc: &Document, node: NodeId) -> Option<Parameter> {
    let name = doc.attribute(node, "param").filter(|s| !s.is_empty())?;
    let raw_value = doc.attribute(node, "value").filter(|s| !s.is_empty())?;

    let min = doc
        .attribute(node, "min")
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(DEFAULT_MIN);
    let max = doc
        .attribute(node, "max")
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(DEFAULT_MAX);

    Some(Parameter {
        name: name.to_string(),
        value: ParamValue::parse(raw_value),
        min,
        max,
    })
}

/// `<ns:expression var="NAME" exp="SCRIPT">fallback</ns:expression>` →
/// [`Expression`].
///
/// `var` is required. The script comes from the `exp` attribute, falling
/// back to the element's own text content (CDATA included); a declaration
/// with neither is discarded.
pub fn expression_from_declaration(doc: &Document, node: NodeId) -> Option<Expression> {
    let name = doc.attribute(node, "var").filter(|s| !s.is_empty())?;

    let script = match doc.attribute(node, "exp").filter(|s| !s.is_empty()) {
        Some(exp) => exp.to_string(),
        None => {
            let text = doc.text_content(node);
            if text.is_empty() {
                debug!(var = name, "expression declaration has no script, discarding");
                return None;
            }
            text
        }
    };

    Some(Expression {
        name: name.to_string(),
        script,
    })
}
