//! # Template Substitution Pass
//!
//! Depth-first walk over the whole tree: each element's attributes are
//! visited before its children, and the walk never short-circuits on
//! errors. Every attribute in the configured namespace is a directive: its
//! value is evaluated as a script expression against the cycle's shared
//! scope and the result patches either the element's first text child (for
//! the `text` keyword) or the plain attribute of the same local name.

use crate::evaluator::EvalCycle;
use parametric_document::{Document, NodeId};
use tracing::{instrument, warn};

/// Case-insensitive local name that redirects a patch at the element's
/// text content instead of an attribute.
const TEXT_KEYWORD: &str = "text";

#[instrument(skip(doc, cycle))]
pub fn apply(doc: &mut Document, cycle: &mut EvalCycle, namespace: &str) {
    walk(doc, doc.root(), cycle, namespace);
}

fn walk(doc: &mut Document, node: NodeId, cycle: &mut EvalCycle, namespace: &str) {
    let directives: Vec<(String, String)> = doc
        .attributes(node)
        .iter()
        .filter(|attr| attr.name.in_namespace(namespace))
        .map(|attr| (attr.name.local.clone(), attr.value.clone()))
        .collect();

    for (local, script) in directives {
        let Some(result) = cycle.eval_to_string(&script) else {
            warn!(directive = %local, "substitution script failed, leaving node unmodified");
            continue;
        };
        if local.eq_ignore_ascii_case(TEXT_KEYWORD) {
            doc.set_text_content(node, &result);
        } else {
            // The directive patches the element's own plain attribute; if
            // none exists the patch is silently skipped.
            doc.set_attribute_value(node, &local, &result);
        }
    }

    let children: Vec<NodeId> = doc.children(node).to_vec();
    for child in children {
        if doc.is_element(child) {
            walk(doc, child, cycle, namespace);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expressions::{Expression, ExpressionRegistry};
    use crate::params::{ParamValue, Parameter, ParameterStore};

    fn cycle_with_w(value: f64) -> EvalCycle {
        let mut store = ParameterStore::new();
        store.add(Parameter {
            name: "w".to_string(),
            value: ParamValue::Number(value),
            min: crate::params::DEFAULT_MIN,
            max: crate::params::DEFAULT_MAX,
        });
        let mut cycle = EvalCycle::new();
        cycle.bind_parameters(&store);
        cycle
    }

    #[test]
    fn test_directive_patches_plain_attribute() {
        let mut doc =
            Document::parse(r#"<svg><rect parametric:width="w*2" width="0"/></svg>"#).unwrap();
        let mut cycle = cycle_with_w(5.0);
        apply(&mut doc, &mut cycle, "parametric");

        let rect = doc.children(doc.root())[0];
        assert_eq!(doc.attribute(rect, "width"), Some("10"));
        // The directive itself is left in place.
        assert_eq!(doc.attribute(rect, "parametric:width"), Some("w*2"));
    }

    #[test]
    fn test_text_keyword_patches_text_content() {
        let mut doc = Document::parse(
            r#"<svg><text parametric:TEXT="`w = ` + w">placeholder</text></svg>"#,
        )
        .unwrap();
        let mut cycle = cycle_with_w(7.0);
        apply(&mut doc, &mut cycle, "parametric");

        let text = doc.children(doc.root())[0];
        assert_eq!(doc.text_content(text), "w = 7");
    }

    #[test]
    fn test_missing_target_is_silently_skipped() {
        let mut doc = Document::parse(r#"<svg><rect parametric:width="w*2"/></svg>"#).unwrap();
        let mut cycle = cycle_with_w(5.0);
        apply(&mut doc, &mut cycle, "parametric");

        let rect = doc.children(doc.root())[0];
        assert_eq!(doc.attribute(rect, "width"), None);
        assert!(cycle.errors().is_empty());
    }

    #[test]
    fn test_failed_script_leaves_node_unmodified_and_walk_continues() {
        let mut doc = Document::parse(
            r#"<svg><rect parametric:width="oops +" width="0"/><circle parametric:r="w" r="1"/></svg>"#,
        )
        .unwrap();
        let mut cycle = cycle_with_w(5.0);
        apply(&mut doc, &mut cycle, "parametric");

        let rect = doc.children(doc.root())[0];
        let circle = doc.children(doc.root())[1];
        assert_eq!(doc.attribute(rect, "width"), Some("0"));
        assert_eq!(doc.attribute(circle, "r"), Some("5"));
        assert_eq!(cycle.errors().len(), 1);
    }

    #[test]
    fn test_other_namespaces_are_ignored() {
        let mut doc =
            Document::parse(r#"<svg><rect xlink:width="w*2" width="0"/></svg>"#).unwrap();
        let mut cycle = cycle_with_w(5.0);
        apply(&mut doc, &mut cycle, "parametric");

        let rect = doc.children(doc.root())[0];
        assert_eq!(doc.attribute(rect, "width"), Some("0"));
    }

    #[test]
    fn test_root_element_attributes_are_substituted() {
        let mut doc =
            Document::parse(r#"<svg parametric:width="w*4" width="0"><rect/></svg>"#).unwrap();
        let mut cycle = cycle_with_w(2.0);
        apply(&mut doc, &mut cycle, "parametric");

        assert_eq!(doc.attribute(doc.root(), "width"), Some("8"));
    }

    #[test]
    fn test_substitution_sees_expression_globals() {
        let mut doc =
            Document::parse(r#"<svg><rect parametric:height="area" height="0"/></svg>"#).unwrap();
        let mut registry = ExpressionRegistry::new();
        registry.add(Expression {
            name: "area".to_string(),
            script: "w * 3".to_string(),
        });
        let mut cycle = cycle_with_w(4.0);
        cycle.bind_expressions(&registry);
        apply(&mut doc, &mut cycle, "parametric");

        let rect = doc.children(doc.root())[0];
        assert_eq!(doc.attribute(rect, "height"), Some("12"));
    }
}
