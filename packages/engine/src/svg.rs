//! # Parametric SVG facade
//!
//! Owns the document tree, parameter store and expression registry, and
//! drives the pipeline: load → read declarations → evaluate → substitute →
//! regenerate. A parameter update re-runs evaluation, substitution and
//! regeneration; it never re-parses declarations.
//!
//! ## Lifecycle
//!
//! ```text
//! set_content → parse → declarations → evaluate → substitute → serialize
//!                                         ↑                        ↓
//!                              update_by_parameter            Renderer::load
//! ```

use crate::declarations::{expression_from_declaration, parameter_from_declaration};
use crate::error::{EngineError, EngineResult};
use crate::evaluator::EvalCycle;
use crate::expressions::ExpressionRegistry;
use crate::params::{ParamValue, Parameter, ParameterStore, ValueKind};
use crate::substitution;
use parametric_document::Document;
use std::path::Path;
use tracing::{debug, info, instrument};

pub const DEFAULT_NAMESPACE: &str = "parametric";

/// External renderer seam. Receives the regenerated markup after every
/// evaluation cycle and must render it identically whether it came from the
/// original file or a post-substitution regeneration.
pub trait Renderer {
    fn load(&mut self, markup: &str);
}

pub struct ParametricSvg {
    document: Option<Document>,
    parameters: ParameterStore,
    expressions: ExpressionRegistry,
    errors: Vec<String>,
    namespace: String,
    markup: String,
    renderer: Option<Box<dyn Renderer>>,
}

impl ParametricSvg {
    pub fn new() -> Self {
        Self::with_namespace(DEFAULT_NAMESPACE)
    }

    /// Use a namespace prefix other than `parametric` for declarations and
    /// substitution directives.
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            document: None,
            parameters: ParameterStore::new(),
            expressions: ExpressionRegistry::new(),
            errors: Vec::new(),
            namespace: namespace.into(),
            markup: String::new(),
            renderer: None,
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let mut svg = Self::new();
        svg.set_content_from_file(path)?;
        Ok(svg)
    }

    pub fn set_renderer(&mut self, renderer: Box<dyn Renderer>) {
        self.renderer = Some(renderer);
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Load markup text, read declarations, and run a full evaluation
    /// cycle. A parse failure leaves all prior state untouched.
    #[instrument(skip_all)]
    pub fn set_content(&mut self, text: &str) -> EngineResult<()> {
        let document = Document::parse(text)?;
        self.document = Some(document);
        self.parameters.clear();
        self.read_declarations();
        info!(
            parameters = self.parameters.len(),
            expressions = self.expressions.len(),
            "document loaded"
        );
        self.run_cycle();
        Ok(())
    }

    /// Load markup from a file: one synchronous read, then [`set_content`].
    ///
    /// [`set_content`]: Self::set_content
    pub fn set_content_from_file(&mut self, path: impl AsRef<Path>) -> EngineResult<()> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| EngineError::io(path, e))?;
        self.set_content(&text)
    }

    fn read_declarations(&mut self) {
        let Some(doc) = &self.document else {
            return;
        };
        // No declarations region is not a load failure; there is simply
        // nothing to read.
        let Some(region) = doc.declarations_region() else {
            debug!("document has no declarations region");
            return;
        };

        for node in doc.find_all_qualified(region, &self.namespace, "default") {
            match parameter_from_declaration(doc, node) {
                Some(param) => self.parameters.add(param),
                None => debug!("discarding malformed parameter declaration"),
            }
        }

        // The registry is rebuilt only when this load found at least one
        // expression declaration; otherwise the previous registry stays.
        let declarations = doc.find_all_qualified(region, &self.namespace, "expression");
        if !declarations.is_empty() {
            self.expressions.clear();
        }
        for node in declarations {
            match expression_from_declaration(doc, node) {
                Some(expression) => self.expressions.add(expression),
                None => debug!("discarding malformed expression declaration"),
            }
        }
    }

    /// One evaluation cycle: fresh scripting context, parameters then
    /// expressions, feedback into the store, substitution over the whole
    /// tree, then regeneration. Starts with an empty error log.
    #[instrument(skip_all)]
    fn run_cycle(&mut self) {
        let mut cycle = EvalCycle::new();
        cycle.bind_parameters(&self.parameters);
        cycle.bind_expressions(&self.expressions);
        cycle.reconcile(&mut self.parameters);
        if let Some(doc) = &mut self.document {
            substitution::apply(doc, &mut cycle, &self.namespace);
        }
        self.errors = cycle.into_errors();
        self.regenerate();
    }

    fn regenerate(&mut self) {
        let Some(doc) = &self.document else {
            return;
        };
        self.markup = doc.serialize();
        if let Some(renderer) = &mut self.renderer {
            renderer.load(&self.markup);
        }
    }

    /// Store-only update, validated against the parameter's range/type
    /// rules. Does not re-evaluate; see [`update_by_parameter`].
    ///
    /// [`update_by_parameter`]: Self::update_by_parameter
    pub fn set_parameter(&mut self, name: &str, value: impl Into<ParamValue>) -> bool {
        self.parameters.set(name, value.into())
    }

    /// Validated update followed by a full cycle: evaluation, substitution
    /// and regeneration. Returns `false` without further work when the
    /// store rejects the value.
    pub fn update_by_parameter(&mut self, name: &str, value: impl Into<ParamValue>) -> bool {
        if !self.parameters.set(name, value.into()) {
            return false;
        }
        self.run_cycle();
        true
    }

    /// Numeric convenience wrapper over [`update_by_parameter`].
    ///
    /// [`update_by_parameter`]: Self::update_by_parameter
    pub fn change_param_by_name(&mut self, name: &str, value: f64) -> bool {
        self.update_by_parameter(name, ParamValue::Number(value))
    }

    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters.names().collect()
    }

    pub fn parameter_value(&self, name: &str) -> Option<&ParamValue> {
        self.parameters.value(name)
    }

    pub fn parameter_type(&self, name: &str) -> Option<ValueKind> {
        self.parameters.kind(name)
    }

    pub fn parameter_min(&self, name: &str) -> f64 {
        self.parameters.min(name)
    }

    pub fn parameter_max(&self, name: &str) -> f64 {
        self.parameters.max(name)
    }

    pub fn parameter_exists(&self, name: &str) -> bool {
        self.parameters.exists(name)
    }

    pub fn parameters_count(&self) -> usize {
        self.parameters.len()
    }

    /// Full parameter table, for UI collaborators.
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter()
    }

    pub fn is_error(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Script errors accumulated during the most recent evaluation cycle.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Markup produced by the most recent regeneration.
    pub fn regenerated_markup(&self) -> &str {
        &self.markup
    }
}

impl Default for ParametricSvg {
    fn default() -> Self {
        Self::new()
    }
}
