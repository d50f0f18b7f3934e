//! # Evaluation Engine
//!
//! One [`EvalCycle`] is one run of parameter evaluation → expression
//! evaluation → feedback reconciliation. Each cycle embeds a fresh `rhai`
//! engine and scope; no script state, including user-defined functions,
//! survives into the next cycle.
//!
//! No individual evaluation failure aborts the cycle. Every parameter and
//! expression is attempted; failures only populate the error log, and the
//! cycle as a whole has no failure mode.

use crate::expressions::ExpressionRegistry;
use crate::params::{ParamValue, ParameterStore};
use rhai::{Dynamic, Engine, Scope};
use tracing::{debug, instrument, warn};

pub struct EvalCycle {
    engine: Engine,
    scope: Scope<'static>,
    errors: Vec<String>,
}

impl EvalCycle {
    pub fn new() -> Self {
        Self {
            engine: Engine::new(),
            scope: Scope::new(),
            errors: Vec::new(),
        }
    }

    /// Evaluate a script against the cycle's shared scope. Failures are
    /// captured in the error log and reported as `None`.
    fn eval(&mut self, script: &str) -> Option<Dynamic> {
        match self.engine.eval_with_scope::<Dynamic>(&mut self.scope, script) {
            Ok(value) => Some(value),
            Err(e) => {
                self.errors.push(e.to_string());
                None
            }
        }
    }

    /// Stage one: evaluate every parameter's value as a script literal and
    /// bind the result as a global named after the parameter. A failed
    /// evaluation leaves that global unbound.
    #[instrument(skip_all, fields(parameters = store.len()))]
    pub fn bind_parameters(&mut self, store: &ParameterStore) {
        for param in store.iter() {
            let literal = param.value.as_script_literal();
            match self.eval(&literal) {
                Some(value) => {
                    self.scope.set_value(param.name.clone(), value);
                }
                None => warn!(parameter = %param.name, "parameter literal failed to evaluate"),
            }
        }
    }

    /// Stage two: evaluate expressions in declaration order, binding each
    /// result as a global named after the expression's `var` name. A script
    /// may reference parameter globals and expression globals bound earlier
    /// in the same pass.
    #[instrument(skip_all, fields(expressions = registry.len()))]
    pub fn bind_expressions(&mut self, registry: &ExpressionRegistry) {
        for expression in registry.iter() {
            match self.eval(&expression.script) {
                Some(value) => {
                    self.scope.set_value(expression.name.clone(), value);
                }
                None => warn!(expression = %expression.name, "expression failed to evaluate"),
            }
        }
    }

    /// Feedback pass: read back every global that shares a name with a
    /// parameter and, when its value changed, write it into the store under
    /// the usual range/type rules. Single-pass reconciliation only — an
    /// expression referencing an overridden parameter will not see the
    /// override until the next cycle.
    #[instrument(skip_all)]
    pub fn reconcile(&mut self, store: &mut ParameterStore) {
        let names: Vec<String> = store.names().map(str::to_string).collect();
        for name in names {
            let Some(value) = self.scope.get_value::<Dynamic>(&name) else {
                continue;
            };
            let Some(new_value) = dynamic_to_param_value(value) else {
                continue;
            };
            if store.value(&name) != Some(&new_value) {
                debug!(parameter = %name, value = %new_value, "expression feedback");
                if !store.set(&name, new_value) {
                    debug!(parameter = %name, "feedback value rejected by range check");
                }
            }
        }
    }

    /// Evaluate a substitution directive, rendering the result as text.
    pub fn eval_to_string(&mut self, script: &str) -> Option<String> {
        self.eval(script).map(|value| value.to_string())
    }

    /// Whether a global of this name was bound during the cycle.
    pub fn has_global(&self, name: &str) -> bool {
        self.scope.contains(name)
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

impl Default for EvalCycle {
    fn default() -> Self {
        Self::new()
    }
}

fn dynamic_to_param_value(value: Dynamic) -> Option<ParamValue> {
    if value.is_unit() {
        return None;
    }
    if value.is_int() {
        return value.as_int().ok().map(|n| ParamValue::Number(n as f64));
    }
    if value.is_float() {
        return value.as_float().ok().map(ParamValue::Number);
    }
    if value.is_string() {
        return value.into_string().ok().map(ParamValue::String);
    }
    // Booleans, arrays and other script values come back as their textual
    // rendering, same as any other non-numeric value.
    Some(ParamValue::String(value.to_string()))
}
