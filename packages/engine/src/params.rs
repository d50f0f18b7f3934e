//! # Parameter Store
//!
//! Named, typed, range-constrained values editable by an external caller.
//! Parameters live for the document's lifetime: they are created when a
//! declaration is parsed and updated in place afterwards, never
//! individually removed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Range limits applied when a declaration omits `min`/`max` or carries
/// text that does not parse as a number.
pub const DEFAULT_MIN: f64 = -99999.0;
pub const DEFAULT_MAX: f64 = 99999.0;

/// Runtime value of a parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    String(String),
}

/// Discriminant of [`ParamValue`], for UI collaborators that only need the
/// column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    Number,
    String,
}

impl ParamValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            ParamValue::Number(_) => ValueKind::Number,
            ParamValue::String(_) => ValueKind::String,
        }
    }

    /// Parse declaration text: numbers become `Number`, everything else is
    /// kept verbatim as `String`.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<f64>() {
            Ok(n) => ParamValue::Number(n),
            Err(_) => ParamValue::String(raw.to_string()),
        }
    }

    /// Script literal for this value. Strings become a backtick template
    /// literal so a stored `foo` evaluates to the *string* `foo` rather
    /// than a variable reference; numbers use their plain literal text.
    pub fn as_script_literal(&self) -> String {
        match self {
            ParamValue::Number(n) => n.to_string(),
            ParamValue::String(s) => format!("`{s}`"),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(n) => write!(f, "{n}"),
            ParamValue::String(s) => f.write_str(s),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        ParamValue::Number(n)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::String(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::String(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: ParamValue,
    pub min: f64,
    pub max: f64,
}

/// Parameter name → [`Parameter`], ordered by name so every evaluation
/// cycle binds globals in the same order.
#[derive(Debug, Default)]
pub struct ParameterStore {
    params: BTreeMap<String, Parameter>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite by name. Declarations with an empty name are
    /// rejected as a no-op.
    pub fn add(&mut self, param: Parameter) {
        if param.name.is_empty() {
            return;
        }
        self.params.insert(param.name.clone(), param);
    }

    /// Update a parameter's value.
    ///
    /// Fails without mutating when the name is unknown, or when a numeric
    /// value falls outside the parameter's `[min, max]` range. String
    /// values bypass range checking entirely, and while a parameter holds
    /// a string value its numeric bounds are not enforced at all. That
    /// asymmetry is documented behavior and deliberately preserved.
    pub fn set(&mut self, name: &str, value: ParamValue) -> bool {
        let Some(param) = self.params.get_mut(name) else {
            return false;
        };
        if let ParamValue::Number(n) = value {
            if matches!(param.value, ParamValue::Number(_)) && !(param.min <= n && n <= param.max) {
                return false;
            }
        }
        param.value = value;
        true
    }

    pub fn value(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name).map(|p| &p.value)
    }

    pub fn kind(&self, name: &str) -> Option<ValueKind> {
        self.params.get(name).map(|p| p.value.kind())
    }

    /// Lower limit; `0.0` for unknown names rather than an error.
    pub fn min(&self, name: &str) -> f64 {
        self.params.get(name).map_or(0.0, |p| p.min)
    }

    /// Upper limit; `0.0` for unknown names rather than an error.
    pub fn max(&self, name: &str) -> f64 {
        self.params.get(name).map_or(0.0, |p| p.max)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.values()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn clear(&mut self) {
        self.params.clear();
    }
}
