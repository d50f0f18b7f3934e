//! # Expression Registry
//!
//! Ordered list of named script snippets, independent of parameters.
//! Order matters: expressions are evaluated sequentially, so a later
//! expression may reference the global bound by an earlier one.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    /// Name of the global the evaluated result is bound to.
    pub name: String,
    pub script: String,
}

#[derive(Debug, Default)]
pub struct ExpressionRegistry {
    expressions: Vec<Expression>,
}

impl ExpressionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an expression; no-op when the name or script is empty.
    pub fn add(&mut self, expression: Expression) {
        if expression.name.is_empty() || expression.script.is_empty() {
            return;
        }
        self.expressions.push(expression);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expression> {
        self.expressions.iter()
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    pub fn clear(&mut self) {
        self.expressions.clear();
    }
}
