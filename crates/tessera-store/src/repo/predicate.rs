//! Structured filter builder
//!
//! Composes WHERE fragments from typed comparisons, binding every value
//! as a positional named parameter (`:p0`, `:p1`, ...). Raw fragments are
//! available for trusted, hand-written SQL only; they are spliced into
//! the statement verbatim and must never carry untrusted input.

#![allow(clippy::result_large_err)]

use crate::errors::{argument_error, Result};
use tessera_core::Value;

/// Comparison operator for a single-field condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Like,
}

impl Op {
    fn symbol(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Ne => "<>",
            Op::Lt => "<",
            Op::Le => "<=",
            Op::Gt => ">",
            Op::Ge => ">=",
            Op::Like => "LIKE",
        }
    }
}

#[derive(Debug, Clone)]
enum Condition {
    Compare {
        field: String,
        op: Op,
        value: Value,
    },
    /// Verbatim SQL; trusted input only.
    Raw(String),
}

/// Conjunction of conditions; renders as `a AND b AND ...`.
#[derive(Debug, Clone, Default)]
pub struct Predicate {
    conditions: Vec<Condition>,
}

impl Predicate {
    /// Start a predicate with one field comparison.
    pub fn field(name: &str, op: Op, value: impl Into<Value>) -> Self {
        Self::default().and(name, op, value)
    }

    /// Start a predicate with a verbatim SQL fragment. The fragment is not
    /// parameterized; only pass compile-time or otherwise trusted SQL.
    pub fn raw(fragment: &str) -> Self {
        Self::default().and_raw(fragment)
    }

    /// Add a field comparison, AND-ed with the existing conditions.
    pub fn and(mut self, name: &str, op: Op, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition::Compare {
            field: name.to_string(),
            op,
            value: value.into(),
        });
        self
    }

    /// Add a verbatim fragment, AND-ed with the existing conditions.
    pub fn and_raw(mut self, fragment: &str) -> Self {
        self.conditions.push(Condition::Raw(fragment.to_string()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Render to a WHERE fragment (without the keyword) plus its bindings.
    pub fn to_sql(&self) -> Result<(String, Vec<(String, Value)>)> {
        if self.conditions.is_empty() {
            return Err(argument_error("predicate must contain at least one condition"));
        }

        let mut fragments = Vec::with_capacity(self.conditions.len());
        let mut bound = Vec::new();

        for condition in &self.conditions {
            match condition {
                Condition::Compare { field, op, value } => {
                    if field.trim().is_empty() {
                        return Err(argument_error("predicate field name must not be blank"));
                    }
                    let param = format!(":p{}", bound.len());
                    fragments.push(format!("{} {} {}", field, op.symbol(), param));
                    bound.push((param, value.clone()));
                }
                Condition::Raw(fragment) => {
                    if fragment.trim().is_empty() {
                        return Err(argument_error("raw predicate fragment must not be blank"));
                    }
                    fragments.push(format!("({})", fragment));
                }
            }
        }

        Ok((fragments.join(" AND "), bound))
    }
}
