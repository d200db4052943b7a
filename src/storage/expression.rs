//! Partial-update expressions and write conditions.
//!
//! An [`UpdateExpression`] is a list of `SET` assignments plus an optional
//! [`Condition`]. Backends apply the assignments attribute by attribute; the
//! [`render`](UpdateExpression::render) form mirrors the placeholder syntax of
//! managed key-value stores and is what gets logged.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// A condition that must hold for a write to be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// The attribute must be present on the current item.
    AttributeExists(String),
    /// The attribute must be absent (or the item must not exist).
    AttributeNotExists(String),
}

impl Condition {
    /// Evaluate the condition against the current item, if any.
    pub fn evaluate(&self, current: Option<&Value>) -> bool {
        let has = |attribute: &str| current.and_then(|item| item.get(attribute)).is_some();
        match self {
            Condition::AttributeExists(attribute) => has(attribute),
            Condition::AttributeNotExists(attribute) => !has(attribute),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::AttributeExists(attribute) => write!(f, "attribute_exists({})", attribute),
            Condition::AttributeNotExists(attribute) => {
                write!(f, "attribute_not_exists({})", attribute)
            }
        }
    }
}

/// A `SET`-only partial update.
///
/// Assignments keep insertion order; assigning the same attribute twice keeps
/// the last value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateExpression {
    assignments: Vec<(String, Value)>,
    condition: Option<Condition>,
}

/// The placeholder form of an [`UpdateExpression`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedUpdate {
    /// e.g. `SET #updated_at = :updated_at, #name = :name`
    pub update_expression: String,
    /// `#placeholder` → attribute name
    pub attribute_names: BTreeMap<String, String>,
    /// `:placeholder` → value
    pub attribute_values: BTreeMap<String, Value>,
    pub condition_expression: Option<String>,
}

impl UpdateExpression {
    /// Create an empty expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `SET attribute = value` assignment.
    pub fn set(mut self, attribute: impl Into<String>, value: Value) -> Self {
        let attribute = attribute.into();
        match self.assignments.iter_mut().find(|(name, _)| *name == attribute) {
            Some((_, existing)) => *existing = value,
            None => self.assignments.push((attribute, value)),
        }
        self
    }

    /// Require a condition for the update to apply.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn assignments(&self) -> &[(String, Value)] {
        &self.assignments
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Apply the assignments to an item object in place.
    pub fn apply_to(&self, item: &mut Map<String, Value>) {
        for (attribute, value) in &self.assignments {
            item.insert(attribute.clone(), value.clone());
        }
    }

    /// Render to placeholder form.
    pub fn render(&self) -> RenderedUpdate {
        let mut parts = Vec::with_capacity(self.assignments.len());
        let mut attribute_names = BTreeMap::new();
        let mut attribute_values = BTreeMap::new();

        for (attribute, value) in &self.assignments {
            let name = format!("#{}", attribute);
            let placeholder = format!(":{}", attribute);
            parts.push(format!("{} = {}", name, placeholder));
            attribute_names.insert(name, attribute.clone());
            attribute_values.insert(placeholder, value.clone());
        }

        RenderedUpdate {
            update_expression: format!("SET {}", parts.join(", ")),
            attribute_names,
            attribute_values,
            condition_expression: self.condition.as_ref().map(|c| c.to_string()),
        }
    }
}
