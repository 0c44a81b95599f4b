//! Recursive skeleton filling.
//!
//! The merger walks an arbitrary skeleton and decides per node whether to
//! preserve it or generate a replacement: populated fields are never
//! regenerated. Empty fields resolve their constraints through the
//! [`SchemaRepository`] by dotted path, falling back to name-based type
//! inference, and delegate generation to the [`ValueProvider`]. A separate
//! validation pass re-walks filled data against the same repository and
//! collects violations without short-circuiting.

use crate::adapters::schema_repository::SchemaRepository;
use crate::adapters::value_provider::ValueProvider;
use crate::domain::{json_type_name, ConstraintSet, FieldType, Violation};
use serde_json::Value;

/// Decides whether a skeleton node marks a generation point.
///
/// Empty means: null, empty or whitespace-only string, empty list, empty
/// object, or a string starting with the "@" sentinel.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty() || text.starts_with('@'),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Recursive skeleton filler and validator.
pub struct SkeletonMerger;

impl SkeletonMerger {
    pub fn new() -> Self {
        Self
    }

    /// Fill a skeleton, preserving every populated field.
    ///
    /// The skeleton is never mutated; the result is a freshly built tree of
    /// the same shape. Pass `None` for the repository to rely on name-based
    /// inference alone.
    pub fn fill(
        &self,
        skeleton: &Value,
        repository: Option<&SchemaRepository>,
        provider: &mut ValueProvider,
    ) -> Value {
        self.fill_node(skeleton, repository, provider, "")
    }

    fn fill_node(
        &self,
        node: &Value,
        repository: Option<&SchemaRepository>,
        provider: &mut ValueProvider,
        path: &str,
    ) -> Value {
        match node {
            Value::Object(map) => {
                let mut filled = serde_json::Map::new();
                for (key, value) in map {
                    let child_path = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", path, key)
                    };
                    let child = if is_empty_value(value) {
                        self.generate_field(key, &child_path, repository, provider)
                    } else {
                        self.fill_node(value, repository, provider, &child_path)
                    };
                    filled.insert(key.clone(), child);
                }
                Value::Object(filled)
            }
            Value::Array(items) => {
                if items.is_empty() {
                    Value::Array(self.synthesize_elements(path, repository, provider))
                } else {
                    let filled = items
                        .iter()
                        .enumerate()
                        .map(|(index, item)| {
                            let item_path = format!("{}[{}]", path, index);
                            self.fill_node(item, repository, provider, &item_path)
                        })
                        .collect();
                    Value::Array(filled)
                }
            }
            other if is_empty_value(other) => {
                let field_name = last_segment(path);
                self.generate_field(field_name, path, repository, provider)
            }
            other => other.clone(),
        }
    }

    fn generate_field(
        &self,
        field_name: &str,
        path: &str,
        repository: Option<&SchemaRepository>,
        provider: &mut ValueProvider,
    ) -> Value {
        let constraints = repository
            .map(|r| r.constraints_for(path))
            .unwrap_or_default();

        // schema constraints beat name heuristics; constraints without a
        // declared type mean string, not inference
        let kind = if constraints.is_empty() {
            infer_field_type(field_name)
        } else {
            constraints.resolved_type()
        };

        provider.generate(kind, field_name, &constraints)
    }

    /// Synthesize elements for a skeleton node that is itself an empty list.
    fn synthesize_elements(
        &self,
        path: &str,
        repository: Option<&SchemaRepository>,
        provider: &mut ValueProvider,
    ) -> Vec<Value> {
        let constraints = repository
            .map(|r| r.constraints_for(path))
            .unwrap_or_default();

        let count = if constraints.is_empty() {
            2
        } else {
            constraints.min_items.unwrap_or(2)
        };

        let field_name = last_segment(path);
        let item_field = format!("{}_item", field_name);

        (0..count)
            .map(|_| match &constraints.items {
                Some(items) => provider.generate(items.resolved_type(), &item_field, items),
                None => {
                    let kind = infer_element_type(field_name);
                    provider.generate(kind, &item_field, &ConstraintSet::default())
                }
            })
            .collect()
    }

    /// Re-walk filled data and collect every constraint violation.
    pub fn validate(&self, data: &Value, repository: &SchemaRepository) -> Vec<Violation> {
        let mut violations = Vec::new();
        self.validate_node(data, repository, "", &mut violations);
        violations
    }

    fn validate_node(
        &self,
        data: &Value,
        repository: &SchemaRepository,
        path: &str,
        violations: &mut Vec<Violation>,
    ) {
        match data {
            Value::Object(map) => {
                for (key, value) in map {
                    let child_path = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", path, key)
                    };
                    let constraints = repository.constraints_for(&child_path);
                    if !constraints.is_empty() {
                        validate_field(value, &constraints, &child_path, violations);
                    }
                    self.validate_node(value, repository, &child_path, violations);
                }
            }
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    let item_path = if path.is_empty() {
                        format!("[{}]", index)
                    } else {
                        format!("{}[{}]", path, index)
                    };
                    self.validate_node(item, repository, &item_path, violations);
                }
            }
            _ => {}
        }
    }
}

impl Default for SkeletonMerger {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_field(
    value: &Value,
    constraints: &ConstraintSet,
    path: &str,
    violations: &mut Vec<Violation>,
) {
    if let Some(declared) = constraints.field_type.as_deref() {
        let known = matches!(
            declared,
            "string" | "integer" | "number" | "boolean" | "array" | "object"
        );
        // unknown declared types accept any value
        if known && !FieldType::from_name(declared).matches(value) {
            violations.push(Violation::new(
                path,
                format!("expected type {}, got {}", declared, json_type_name(value)),
            ));
        }
    }

    if let Some(text) = value.as_str() {
        if let Some(min) = constraints.min_length {
            if text.len() < min {
                violations.push(Violation::new(
                    path,
                    format!("string too short (min: {})", min),
                ));
            }
        }
        if let Some(max) = constraints.max_length {
            if text.len() > max {
                violations.push(Violation::new(
                    path,
                    format!("string too long (max: {})", max),
                ));
            }
        }
    }

    if let Some(number) = value.as_f64() {
        if let Some(min) = constraints.minimum {
            if number < min {
                violations.push(Violation::new(
                    path,
                    format!("value too small (min: {})", min),
                ));
            }
        }
        if let Some(max) = constraints.maximum {
            if number > max {
                violations.push(Violation::new(
                    path,
                    format!("value too large (max: {})", max),
                ));
            }
        }
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

/// Ordered name heuristic used when no schema constraints resolve.
fn infer_field_type(field_name: &str) -> FieldType {
    let lower = field_name.to_lowercase();

    const INTEGER_HINTS: &[&str] = &["id", "count", "number", "age", "year"];
    const NUMBER_HINTS: &[&str] = &["price", "amount", "cost", "rate", "percent"];
    const BOOLEAN_HINTS: &[&str] = &["is_", "has_", "can_", "active", "enabled"];

    if INTEGER_HINTS.iter().any(|hint| lower.contains(hint)) {
        return FieldType::Integer;
    }
    if NUMBER_HINTS.iter().any(|hint| lower.contains(hint)) {
        return FieldType::Number;
    }
    if BOOLEAN_HINTS.iter().any(|hint| lower.contains(hint)) {
        return FieldType::Boolean;
    }
    if lower.ends_with('s') || lower.contains("list") {
        return FieldType::Array;
    }
    FieldType::String
}

/// Element type inferred from the array field's own name.
fn infer_element_type(array_field_name: &str) -> FieldType {
    let lower = array_field_name.to_lowercase();

    if ["ids", "numbers"].iter().any(|hint| lower.contains(hint)) {
        return FieldType::Integer;
    }
    if ["prices", "amounts", "costs"]
        .iter()
        .any(|hint| lower.contains(hint))
    {
        return FieldType::Number;
    }
    if ["flags", "states"].iter().any(|hint| lower.contains(hint)) {
        return FieldType::Boolean;
    }
    FieldType::String
}
