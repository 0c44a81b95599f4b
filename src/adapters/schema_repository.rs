//! Schema document loading and constraint resolution.
//!
//! A repository is built once from a decoded OpenAPI-like document and is
//! read-only afterward, so it can be shared by reference across concurrent
//! generation sessions.

use crate::domain::{ConstraintSet, FieldType};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Read-only index of named schemas extracted from a schema document.
pub struct SchemaRepository {
    /// Schemas in declaration order; order is the tie-break for
    /// [`best_match`](Self::best_match).
    schemas: Vec<(String, ConstraintSet)>,
}

impl SchemaRepository {
    /// Build a repository from a decoded schema document.
    ///
    /// Recognizes exactly two shapes: a `components.schemas` facet (OpenAPI
    /// 3.x) or a top-level `definitions` facet (Swagger 2.x). Any other
    /// document yields an empty repository, not an error.
    pub fn from_document(document: &Value) -> Self {
        let named = document
            .get("components")
            .and_then(|components| components.get("schemas"))
            .and_then(Value::as_object)
            .or_else(|| document.get("definitions").and_then(Value::as_object));

        let schemas = named
            .map(|schemas| {
                schemas
                    .iter()
                    .map(|(name, schema)| (name.clone(), ConstraintSet::from_schema(schema)))
                    .collect()
            })
            .unwrap_or_default();

        Self { schemas }
    }

    pub fn empty() -> Self {
        Self {
            schemas: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn schema(&self, name: &str) -> Option<&ConstraintSet> {
        self.schemas
            .iter()
            .find(|(schema_name, _)| schema_name == name)
            .map(|(_, schema)| schema)
    }

    /// Resolve a dotted field path to its constraint set.
    ///
    /// The path needs at least two segments: the first names a schema, the
    /// second one of its direct properties. Deeper segments are not traversed
    /// here; nested discovery rides on the `items`/`properties` facets
    /// embedded in the returned set. A miss returns an empty set.
    pub fn constraints_for(&self, path: &str) -> ConstraintSet {
        let parts: Vec<&str> = path.split('.').collect();
        if parts.len() < 2 {
            return ConstraintSet::default();
        }

        self.schema(parts[0])
            .and_then(|schema| {
                schema
                    .properties
                    .iter()
                    .find(|(name, _)| name == parts[1])
            })
            .map(|(_, constraints)| constraints.clone())
            .unwrap_or_default()
    }

    /// Fuzzy-match an example object to the best-fitting schema.
    ///
    /// Each schema with declared properties is scored as 0.6 times the
    /// Jaccard index of the key sets plus 0.4 times the fraction of shared
    /// keys whose runtime type matches the declared type. Only scores above
    /// 0.5 qualify; earlier declarations win ties.
    pub fn best_match(&self, example: &Map<String, Value>) -> Option<&str> {
        let mut best: Option<&str> = None;
        let mut best_score = 0.0;

        for (name, schema) in &self.schemas {
            let score = match_score(example, schema);
            if score > best_score {
                best_score = score;
                best = Some(name);
            }
        }

        if best_score > 0.5 {
            best
        } else {
            None
        }
    }
}

fn match_score(example: &Map<String, Value>, schema: &ConstraintSet) -> f64 {
    if schema.properties.is_empty() || example.is_empty() {
        return 0.0;
    }

    let schema_keys: HashSet<&str> = schema
        .properties
        .iter()
        .map(|(name, _)| name.as_str())
        .collect();
    let example_keys: HashSet<&str> = example.keys().map(String::as_str).collect();

    let common = example_keys.intersection(&schema_keys).count();
    let total = example_keys.union(&schema_keys).count();
    let key_score = common as f64 / total as f64;

    let mut type_score = 0.0;
    if common > 0 {
        let agreeing = schema
            .properties
            .iter()
            .filter(|(name, prop)| {
                example
                    .get(name)
                    .map_or(false, |value| types_agree(value, prop))
            })
            .count();
        type_score = agreeing as f64 / common as f64;
    }

    key_score * 0.6 + type_score * 0.4
}

fn types_agree(value: &Value, prop: &ConstraintSet) -> bool {
    match prop.field_type.as_deref() {
        // no declared type matches anything
        None => true,
        Some(name) => match name {
            "string" | "integer" | "number" | "boolean" | "array" | "object" => {
                FieldType::from_name(name).matches(value)
            }
            _ => false,
        },
    }
}
