//! Core types shared by the generation engine: field types, constraint sets
//! resolved from schema documents, and validation violations.

use serde_json::Value;
use std::fmt;

/// The closed set of generatable value types.
///
/// Schema documents and name-based inference both resolve to one of these;
/// anything outside the set falls back to `String`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

impl FieldType {
    /// Resolve a declared type name. Unrecognized or missing names default to
    /// `String` rather than erroring.
    pub fn from_name(name: &str) -> Self {
        match name {
            "string" => FieldType::String,
            "integer" => FieldType::Integer,
            "number" => FieldType::Number,
            "boolean" => FieldType::Boolean,
            "array" => FieldType::Array,
            "object" => FieldType::Object,
            _ => FieldType::String,
        }
    }

    /// Check whether a runtime JSON value conforms to this type. `Number`
    /// accepts integers as well as floats.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Integer => value.as_i64().is_some() || value.as_u64().is_some(),
            FieldType::Number => value.is_number(),
            FieldType::Boolean => value.is_boolean(),
            FieldType::Array => value.is_array(),
            FieldType::Object => value.is_object(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Array => "array",
            FieldType::Object => "object",
        };
        write!(f, "{}", name)
    }
}

/// The JSON type name of a runtime value, for diagnostics.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.is_f64() {
                "number"
            } else {
                "integer"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Generation and validation facets resolved for one field.
///
/// `items` and `properties` only populate for array and object types. An
/// empty set means "no constraints found" and callers fall through to
/// name-based inference.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    /// Declared type name, kept raw: unknown names are tolerated here and
    /// resolved to `string` at generation time.
    pub field_type: Option<String>,
    pub format: Option<String>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub pattern: Option<String>,
    pub enum_values: Option<Vec<Value>>,
    pub multiple_of: Option<i64>,
    /// Element schema for array fields.
    pub items: Option<Box<ConstraintSet>>,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
    /// Declared properties for object fields, in declaration order.
    pub properties: Vec<(String, ConstraintSet)>,
}

impl ConstraintSet {
    /// Extract the recognized facets from a schema fragment. Unknown facets
    /// are ignored; a non-object fragment yields an empty set.
    pub fn from_schema(schema: &Value) -> Self {
        let mut set = ConstraintSet::default();
        let Some(obj) = schema.as_object() else {
            return set;
        };

        set.field_type = obj.get("type").and_then(Value::as_str).map(String::from);
        set.format = obj.get("format").and_then(Value::as_str).map(String::from);
        set.min_length = obj
            .get("minLength")
            .and_then(Value::as_u64)
            .map(|v| v as usize);
        set.max_length = obj
            .get("maxLength")
            .and_then(Value::as_u64)
            .map(|v| v as usize);
        set.minimum = obj.get("minimum").and_then(Value::as_f64);
        set.maximum = obj.get("maximum").and_then(Value::as_f64);
        set.pattern = obj.get("pattern").and_then(Value::as_str).map(String::from);
        set.enum_values = obj.get("enum").and_then(Value::as_array).cloned();
        set.multiple_of = obj.get("multipleOf").and_then(Value::as_i64);
        set.items = obj
            .get("items")
            .map(|items| Box::new(ConstraintSet::from_schema(items)));
        set.min_items = obj
            .get("minItems")
            .and_then(Value::as_u64)
            .map(|v| v as usize);
        set.max_items = obj
            .get("maxItems")
            .and_then(Value::as_u64)
            .map(|v| v as usize);
        if let Some(props) = obj.get("properties").and_then(Value::as_object) {
            set.properties = props
                .iter()
                .map(|(name, prop)| (name.clone(), ConstraintSet::from_schema(prop)))
                .collect();
        }

        set
    }

    /// True when no facet was resolved, mirroring a schema lookup miss.
    pub fn is_empty(&self) -> bool {
        self.field_type.is_none()
            && self.format.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.minimum.is_none()
            && self.maximum.is_none()
            && self.pattern.is_none()
            && self.enum_values.is_none()
            && self.multiple_of.is_none()
            && self.items.is_none()
            && self.min_items.is_none()
            && self.max_items.is_none()
            && self.properties.is_empty()
    }

    /// The declared type, defaulting to `string` when absent or unknown.
    pub fn resolved_type(&self) -> FieldType {
        self.field_type
            .as_deref()
            .map(FieldType::from_name)
            .unwrap_or(FieldType::String)
    }
}

/// One validation finding: the field path and what went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field '{}': {}", self.path, self.message)
    }
}
