//! Declarative shape descriptions for structured values.
//!
//! A [`Shape`] describes the expected fields and types of a JSON value:
//! a closed set of node variants (string, number, boolean, array, object)
//! plus a union node and a tolerant catch-all. Shapes are owned by the
//! caller and only ever read by the engine.
//!
//! The two consumers of a shape are the describers in [`describe`] (which
//! render it into prompt text) and the validator in [`validate`] (which
//! checks a backend reply against it).

pub mod describe;
pub mod validate;

pub use describe::{skeleton, type_signature};
pub use validate::{validate, PathSegment, Violation};

use serde::{Deserialize, Serialize};

/// A named field of an object shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name as it appears in the JSON object.
    pub name: String,
    /// Shape of the field's value.
    pub shape: Shape,
}

impl Field {
    /// Create a field with the given name and shape.
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }
}

/// Shape of a structured value.
///
/// The variant set is closed: anything a caller can declare is one of
/// these nodes. [`Shape::Any`] is the tolerant branch for values the
/// engine should not constrain; the describers skip it and the validator
/// accepts everything for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// A JSON string.
    String,
    /// A JSON number.
    Number,
    /// A JSON boolean.
    Boolean,
    /// A JSON array with uniformly shaped items.
    Array(Box<Shape>),
    /// A JSON object with named, ordered fields.
    Object(Vec<Field>),
    /// A value matching any one of the given shapes.
    OneOf(Vec<Shape>),
    /// Any value at all. Skipped by the describers, always valid.
    Any,
}

impl Shape {
    /// Convenience constructor for an object shape.
    pub fn object(fields: Vec<Field>) -> Self {
        Shape::Object(fields)
    }

    /// Convenience constructor for an array shape.
    pub fn array(items: Shape) -> Self {
        Shape::Array(Box::new(items))
    }

    /// Convenience constructor for a union shape.
    pub fn one_of(branches: Vec<Shape>) -> Self {
        Shape::OneOf(branches)
    }

    /// The kind of value this shape expects, for diagnostics.
    pub fn expected_kind(&self) -> ValueKind {
        match self {
            Shape::String => ValueKind::String,
            Shape::Number => ValueKind::Number,
            Shape::Boolean => ValueKind::Boolean,
            Shape::Array(_) => ValueKind::Array,
            Shape::Object(_) => ValueKind::Object,
            // A union has no single kind; report the first branch's.
            Shape::OneOf(branches) => branches
                .first()
                .map(Shape::expected_kind)
                .unwrap_or(ValueKind::Object),
            Shape::Any => ValueKind::Object,
        }
    }
}

/// Kind of a JSON value, as named in validation diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
    /// A required field that was absent from its parent object.
    Missing,
}

impl ValueKind {
    /// Classify a JSON value.
    pub fn of(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ValueKind::Null,
            serde_json::Value::Bool(_) => ValueKind::Boolean,
            serde_json::Value::Number(_) => ValueKind::Number,
            serde_json::Value::String(_) => ValueKind::String,
            serde_json::Value::Array(_) => ValueKind::Array,
            serde_json::Value::Object(_) => ValueKind::Object,
        }
    }

    /// Diagnostic name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
            ValueKind::Missing => "missing",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_kind_classification() {
        assert_eq!(ValueKind::of(&json!(null)), ValueKind::Null);
        assert_eq!(ValueKind::of(&json!(true)), ValueKind::Boolean);
        assert_eq!(ValueKind::of(&json!(3)), ValueKind::Number);
        assert_eq!(ValueKind::of(&json!("s")), ValueKind::String);
        assert_eq!(ValueKind::of(&json!([1])), ValueKind::Array);
        assert_eq!(ValueKind::of(&json!({})), ValueKind::Object);
    }

    #[test]
    fn test_expected_kind() {
        assert_eq!(Shape::String.expected_kind(), ValueKind::String);
        assert_eq!(
            Shape::array(Shape::Number).expected_kind(),
            ValueKind::Array
        );
        let union = Shape::one_of(vec![Shape::Number, Shape::String]);
        assert_eq!(union.expected_kind(), ValueKind::Number);
    }
}
