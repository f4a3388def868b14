//! Textual renderings of a [`Shape`] for embedding in prompts.
//!
//! Two renderings are provided: [`skeleton`] produces a representative
//! example value with every primitive replaced by its zero-value, and
//! [`type_signature`] produces a compact type-like description. Both are
//! deterministic and side-effect-free; a malformed shape is a programming
//! error, not a runtime fault, so neither can fail.

use serde_json::{json, Map, Value};

use super::{Field, Shape};

/// Render a shape as a representative example value.
///
/// Primitives become their zero-values: empty string, zero, `true`,
/// empty array. Objects recurse over their fields. For a union the first
/// branch stands in for the whole. Fields of kind [`Shape::Any`] are
/// skipped silently (documented limitation, not an error).
pub fn skeleton(shape: &Shape) -> Value {
    match shape {
        Shape::String => json!(""),
        Shape::Number => json!(0),
        Shape::Boolean => json!(true),
        Shape::Array(_) => json!([]),
        Shape::Object(fields) => {
            let mut map = Map::new();
            for field in fields {
                if matches!(field.shape, Shape::Any) {
                    continue;
                }
                map.insert(field.name.clone(), skeleton(&field.shape));
            }
            Value::Object(map)
        }
        Shape::OneOf(branches) => branches.first().map(skeleton).unwrap_or(Value::Null),
        Shape::Any => Value::Null,
    }
}

/// Render a shape as a compact structural type description.
///
/// Objects list their fields in declaration order, unions join their
/// branches with `|`, and [`Shape::Any`] fields are skipped.
pub fn type_signature(shape: &Shape) -> String {
    match shape {
        Shape::String => "string".to_string(),
        Shape::Number => "number".to_string(),
        Shape::Boolean => "boolean".to_string(),
        Shape::Array(items) => format!("{}[]", type_signature(items)),
        Shape::Object(fields) => {
            let rendered: Vec<String> = fields
                .iter()
                .filter(|f| !matches!(f.shape, Shape::Any))
                .map(|f| format!("{}: {}", f.name, type_signature(&f.shape)))
                .collect();
            format!("{{ {} }}", rendered.join(", "))
        }
        Shape::OneOf(branches) => branches
            .iter()
            .map(type_signature)
            .collect::<Vec<_>>()
            .join(" | "),
        Shape::Any => "any".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person_shape() -> Shape {
        Shape::object(vec![
            Field::new("name", Shape::String),
            Field::new("age", Shape::Number),
        ])
    }

    #[test]
    fn test_skeleton_zero_values() {
        let shape = Shape::object(vec![
            Field::new("title", Shape::String),
            Field::new("count", Shape::Number),
            Field::new("active", Shape::Boolean),
            Field::new("tags", Shape::array(Shape::String)),
        ]);
        let value = skeleton(&shape);
        assert_eq!(
            value,
            json!({"title": "", "count": 0, "active": true, "tags": []})
        );
    }

    #[test]
    fn test_skeleton_nested_object() {
        let shape = Shape::object(vec![Field::new("person", person_shape())]);
        assert_eq!(
            skeleton(&shape),
            json!({"person": {"name": "", "age": 0}})
        );
    }

    #[test]
    fn test_skeleton_skips_any_fields() {
        let shape = Shape::object(vec![
            Field::new("known", Shape::String),
            Field::new("opaque", Shape::Any),
        ]);
        assert_eq!(skeleton(&shape), json!({"known": ""}));
    }

    #[test]
    fn test_skeleton_union_uses_first_branch() {
        let shape = Shape::one_of(vec![Shape::Number, Shape::String]);
        assert_eq!(skeleton(&shape), json!(0));
    }

    #[test]
    fn test_type_signature() {
        assert_eq!(
            type_signature(&person_shape()),
            "{ name: string, age: number }"
        );
        assert_eq!(type_signature(&Shape::array(Shape::Number)), "number[]");
        assert_eq!(
            type_signature(&Shape::one_of(vec![Shape::Number, Shape::String])),
            "number | string"
        );
    }

    #[test]
    fn test_describers_are_deterministic() {
        let shape = person_shape();
        assert_eq!(skeleton(&shape), skeleton(&shape));
        assert_eq!(type_signature(&shape), type_signature(&shape));
    }
}
