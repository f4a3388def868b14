//! Validation of JSON values against a declared [`Shape`].
//!
//! The validator walks value and shape together and collects every
//! mismatch as a [`Violation`] carrying the path to the offending field,
//! a human-readable message, and the expected/received kinds. Violations
//! are ordered by a depth-first traversal in field-declaration order so
//! correction prompts read top to bottom.

use serde_json::Value;

use super::{Shape, ValueKind};

/// One step of a path into a nested value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// An object key.
    Key(String),
    /// An array index.
    Index(usize),
}

/// Render a path as `profile.pets[2].name` style text. An empty path
/// renders as `$` (the whole value).
pub fn render_path(path: &[PathSegment]) -> String {
    if path.is_empty() {
        return "$".to_string();
    }
    let mut out = String::new();
    for segment in path {
        match segment {
            PathSegment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathSegment::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
        }
    }
    out
}

/// A single schema-conformance failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Path from the root of the value to the offending field.
    pub path: Vec<PathSegment>,
    /// Human-readable description of the mismatch.
    pub message: String,
    /// The kind the shape declared at this path.
    pub expected: ValueKind,
    /// The kind actually found at this path.
    pub received: ValueKind,
}

impl Violation {
    fn mismatch(path: Vec<PathSegment>, expected: ValueKind, received: ValueKind) -> Self {
        let message = match received {
            ValueKind::Missing => format!("Required field is missing, expected {}", expected),
            _ => format!("Expected {}, received {}", expected, received),
        };
        Self {
            path,
            message,
            expected,
            received,
        }
    }
}

/// Validate a value against a shape.
///
/// Returns `Ok(())` when the value conforms, otherwise the full ordered
/// list of violations. Object fields not declared in the shape are
/// ignored.
pub fn validate(value: &Value, shape: &Shape) -> Result<(), Vec<Violation>> {
    let mut violations = Vec::new();
    check(value, shape, &mut Vec::new(), &mut violations);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn check(
    value: &Value,
    shape: &Shape,
    path: &mut Vec<PathSegment>,
    violations: &mut Vec<Violation>,
) {
    match shape {
        Shape::String => {
            if !value.is_string() {
                violations.push(Violation::mismatch(
                    path.clone(),
                    ValueKind::String,
                    ValueKind::of(value),
                ));
            }
        }
        Shape::Number => {
            if !value.is_number() {
                violations.push(Violation::mismatch(
                    path.clone(),
                    ValueKind::Number,
                    ValueKind::of(value),
                ));
            }
        }
        Shape::Boolean => {
            if !value.is_boolean() {
                violations.push(Violation::mismatch(
                    path.clone(),
                    ValueKind::Boolean,
                    ValueKind::of(value),
                ));
            }
        }
        Shape::Array(items) => match value.as_array() {
            Some(elements) => {
                for (index, element) in elements.iter().enumerate() {
                    path.push(PathSegment::Index(index));
                    check(element, items, path, violations);
                    path.pop();
                }
            }
            None => violations.push(Violation::mismatch(
                path.clone(),
                ValueKind::Array,
                ValueKind::of(value),
            )),
        },
        Shape::Object(fields) => match value.as_object() {
            Some(map) => {
                for field in fields {
                    path.push(PathSegment::Key(field.name.clone()));
                    match map.get(&field.name) {
                        Some(field_value) => check(field_value, &field.shape, path, violations),
                        None => violations.push(Violation::mismatch(
                            path.clone(),
                            field.shape.expected_kind(),
                            ValueKind::Missing,
                        )),
                    }
                    path.pop();
                }
            }
            None => violations.push(Violation::mismatch(
                path.clone(),
                ValueKind::Object,
                ValueKind::of(value),
            )),
        },
        // A union matches if any branch matches. When none does, the
        // violations of every branch are flattened into the output; the
        // backend cannot disambiguate which arm was intended, so it sees
        // them all.
        Shape::OneOf(branches) => {
            let mut collected: Vec<Violation> = Vec::new();
            for branch in branches {
                let mut branch_violations = Vec::new();
                check(value, branch, path, &mut branch_violations);
                if branch_violations.is_empty() {
                    return;
                }
                collected.extend(branch_violations);
            }
            violations.extend(collected);
        }
        Shape::Any => {}
    }
}
