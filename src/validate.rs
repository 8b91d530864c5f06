//! Validation descent and structured violation reports
//!
//! [`Schema::validate`] walks the schema tree in lock-step with the
//! document tree and collects every violation as a [`ValidationError`].
//! Validation never raises and never short-circuits across siblings; the
//! only pruning is that a node whose kind mismatches skips its remaining
//! constraints, since those are undefined for the wrong kind.
//!
//! Error order is the depth-first document traversal order: required and
//! undeclared-property reports first at each object, then properties in
//! schema-declaration order, array items in index order. The same
//! schema/document pair always yields the same error list.

use serde::Serialize;
use serde_json::{json, Value};

use crate::schema::{Schema, SchemaKind, SchemaNode};

/// One step from the document root: a property name or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a violation, as segments from the document root.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct DocumentPath(Vec<PathSegment>);

impl DocumentPath {
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<PathSegment>> for DocumentPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl std::fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "$")?;
        for segment in &self.0 {
            match segment {
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// The constraint a violation names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConstraintKind {
    Required,
    AdditionalProperties,
    Type,
    MinLength,
    MaxLength,
    Format,
    Minimum,
    Maximum,
    MinItems,
    MaxItems,
}

impl ConstraintKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintKind::Required => "required",
            ConstraintKind::AdditionalProperties => "additionalProperties",
            ConstraintKind::Type => "type",
            ConstraintKind::MinLength => "minLength",
            ConstraintKind::MaxLength => "maxLength",
            ConstraintKind::Format => "format",
            ConstraintKind::Minimum => "minimum",
            ConstraintKind::Maximum => "maximum",
            ConstraintKind::MinItems => "minItems",
            ConstraintKind::MaxItems => "maxItems",
        }
    }
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single structural violation.
///
/// Returned as data, never raised; serializable so callers can render
/// reports in whatever shape they need.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// Property names / array indices from the document root.
    pub path: DocumentPath,
    /// The violated constraint.
    pub kind: ConstraintKind,
    /// Human-readable description.
    pub message: String,
    /// The constraint value that was not met.
    pub expected: Value,
    /// The observed value (or count, for item-count constraints).
    pub actual: Value,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl Schema {
    /// Validate a document against this schema.
    ///
    /// Returns every violation in document traversal order; an empty
    /// list means the document is valid.
    pub fn validate(&self, document: &Value) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut path = Vec::new();
        check_node(&self.root, document, &mut path, &mut errors);
        errors
    }
}

fn check_node(
    node: &SchemaNode,
    value: &Value,
    path: &mut Vec<PathSegment>,
    errors: &mut Vec<ValidationError>,
) {
    if !node.kind().matches(value) {
        errors.push(ValidationError {
            path: path.clone().into(),
            kind: ConstraintKind::Type,
            message: format!(
                "expected {}, got {}",
                node.kind(),
                SchemaKind::of_value(value)
            ),
            expected: json!(node.kind().name()),
            actual: value.clone(),
        });
        // Remaining constraints are undefined for the wrong kind.
        return;
    }

    match node.kind() {
        SchemaKind::Object => check_object(node, value, path, errors),
        SchemaKind::Array => check_array(node, value, path, errors),
        SchemaKind::String => check_string(node, value, path, errors),
        SchemaKind::Integer | SchemaKind::Number => check_numeric(node, value, path, errors),
        SchemaKind::Boolean | SchemaKind::Null | SchemaKind::Any => {}
    }
}

fn check_object(
    node: &SchemaNode,
    value: &Value,
    path: &mut Vec<PathSegment>,
    errors: &mut Vec<ValidationError>,
) {
    let Some(object) = value.as_object() else {
        return;
    };

    for name in &node.required {
        if !object.contains_key(name) {
            let mut error_path = path.clone();
            error_path.push(PathSegment::Key(name.clone()));
            errors.push(ValidationError {
                path: error_path.into(),
                kind: ConstraintKind::Required,
                message: format!("required property '{name}' is missing"),
                expected: json!(name),
                actual: Value::Null,
            });
        }
    }

    if !node.additional_properties {
        for key in object.keys() {
            if !node.properties.contains_key(key) {
                let mut error_path = path.clone();
                error_path.push(PathSegment::Key(key.clone()));
                errors.push(ValidationError {
                    path: error_path.into(),
                    kind: ConstraintKind::AdditionalProperties,
                    message: format!("property '{key}' is not declared in the schema"),
                    expected: json!(false),
                    actual: json!(key),
                });
            }
        }
    }

    for (name, child) in &node.properties {
        if let Some(property_value) = object.get(name) {
            path.push(PathSegment::Key(name.clone()));
            check_node(child, property_value, path, errors);
            path.pop();
        }
    }
}

fn check_array(
    node: &SchemaNode,
    value: &Value,
    path: &mut Vec<PathSegment>,
    errors: &mut Vec<ValidationError>,
) {
    let Some(items) = value.as_array() else {
        return;
    };

    if let Some(min) = node.min_items {
        if items.len() < min {
            errors.push(ValidationError {
                path: path.clone().into(),
                kind: ConstraintKind::MinItems,
                message: format!("array has {} items, fewer than minItems {min}", items.len()),
                expected: json!(min),
                actual: json!(items.len()),
            });
        }
    }
    if let Some(max) = node.max_items {
        if items.len() > max {
            errors.push(ValidationError {
                path: path.clone().into(),
                kind: ConstraintKind::MaxItems,
                message: format!("array has {} items, more than maxItems {max}", items.len()),
                expected: json!(max),
                actual: json!(items.len()),
            });
        }
    }

    if let Some(item_schema) = &node.items {
        for (index, item) in items.iter().enumerate() {
            path.push(PathSegment::Index(index));
            check_node(item_schema, item, path, errors);
            path.pop();
        }
    }
}

fn check_string(
    node: &SchemaNode,
    value: &Value,
    path: &mut Vec<PathSegment>,
    errors: &mut Vec<ValidationError>,
) {
    let Some(s) = value.as_str() else {
        return;
    };
    // Length in characters, not bytes.
    let length = s.chars().count();

    if let Some(min) = node.min_length {
        if length < min {
            errors.push(ValidationError {
                path: path.clone().into(),
                kind: ConstraintKind::MinLength,
                message: format!("string length {length} is less than minLength {min}"),
                expected: json!(min),
                actual: value.clone(),
            });
        }
    }
    if let Some(max) = node.max_length {
        if length > max {
            errors.push(ValidationError {
                path: path.clone().into(),
                kind: ConstraintKind::MaxLength,
                message: format!("string length {length} is greater than maxLength {max}"),
                expected: json!(max),
                actual: value.clone(),
            });
        }
    }
    if let Some(format) = node.format {
        if !format.check(s) {
            errors.push(ValidationError {
                path: path.clone().into(),
                kind: ConstraintKind::Format,
                message: format!("'{s}' does not match format '{format}'"),
                expected: json!(format.name()),
                actual: value.clone(),
            });
        }
    }
}

fn check_numeric(
    node: &SchemaNode,
    value: &Value,
    path: &mut Vec<PathSegment>,
    errors: &mut Vec<ValidationError>,
) {
    let Some(observed) = value.as_f64() else {
        return;
    };

    if let Some(min) = &node.minimum {
        let bound = min.as_f64().unwrap_or(f64::NEG_INFINITY);
        if observed < bound {
            errors.push(ValidationError {
                path: path.clone().into(),
                kind: ConstraintKind::Minimum,
                message: format!("value {value} is less than minimum {min}"),
                expected: Value::Number(min.clone()),
                actual: value.clone(),
            });
        }
    }
    if let Some(max) = &node.maximum {
        let bound = max.as_f64().unwrap_or(f64::INFINITY);
        if observed > bound {
            errors.push(ValidationError {
                path: path.clone().into(),
                kind: ConstraintKind::Maximum,
                message: format!("value {value} is greater than maximum {max}"),
                expected: Value::Number(max.clone()),
                actual: value.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Format;
    use serde_json::json;

    fn user_schema() -> Schema {
        Schema::new(
            SchemaNode::object()
                .property(
                    "username",
                    SchemaNode::string().min_length(3).max_length(20),
                )
                .property("email", SchemaNode::string().format(Format::Email))
                .property("age", SchemaNode::integer().minimum(0).maximum(150))
                .required(["username", "email"])
                .additional_properties(false),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_document_is_clean() {
        let doc = json!({"username": "alice", "email": "alice@example.com", "age": 30});
        assert!(user_schema().validate(&doc).is_empty());
    }

    #[test]
    fn test_type_error_skips_leaf_constraints() {
        // A non-string username must yield one type error, not a type
        // error plus undefined length/format reports.
        let doc = json!({"username": 7, "email": "alice@example.com"});
        let errors = user_schema().validate(&doc);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ConstraintKind::Type);
        assert_eq!(errors[0].path.segments(), &[PathSegment::Key("username".into())]);
    }

    #[test]
    fn test_integer_kind_rejects_float() {
        let doc = json!({"username": "alice", "email": "alice@example.com", "age": 30.5});
        let errors = user_schema().validate(&doc);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ConstraintKind::Type);
    }

    #[test]
    fn test_number_kind_accepts_integer() {
        let schema = Schema::new(SchemaNode::number().minimum(0)).unwrap();
        assert!(schema.validate(&json!(42)).is_empty());
        assert!(schema.validate(&json!(42.5)).is_empty());
    }

    #[test]
    fn test_multiple_leaf_violations_all_report() {
        // One value can violate several independent constraints at once.
        let schema = Schema::new(
            SchemaNode::string()
                .min_length(10)
                .format(Format::Email),
        )
        .unwrap();
        let errors = schema.validate(&json!("short"));
        let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![ConstraintKind::MinLength, ConstraintKind::Format]
        );
    }

    #[test]
    fn test_error_order_is_document_traversal_order() {
        let schema = Schema::new(
            SchemaNode::object()
                .property("a", SchemaNode::string().min_length(3))
                .property("b", SchemaNode::integer().minimum(10))
                .property(
                    "c",
                    SchemaNode::array().items(SchemaNode::integer().maximum(5)),
                )
                .required(["missing"]),
        )
        .unwrap();

        let doc = json!({"a": "x", "b": 1, "c": [1, 9, 2, 7]});
        let errors = schema.validate(&doc);
        let rendered: Vec<_> = errors
            .iter()
            .map(|e| (e.path.to_string(), e.kind))
            .collect();
        assert_eq!(
            rendered,
            vec![
                ("$.missing".to_string(), ConstraintKind::Required),
                ("$.a".to_string(), ConstraintKind::MinLength),
                ("$.b".to_string(), ConstraintKind::Minimum),
                ("$.c[1]".to_string(), ConstraintKind::Maximum),
                ("$.c[3]".to_string(), ConstraintKind::Maximum),
            ]
        );
    }

    #[test]
    fn test_additional_properties_reported_per_key() {
        let doc = json!({
            "username": "alice",
            "email": "alice@example.com",
            "admin": true,
            "debug": 1
        });
        let errors = user_schema().validate(&doc);
        let paths: Vec<_> = errors.iter().map(|e| e.path.to_string()).collect();
        assert_eq!(paths, vec!["$.admin", "$.debug"]);
        assert!(errors
            .iter()
            .all(|e| e.kind == ConstraintKind::AdditionalProperties));
    }

    #[test]
    fn test_array_bounds_and_items_are_independent() {
        let schema = Schema::new(
            SchemaNode::array()
                .items(SchemaNode::string().min_length(1))
                .min_items(1)
                .max_items(3),
        )
        .unwrap();

        let errors = schema.validate(&json!(["ok", "", "ok", ""]));
        let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ConstraintKind::MaxItems,
                ConstraintKind::MinLength,
                ConstraintKind::MinLength,
            ]
        );
    }

    #[test]
    fn test_root_type_mismatch() {
        let errors = user_schema().validate(&json!([1, 2, 3]));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ConstraintKind::Type);
        assert!(errors[0].path.is_root());
    }

    #[test]
    fn test_any_kind_matches_everything() {
        let schema = Schema::new(SchemaNode::any()).unwrap();
        for doc in [json!(null), json!(true), json!(3.5), json!("s"), json!([]), json!({})] {
            assert!(schema.validate(&doc).is_empty());
        }
    }

    #[test]
    fn test_error_serializes_with_wire_names() {
        let errors = user_schema().validate(&json!({"username": "alice"}));
        assert_eq!(errors.len(), 1);
        let rendered = serde_json::to_value(&errors[0]).unwrap();
        assert_eq!(rendered["kind"], json!("required"));
        assert_eq!(rendered["path"], json!(["email"]));
    }

    #[test]
    fn test_validation_is_deterministic() {
        let doc = json!({"username": "al", "age": 200, "extra": null});
        let schema = user_schema();
        assert_eq!(schema.validate(&doc), schema.validate(&doc));
    }
}
