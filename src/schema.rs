//! Schema types and construction
//!
//! A [`Schema`] is a tree of constraint nodes checked against untyped
//! document trees (`serde_json::Value`). Schemas are built either with
//! the [`SchemaNode`] builder API or loaded from a JSON Schema-flavoured
//! description via [`Schema::parse`] / [`Schema::from_value`].
//!
//! Malformed schemas are rejected here, at construction time. A schema
//! that constructs successfully never raises during validation; it only
//! reports violations as data.

use indexmap::IndexMap;
use serde_json::{Number, Value};

use crate::error::{Result, SchemaError};
use crate::format::Format;

/// The kind of value a schema node constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Object,
    Array,
    String,
    Integer,
    Number,
    Boolean,
    Null,
    /// Matches every value; carries no constraints.
    Any,
}

impl SchemaKind {
    /// Look up a kind by its schema name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "object" => Some(SchemaKind::Object),
            "array" => Some(SchemaKind::Array),
            "string" => Some(SchemaKind::String),
            "integer" => Some(SchemaKind::Integer),
            "number" => Some(SchemaKind::Number),
            "boolean" => Some(SchemaKind::Boolean),
            "null" => Some(SchemaKind::Null),
            "any" => Some(SchemaKind::Any),
            _ => None,
        }
    }

    /// The schema name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            SchemaKind::Object => "object",
            SchemaKind::Array => "array",
            SchemaKind::String => "string",
            SchemaKind::Integer => "integer",
            SchemaKind::Number => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Null => "null",
            SchemaKind::Any => "any",
        }
    }

    /// Whether a document value is of this kind.
    ///
    /// `integer` accepts only whole JSON numbers; `number` accepts both
    /// integers and floats.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            SchemaKind::Object => value.is_object(),
            SchemaKind::Array => value.is_array(),
            SchemaKind::String => value.is_string(),
            SchemaKind::Integer => value.is_i64() || value.is_u64(),
            SchemaKind::Number => value.is_number(),
            SchemaKind::Boolean => value.is_boolean(),
            SchemaKind::Null => value.is_null(),
            SchemaKind::Any => true,
        }
    }

    /// The kind name describing a document value, for "type" errors.
    pub fn of_value(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(n) if n.is_f64() => "number",
            Value::Number(_) => "integer",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single constraint node in a schema tree.
///
/// Constructed through the per-kind builder methods; constraint validity
/// is enforced when the tree is sealed into a [`Schema`].
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    pub(crate) kind: SchemaKind,
    // string
    pub(crate) min_length: Option<usize>,
    pub(crate) max_length: Option<usize>,
    pub(crate) format: Option<Format>,
    // integer / number, inclusive bounds
    pub(crate) minimum: Option<Number>,
    pub(crate) maximum: Option<Number>,
    // object
    pub(crate) required: Vec<String>,
    pub(crate) properties: IndexMap<String, SchemaNode>,
    pub(crate) additional_properties: bool,
    // array
    pub(crate) items: Option<Box<SchemaNode>>,
    pub(crate) min_items: Option<usize>,
    pub(crate) max_items: Option<usize>,
}

impl SchemaNode {
    fn with_kind(kind: SchemaKind) -> Self {
        Self {
            kind,
            min_length: None,
            max_length: None,
            format: None,
            minimum: None,
            maximum: None,
            required: Vec::new(),
            properties: IndexMap::new(),
            additional_properties: true,
            items: None,
            min_items: None,
            max_items: None,
        }
    }

    pub fn object() -> Self {
        Self::with_kind(SchemaKind::Object)
    }

    pub fn array() -> Self {
        Self::with_kind(SchemaKind::Array)
    }

    pub fn string() -> Self {
        Self::with_kind(SchemaKind::String)
    }

    pub fn integer() -> Self {
        Self::with_kind(SchemaKind::Integer)
    }

    pub fn number() -> Self {
        Self::with_kind(SchemaKind::Number)
    }

    pub fn boolean() -> Self {
        Self::with_kind(SchemaKind::Boolean)
    }

    pub fn null() -> Self {
        Self::with_kind(SchemaKind::Null)
    }

    pub fn any() -> Self {
        Self::with_kind(SchemaKind::Any)
    }

    /// The kind this node constrains.
    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Inclusive lower bound for integer/number nodes.
    pub fn minimum(mut self, n: impl Into<Number>) -> Self {
        self.minimum = Some(n.into());
        self
    }

    /// Inclusive upper bound for integer/number nodes.
    pub fn maximum(mut self, n: impl Into<Number>) -> Self {
        self.maximum = Some(n.into());
        self
    }

    /// Declare a named child schema. Declaration order is preserved and
    /// drives validation error ordering.
    pub fn property(mut self, name: impl Into<String>, node: SchemaNode) -> Self {
        self.properties.insert(name.into(), node);
        self
    }

    /// Mark property names as required.
    pub fn required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.extend(names.into_iter().map(Into::into));
        self
    }

    /// Allow or deny document keys absent from the declared property set.
    pub fn additional_properties(mut self, allowed: bool) -> Self {
        self.additional_properties = allowed;
        self
    }

    /// Schema applied to every array element.
    pub fn items(mut self, node: SchemaNode) -> Self {
        self.items = Some(Box::new(node));
        self
    }

    pub fn min_items(mut self, n: usize) -> Self {
        self.min_items = Some(n);
        self
    }

    pub fn max_items(mut self, n: usize) -> Self {
        self.max_items = Some(n);
        self
    }

    /// Check that every constraint on this node (and its children) is
    /// valid for the node's kind and internally consistent.
    fn check(&self) -> Result<()> {
        let kind = self.kind;

        if self.min_length.is_some() {
            require_kind(kind, &[SchemaKind::String], "minLength")?;
        }
        if self.max_length.is_some() {
            require_kind(kind, &[SchemaKind::String], "maxLength")?;
        }
        if self.format.is_some() {
            require_kind(kind, &[SchemaKind::String], "format")?;
        }
        if self.minimum.is_some() {
            require_kind(kind, &[SchemaKind::Integer, SchemaKind::Number], "minimum")?;
        }
        if self.maximum.is_some() {
            require_kind(kind, &[SchemaKind::Integer, SchemaKind::Number], "maximum")?;
        }
        if !self.required.is_empty() {
            require_kind(kind, &[SchemaKind::Object], "required")?;
        }
        if !self.properties.is_empty() {
            require_kind(kind, &[SchemaKind::Object], "properties")?;
        }
        if !self.additional_properties {
            require_kind(kind, &[SchemaKind::Object], "additionalProperties")?;
        }
        if self.items.is_some() {
            require_kind(kind, &[SchemaKind::Array], "items")?;
        }
        if self.min_items.is_some() {
            require_kind(kind, &[SchemaKind::Array], "minItems")?;
        }
        if self.max_items.is_some() {
            require_kind(kind, &[SchemaKind::Array], "maxItems")?;
        }

        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(contradictory("minLength", min, max));
            }
        }
        if let (Some(min), Some(max)) = (self.min_items, self.max_items) {
            if min > max {
                return Err(contradictory("minItems", min, max));
            }
        }
        if let (Some(min), Some(max)) = (&self.minimum, &self.maximum) {
            let lo = min.as_f64().unwrap_or(f64::NEG_INFINITY);
            let hi = max.as_f64().unwrap_or(f64::INFINITY);
            if lo > hi {
                return Err(SchemaError::ContradictoryBounds {
                    constraint: "minimum".to_string(),
                    min: min.to_string(),
                    max: max.to_string(),
                });
            }
        }

        // A required name outside the declared set can never be satisfied
        // once additional properties are denied.
        if !self.additional_properties {
            for name in &self.required {
                if !self.properties.contains_key(name) {
                    return Err(SchemaError::UnsatisfiableRequired(name.clone()));
                }
            }
        }

        for child in self.properties.values() {
            child.check()?;
        }
        if let Some(items) = &self.items {
            items.check()?;
        }

        Ok(())
    }
}

fn require_kind(kind: SchemaKind, allowed: &[SchemaKind], constraint: &str) -> Result<()> {
    if allowed.contains(&kind) {
        Ok(())
    } else {
        Err(SchemaError::ConstraintKindMismatch {
            constraint: constraint.to_string(),
            kind: kind.name().to_string(),
        })
    }
}

fn contradictory(constraint: &str, min: usize, max: usize) -> SchemaError {
    SchemaError::ContradictoryBounds {
        constraint: constraint.to_string(),
        min: min.to_string(),
        max: max.to_string(),
    }
}

/// A sealed, construction-checked schema tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub(crate) root: SchemaNode,
}

impl Schema {
    /// Seal a built node tree into a schema, rejecting malformed trees.
    pub fn new(root: SchemaNode) -> Result<Self> {
        root.check()?;
        Ok(Self { root })
    }

    /// Load a schema from a JSON Schema-flavoured description.
    ///
    /// Supported keywords: `type`, `properties`, `required`,
    /// `additionalProperties`, `items`, `minItems`, `maxItems`,
    /// `minLength`, `maxLength`, `minimum`, `maximum`, `format`.
    /// A node without `type` matches any value. Unsupported keywords are
    /// ignored.
    pub fn from_value(value: &Value) -> Result<Self> {
        let root = node_from_value(value)?;
        tracing::debug!(kind = root.kind.name(), "loaded schema root");
        Self::new(root)
    }

    /// Load a schema from JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// The root constraint node.
    pub fn root(&self) -> &SchemaNode {
        &self.root
    }
}

fn node_from_value(value: &Value) -> Result<SchemaNode> {
    let obj = value.as_object().ok_or_else(|| {
        SchemaError::InvalidStructure(format!(
            "schema node must be an object, got {}",
            SchemaKind::of_value(value)
        ))
    })?;

    let kind = match obj.get("type") {
        None => SchemaKind::Any,
        Some(Value::String(name)) => {
            SchemaKind::from_name(name).ok_or_else(|| SchemaError::UnknownKind(name.clone()))?
        }
        Some(other) => {
            return Err(SchemaError::InvalidStructure(format!(
                "'type' must be a string, got {}",
                SchemaKind::of_value(other)
            )))
        }
    };

    let mut node = SchemaNode::with_kind(kind);

    for (keyword, val) in obj {
        match keyword.as_str() {
            "type" => {}
            "minLength" => node.min_length = Some(usize_keyword(keyword, val)?),
            "maxLength" => node.max_length = Some(usize_keyword(keyword, val)?),
            "minItems" => node.min_items = Some(usize_keyword(keyword, val)?),
            "maxItems" => node.max_items = Some(usize_keyword(keyword, val)?),
            "minimum" => node.minimum = Some(number_keyword(keyword, val)?),
            "maximum" => node.maximum = Some(number_keyword(keyword, val)?),
            "format" => {
                let name = val.as_str().ok_or_else(|| {
                    SchemaError::InvalidStructure("'format' must be a string".to_string())
                })?;
                node.format =
                    Some(Format::from_name(name).ok_or_else(|| {
                        SchemaError::UnknownFormat(name.to_string())
                    })?);
            }
            "required" => {
                let names = val.as_array().ok_or_else(|| {
                    SchemaError::InvalidStructure("'required' must be an array".to_string())
                })?;
                for name in names {
                    let name = name.as_str().ok_or_else(|| {
                        SchemaError::InvalidStructure(
                            "'required' entries must be strings".to_string(),
                        )
                    })?;
                    node.required.push(name.to_string());
                }
            }
            "properties" => {
                let props = val.as_object().ok_or_else(|| {
                    SchemaError::InvalidStructure("'properties' must be an object".to_string())
                })?;
                for (name, sub) in props {
                    node.properties.insert(name.clone(), node_from_value(sub)?);
                }
            }
            "additionalProperties" => {
                node.additional_properties = val.as_bool().ok_or_else(|| {
                    SchemaError::InvalidStructure(
                        "'additionalProperties' must be a boolean".to_string(),
                    )
                })?;
            }
            "items" => node.items = Some(Box::new(node_from_value(val)?)),
            other => {
                tracing::trace!(keyword = other, "ignoring unsupported schema keyword");
            }
        }
    }

    Ok(node)
}

fn usize_keyword(keyword: &str, value: &Value) -> Result<usize> {
    value
        .as_u64()
        .map(|n| n as usize)
        .ok_or_else(|| {
            SchemaError::InvalidStructure(format!("'{keyword}' must be a non-negative integer"))
        })
}

fn number_keyword(keyword: &str, value: &Value) -> Result<Number> {
    match value {
        Value::Number(n) => Ok(n.clone()),
        _ => Err(SchemaError::InvalidStructure(format!(
            "'{keyword}' must be a number"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_round_trip_matches_loader() {
        let built = Schema::new(
            SchemaNode::object()
                .property(
                    "username",
                    SchemaNode::string().min_length(3).max_length(20),
                )
                .property("email", SchemaNode::string().format(Format::Email))
                .required(["username", "email"])
                .additional_properties(false),
        )
        .unwrap();

        let loaded = Schema::from_value(&json!({
            "type": "object",
            "properties": {
                "username": {"type": "string", "minLength": 3, "maxLength": 20},
                "email": {"type": "string", "format": "email"}
            },
            "required": ["username", "email"],
            "additionalProperties": false
        }))
        .unwrap();

        assert_eq!(built, loaded);
    }

    #[test]
    fn test_contradictory_numeric_bounds_rejected() {
        let err = Schema::new(SchemaNode::integer().minimum(10).maximum(5)).unwrap_err();
        assert!(matches!(err, SchemaError::ContradictoryBounds { .. }));
    }

    #[test]
    fn test_contradictory_length_bounds_rejected() {
        let err = Schema::new(SchemaNode::string().min_length(8).max_length(3)).unwrap_err();
        assert!(matches!(err, SchemaError::ContradictoryBounds { .. }));
    }

    #[test]
    fn test_constraint_on_wrong_kind_rejected() {
        let err = Schema::new(SchemaNode::integer().min_length(3)).unwrap_err();
        assert!(matches!(err, SchemaError::ConstraintKindMismatch { .. }));
    }

    #[test]
    fn test_wrong_kind_rejected_in_nested_node() {
        let err = Schema::new(
            SchemaNode::object().property("age", SchemaNode::boolean().maximum(150)),
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::ConstraintKindMismatch { .. }));
    }

    #[test]
    fn test_unsatisfiable_required_rejected() {
        let err = Schema::new(
            SchemaNode::object()
                .property("username", SchemaNode::string())
                .required(["username", "email"])
                .additional_properties(false),
        )
        .unwrap_err();
        match err {
            SchemaError::UnsatisfiableRequired(name) => assert_eq!(name, "email"),
            other => panic!("expected UnsatisfiableRequired, got {other:?}"),
        }
    }

    #[test]
    fn test_required_outside_properties_allowed_when_open() {
        // With additional properties allowed the document can still
        // satisfy the requirement, so this schema is well-formed.
        assert!(Schema::new(
            SchemaNode::object()
                .property("username", SchemaNode::string())
                .required(["username", "email"]),
        )
        .is_ok());
    }

    #[test]
    fn test_unknown_kind_and_format_rejected() {
        assert!(matches!(
            Schema::from_value(&json!({"type": "tuple"})).unwrap_err(),
            SchemaError::UnknownKind(_)
        ));
        assert!(matches!(
            Schema::from_value(&json!({"type": "string", "format": "phone"})).unwrap_err(),
            SchemaError::UnknownFormat(_)
        ));
    }

    #[test]
    fn test_missing_type_means_any() {
        let schema = Schema::from_value(&json!({})).unwrap();
        assert_eq!(schema.root().kind(), SchemaKind::Any);
    }

    #[test]
    fn test_unsupported_keywords_ignored() {
        let schema = Schema::from_value(&json!({
            "type": "string",
            "minLength": 1,
            "$comment": "not part of the supported subset"
        }))
        .unwrap();
        assert_eq!(schema.root().min_length, Some(1));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        assert!(matches!(
            Schema::parse("{not json").unwrap_err(),
            SchemaError::Json(_)
        ));
    }
}
