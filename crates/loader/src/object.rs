//! Declarative schema for record-shaped env files
//!
//! An [`ObjectSchema`] lists the fields it recognises and the constraint each
//! one must satisfy. It can be built in code or deserialized from a schema
//! description file:
//!
//! ```yaml
//! fields:
//!   name: { type: string, min_length: 1 }
//!   stage: { type: enum, values: [dev, staging, prod] }
//!   replicas: { type: integer, positive: true }
//!   region: { type: string, optional: true, default: us-east-1 }
//! unknown_fields: strip
//! ```

use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use types::{IssueKind, ValidationErrors, ROOT_FIELD};

/// What to do with input fields the schema does not declare
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFields {
    /// Drop them from the result
    #[default]
    Strip,
    /// Copy them into the result unchecked
    Passthrough,
    /// Report each one as a validation issue
    Reject,
}

/// Schema for a JSON object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectSchema {
    /// Declared fields
    #[serde(default)]
    pub fields: BTreeMap<String, FieldSchema>,
    /// Unknown field policy
    #[serde(default)]
    pub unknown_fields: UnknownFields,
}

/// Constraint on a single field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Whether the field may be absent
    #[serde(default)]
    pub optional: bool,
    /// Value inserted when an optional field is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// Type and constraints of a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
    },
    Enum {
        values: Vec<String>,
    },
    Integer {
        #[serde(default)]
        positive: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<i64>,
    },
    Number,
    Boolean,
    Object(ObjectSchema),
    Any,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field
    pub fn field(mut self, name: impl Into<String>, schema: FieldSchema) -> Self {
        self.fields.insert(name.into(), schema);
        self
    }

    pub fn unknown_fields(mut self, policy: UnknownFields) -> Self {
        self.unknown_fields = policy;
        self
    }

    /// Validate `value`, collecting an issue for every failing field.
    ///
    /// The result is a new map holding only the declared fields (plus
    /// unknown ones under [`UnknownFields::Passthrough`]).
    pub fn validate(&self, value: &Value) -> Result<Map<String, Value>, ValidationErrors> {
        let input = match value {
            Value::Object(input) => input,
            other => {
                return Err(ValidationErrors::single(
                    ROOT_FIELD,
                    IssueKind::InvalidType,
                    format!("Expected object, got {}", type_name(other)),
                ))
            }
        };

        let mut output = Map::new();
        let mut errors = ValidationErrors::new();

        for (name, field) in &self.fields {
            match input.get(name) {
                Some(value) => match field.kind.check(value) {
                    Ok(checked) => {
                        output.insert(name.clone(), checked);
                    }
                    Err(issues) => errors.merge_nested(name, issues),
                },
                None if field.optional => {
                    if let Some(default) = &field.default {
                        output.insert(name.clone(), default.clone());
                    }
                }
                None => errors.add(name.as_str(), IssueKind::Missing, "Required field is missing"),
            }
        }

        for (name, value) in input {
            if self.fields.contains_key(name) {
                continue;
            }
            match self.unknown_fields {
                UnknownFields::Strip => {}
                UnknownFields::Passthrough => {
                    output.insert(name.clone(), value.clone());
                }
                UnknownFields::Reject => {
                    errors.add(name.as_str(), IssueKind::UnknownField, "Unrecognized field")
                }
            }
        }

        errors.into_result(output)
    }
}

impl Schema for ObjectSchema {
    type Output = Map<String, Value>;

    fn parse(&self, value: Value) -> Result<Self::Output, ValidationErrors> {
        self.validate(&value)
    }
}

impl FieldSchema {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            optional: false,
            default: None,
        }
    }

    pub fn string() -> Self {
        Self::new(FieldKind::String { min_length: None })
    }

    /// String with at least one character
    pub fn non_empty_string() -> Self {
        Self::new(FieldKind::String { min_length: Some(1) })
    }

    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(FieldKind::Enum {
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    pub fn integer() -> Self {
        Self::new(FieldKind::Integer {
            positive: false,
            min: None,
            max: None,
        })
    }

    pub fn positive_integer() -> Self {
        Self::new(FieldKind::Integer {
            positive: true,
            min: None,
            max: None,
        })
    }

    pub fn number() -> Self {
        Self::new(FieldKind::Number)
    }

    pub fn boolean() -> Self {
        Self::new(FieldKind::Boolean)
    }

    pub fn object(schema: ObjectSchema) -> Self {
        Self::new(FieldKind::Object(schema))
    }

    pub fn any() -> Self {
        Self::new(FieldKind::Any)
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Optional field that falls back to `value` when absent
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.optional = true;
        self.default = Some(value.into());
        self
    }
}

impl FieldKind {
    /// Check one value. Issues are reported against [`ROOT_FIELD`] so the
    /// caller can re-root them under the field name.
    fn check(&self, value: &Value) -> Result<Value, ValidationErrors> {
        match self {
            FieldKind::String { min_length } => {
                let s = value.as_str().ok_or_else(|| invalid_type("string", value))?;
                if let Some(min) = min_length {
                    if s.chars().count() < *min {
                        return Err(invalid_value(format!(
                            "Must contain at least {} character(s)",
                            min
                        )));
                    }
                }
                Ok(value.clone())
            }
            FieldKind::Enum { values } => {
                let expected = values
                    .iter()
                    .map(|v| format!("'{}'", v))
                    .collect::<Vec<_>>()
                    .join(" | ");
                let s = value.as_str().ok_or_else(|| {
                    ValidationErrors::single(
                        ROOT_FIELD,
                        IssueKind::InvalidType,
                        format!("Expected one of {}, got {}", expected, type_name(value)),
                    )
                })?;
                if values.iter().any(|v| v == s) {
                    Ok(value.clone())
                } else {
                    Err(invalid_value(format!(
                        "Invalid enum value. Expected {}, got '{}'",
                        expected, s
                    )))
                }
            }
            FieldKind::Integer { positive, min, max } => {
                let n = match value {
                    Value::Number(n) if n.is_u64() && !n.is_i64() => {
                        return Err(invalid_value(format!("Must be at most {}", i64::MAX)));
                    }
                    Value::Number(n) => as_integer(n),
                    _ => None,
                }
                .ok_or_else(|| invalid_type("integer", value))?;
                if *positive && n <= 0 {
                    return Err(invalid_value("Must be greater than 0"));
                }
                if let Some(min) = min {
                    if n < *min {
                        return Err(invalid_value(format!("Must be at least {}", min)));
                    }
                }
                if let Some(max) = max {
                    if n > *max {
                        return Err(invalid_value(format!("Must be at most {}", max)));
                    }
                }
                Ok(Value::from(n))
            }
            FieldKind::Number => {
                if value.is_number() {
                    Ok(value.clone())
                } else {
                    Err(invalid_type("number", value))
                }
            }
            FieldKind::Boolean => {
                if value.is_boolean() {
                    Ok(value.clone())
                } else {
                    Err(invalid_type("boolean", value))
                }
            }
            FieldKind::Object(schema) => schema.validate(value).map(Value::Object),
            FieldKind::Any => Ok(value.clone()),
        }
    }
}

// Whole-valued floats such as `3.0` are accepted as integers.
fn as_integer(n: &Number) -> Option<i64> {
    const MAX_EXACT: f64 = 9_007_199_254_740_991.0;
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() <= MAX_EXACT)
            .map(|f| f as i64)
    })
}

fn invalid_type(expected: &str, got: &Value) -> ValidationErrors {
    ValidationErrors::single(
        ROOT_FIELD,
        IssueKind::InvalidType,
        format!("Expected {}, got {}", expected, type_name(got)),
    )
}

fn invalid_value(message: impl Into<String>) -> ValidationErrors {
    ValidationErrors::single(ROOT_FIELD, IssueKind::InvalidValue, message)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() || as_integer(n).is_some() => "integer",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn deployment_schema() -> ObjectSchema {
        ObjectSchema::new()
            .field("name", FieldSchema::non_empty_string())
            .field("stage", FieldSchema::one_of(["dev", "staging", "prod"]))
            .field("replicas", FieldSchema::positive_integer())
    }

    #[test]
    fn test_valid_object_is_projected() {
        let result = deployment_schema()
            .parse(json!({"name": "svc", "stage": "prod", "replicas": 3, "extra": true}))
            .unwrap();

        assert_eq!(
            Value::Object(result),
            json!({"name": "svc", "stage": "prod", "replicas": 3})
        );
    }

    #[test]
    fn test_collects_every_failing_field() {
        let errors = deployment_schema()
            .parse(json!({"name": 5, "stage": "qa", "replicas": 0}))
            .unwrap_err();

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.issue_for("name").unwrap().kind, IssueKind::InvalidType);
        assert_eq!(errors.issue_for("stage").unwrap().kind, IssueKind::InvalidValue);
        assert!(errors
            .issue_for("stage")
            .unwrap()
            .message
            .contains("'dev' | 'staging' | 'prod'"));
        assert_eq!(
            errors.issue_for("replicas").unwrap().message,
            "Must be greater than 0"
        );
    }

    #[test]
    fn test_missing_required_field() {
        let errors = deployment_schema()
            .parse(json!({"name": "svc", "stage": "dev"}))
            .unwrap_err();

        assert_eq!(errors.len(), 1);
        let issue = errors.issue_for("replicas").unwrap();
        assert_eq!(issue.kind, IssueKind::Missing);
    }

    #[test]
    fn test_null_is_not_absent() {
        let schema = ObjectSchema::new().field("region", FieldSchema::string().optional());
        let errors = schema.parse(json!({"region": null})).unwrap_err();
        assert_eq!(errors.issue_for("region").unwrap().message, "Expected string, got null");
    }

    #[test]
    fn test_optional_and_default() {
        let schema = ObjectSchema::new()
            .field("region", FieldSchema::string().with_default("us-east-1"))
            .field("owner", FieldSchema::string().optional());

        let result = schema.parse(json!({})).unwrap();
        assert_eq!(Value::Object(result), json!({"region": "us-east-1"}));
    }

    #[test]
    fn test_non_object_root() {
        let errors = deployment_schema().parse(json!([123, 34])).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.issues()[0].field, ROOT_FIELD);
        assert_eq!(errors.issues()[0].message, "Expected object, got array");
    }

    #[test]
    fn test_unknown_field_policies() {
        let input = json!({"name": "svc", "team": "infra"});
        let schema = ObjectSchema::new().field("name", FieldSchema::string());

        let stripped = schema.clone().parse(input.clone()).unwrap();
        assert!(!stripped.contains_key("team"));

        let passed = schema
            .clone()
            .unknown_fields(UnknownFields::Passthrough)
            .parse(input.clone())
            .unwrap();
        assert_eq!(passed.get("team"), Some(&json!("infra")));

        let errors = schema
            .unknown_fields(UnknownFields::Reject)
            .parse(input)
            .unwrap_err();
        assert_eq!(errors.issue_for("team").unwrap().kind, IssueKind::UnknownField);
    }

    #[test]
    fn test_integer_bounds_and_floats() {
        let schema = ObjectSchema::new().field(
            "port",
            FieldSchema::new(FieldKind::Integer {
                positive: false,
                min: Some(1024),
                max: Some(65535),
            }),
        );

        let result = schema.parse(json!({"port": 8080.0})).unwrap();
        assert_eq!(result.get("port"), Some(&json!(8080)));

        let errors = schema.parse(json!({"port": 80})).unwrap_err();
        assert_eq!(errors.issue_for("port").unwrap().message, "Must be at least 1024");

        let errors = schema.parse(json!({"port": 80.5})).unwrap_err();
        assert_eq!(
            errors.issue_for("port").unwrap().message,
            "Expected integer, got float"
        );
    }

    #[test]
    fn test_integer_beyond_i64_is_out_of_range() {
        let schema = ObjectSchema::new().field("n", FieldSchema::integer());

        let errors = schema.parse(json!({"n": u64::MAX})).unwrap_err();
        let issue = errors.issue_for("n").unwrap();
        assert_eq!(issue.kind, IssueKind::InvalidValue);
        assert_eq!(issue.message, format!("Must be at most {}", i64::MAX));

        let errors = ObjectSchema::new()
            .field("flag", FieldSchema::boolean())
            .parse(json!({"flag": u64::MAX}))
            .unwrap_err();
        assert_eq!(
            errors.issue_for("flag").unwrap().message,
            "Expected boolean, got integer"
        );
    }

    #[test]
    fn test_nested_object_fields_are_prefixed() {
        let schema = ObjectSchema::new().field(
            "database",
            FieldSchema::object(
                ObjectSchema::new()
                    .field("host", FieldSchema::string())
                    .field("port", FieldSchema::positive_integer()),
            ),
        );

        let errors = schema
            .parse(json!({"database": {"port": -1}}))
            .unwrap_err();
        assert!(errors.contains_field("database.host"));
        assert!(errors.contains_field("database.port"));

        let errors = schema.parse(json!({"database": "localhost"})).unwrap_err();
        assert_eq!(
            errors.issue_for("database").unwrap().message,
            "Expected object, got string"
        );
    }

    #[test]
    fn test_deserialize_schema_description() {
        let description = json!({
            "fields": {
                "name": {"type": "string", "min_length": 1},
                "stage": {"type": "enum", "values": ["dev", "prod"]},
                "replicas": {"type": "integer", "positive": true},
                "region": {"type": "string", "optional": true, "default": "eu-west-1"},
                "database": {
                    "type": "object",
                    "fields": {"host": {"type": "string"}}
                }
            },
            "unknown_fields": "reject"
        });

        let schema: ObjectSchema = serde_json::from_value(description).unwrap();
        assert_eq!(schema.unknown_fields, UnknownFields::Reject);
        assert_eq!(schema.fields["stage"], FieldSchema::one_of(["dev", "prod"]));
        assert_eq!(
            schema.fields["region"],
            FieldSchema::string().with_default("eu-west-1")
        );

        let result = schema
            .parse(json!({
                "name": "svc",
                "stage": "prod",
                "replicas": 2,
                "database": {"host": "db"}
            }))
            .unwrap();
        assert_eq!(result.get("region"), Some(&json!("eu-west-1")));
    }
}
