//! Schema backed by a Rust type

use crate::schema::Schema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use types::{IssueKind, ValidationErrors, ROOT_FIELD};
use validator::{Validate, ValidationErrorsKind};

/// Validates by deserializing into `T` and then running its
/// [`validator::Validate`] rules.
pub struct TypedSchema<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypedSchema<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for TypedSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TypedSchema<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> Copy for TypedSchema<T> {}

impl<T> fmt::Debug for TypedSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedSchema")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> Schema for TypedSchema<T>
where
    T: DeserializeOwned + Validate,
{
    type Output = T;

    fn parse(&self, value: Value) -> Result<T, ValidationErrors> {
        let parsed: T =
            serde_path_to_error::deserialize(value).map_err(|e| deserialize_issue(&e))?;
        parsed.validate().map_err(|e| convert_validator_errors(&e))?;
        Ok(parsed)
    }
}

/// Map a serde error to an issue on the field it was raised at
fn deserialize_issue(err: &serde_path_to_error::Error<serde_json::Error>) -> ValidationErrors {
    let message = err.inner().to_string();
    let path = err.path().to_string();
    // An empty path displays as "."
    let parent = if path == "." { None } else { Some(path.as_str()) };

    // Missing fields are reported on the enclosing struct.
    if let Some(field) = backticked_after(&message, "missing field ") {
        let field = match parent {
            Some(parent) => format!("{}.{}", parent, field),
            None => field.to_string(),
        };
        return ValidationErrors::single(
            field,
            IssueKind::Missing,
            "Required field is missing",
        );
    }
    if let Some(field) = backticked_after(&message, "unknown field ") {
        return ValidationErrors::single(
            child_field(parent, field),
            IssueKind::UnknownField,
            message.clone(),
        );
    }

    let kind = if message.starts_with("invalid type") {
        IssueKind::InvalidType
    } else {
        IssueKind::InvalidValue
    };
    ValidationErrors::single(parent.unwrap_or(ROOT_FIELD), kind, message)
}

// The tracked path may already end at the rejected key.
fn child_field(parent: Option<&str>, field: &str) -> String {
    match parent {
        None => field.to_string(),
        Some(parent) if parent == field || parent.ends_with(&format!(".{}", field)) => {
            parent.to_string()
        }
        Some(parent) => format!("{}.{}", parent, field),
    }
}

fn backticked_after<'a>(message: &'a str, prefix: &str) -> Option<&'a str> {
    message
        .strip_prefix(prefix)?
        .strip_prefix('`')?
        .split('`')
        .next()
}

/// Flatten `validator` diagnostics into one issue per failed rule
pub fn convert_validator_errors(errors: &validator::ValidationErrors) -> ValidationErrors {
    let mut out = ValidationErrors::new();
    collect_validator_errors(None, errors, &mut out);
    out
}

fn collect_validator_errors(
    parent: Option<&str>,
    errors: &validator::ValidationErrors,
    out: &mut ValidationErrors,
) {
    // HashMap order is not stable; report fields alphabetically.
    let mut entries: Vec<_> = errors
        .errors()
        .iter()
        .map(|(field, kind)| (field.to_string(), kind))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    for (field, kind) in entries {
        let path = match parent {
            Some(parent) => format!("{}.{}", parent, field),
            None => field,
        };
        match kind {
            ValidationErrorsKind::Field(rules) => {
                for rule in rules {
                    let issue_kind = if rule.code == "required" {
                        IssueKind::Missing
                    } else {
                        IssueKind::InvalidValue
                    };
                    let message = match &rule.message {
                        Some(msg) => msg.to_string(),
                        None => format!("Failed `{}` check", rule.code),
                    };
                    out.add(path.clone(), issue_kind, message);
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_validator_errors(Some(&path), nested, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    let item_path = format!("{}[{}]", path, index);
                    collect_validator_errors(Some(&item_path), nested, out);
                }
            }
        }
    }
}
