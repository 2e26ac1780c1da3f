//! Structured validation diagnostics

use std::fmt;

/// Field name used for issues that concern the whole value
pub const ROOT_FIELD: &str = "$";

/// What kind of check a field failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// A required field is absent
    Missing,
    /// The field holds a value of the wrong type
    InvalidType,
    /// The type is right but a constraint (enum, range, length) failed
    InvalidValue,
    /// The field is not declared by the schema and the schema rejects extras
    UnknownField,
    /// A check defined by the schema author
    Custom,
}

/// A single failing field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: String,
    pub kind: IssueKind,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field that failed validation, in the order they were checked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Single-issue diagnostics
    pub fn single(field: impl Into<String>, kind: IssueKind, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, kind, message);
        errors
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn add(&mut self, field: impl Into<String>, kind: IssueKind, message: impl Into<String>) {
        self.push(ValidationIssue {
            field: field.into(),
            kind,
            message: message.into(),
        });
    }

    /// Append every issue from `other`, prefixing field names with `parent`
    pub fn merge_nested(&mut self, parent: &str, other: ValidationErrors) {
        for mut issue in other.issues {
            issue.field = if issue.field == ROOT_FIELD {
                parent.to_string()
            } else {
                format!("{}.{}", parent, issue.field)
            };
            self.issues.push(issue);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Names of the failing fields
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.issues.iter().map(|issue| issue.field.as_str())
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.fields().any(|f| f == field)
    }

    /// First issue recorded for `field`
    pub fn issue_for(&self, field: &str) -> Option<&ValidationIssue> {
        self.issues.iter().find(|issue| issue.field == field)
    }

    /// `Ok(value)` when nothing failed, otherwise these diagnostics
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    pub fn summary(&self) -> String {
        format!("Validation: {} failing field(s)", self.issues.len())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return write!(f, "no validation issues");
        }
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationIssue;
    type IntoIter = std::vec::IntoIter<ValidationIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}
