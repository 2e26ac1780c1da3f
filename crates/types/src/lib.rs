//! Shared types for the envload system
//!
//! This crate contains the domain types used by the loader and the command
//! line front end: where a file lives, what went wrong, and why a value was
//! rejected by a schema.

pub mod diagnostics;
pub mod error;
pub mod location;

// Re-export commonly used types
pub use diagnostics::{IssueKind, ValidationErrors, ValidationIssue, ROOT_FIELD};
pub use error::{LoadError, Result};
pub use location::Location;
