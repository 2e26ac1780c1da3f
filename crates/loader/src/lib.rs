//! Env file loading for the envload system
//!
//! This crate reads a configuration file, decodes it into a structured value
//! and validates that value against a caller-supplied schema, returning the
//! validated result or the failure that stopped it.

pub mod format;
pub mod loader;
pub mod object;
pub mod options;
pub mod schema;
pub mod typed;

pub use format::ContentFormat;
pub use loader::{load, ConfigLoader, LOAD_ERROR_MESSAGE};
pub use object::{FieldKind, FieldSchema, ObjectSchema, UnknownFields};
pub use options::LoadOptions;
pub use schema::Schema;
pub use typed::TypedSchema;
pub use types::{IssueKind, LoadError, Location, Result, ValidationErrors, ValidationIssue};
