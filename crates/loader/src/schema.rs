//! The validation capability handed to the loader

use serde_json::Value;
use types::ValidationErrors;

/// Anything that can turn an untyped structured value into a validated one.
///
/// `parse` either returns the validated output or the diagnostics for every
/// field it rejected. Implementations decide their own policy for fields they
/// do not recognise.
pub trait Schema {
    type Output;

    fn parse(&self, value: Value) -> Result<Self::Output, ValidationErrors>;
}

impl<S: Schema + ?Sized> Schema for &S {
    type Output = S::Output;

    fn parse(&self, value: Value) -> Result<Self::Output, ValidationErrors> {
        (**self).parse(value)
    }
}

impl<S: Schema + ?Sized> Schema for Box<S> {
    type Output = S::Output;

    fn parse(&self, value: Value) -> Result<Self::Output, ValidationErrors> {
        (**self).parse(value)
    }
}

/// Schema backed by a plain function
#[derive(Debug, Clone, Copy)]
pub struct FnSchema<F>(F);

/// Wrap a function as a [`Schema`]
pub fn from_fn<F, T>(f: F) -> FnSchema<F>
where
    F: Fn(Value) -> Result<T, ValidationErrors>,
{
    FnSchema(f)
}

impl<F, T> Schema for FnSchema<F>
where
    F: Fn(Value) -> Result<T, ValidationErrors>,
{
    type Output = T;

    fn parse(&self, value: Value) -> Result<T, ValidationErrors> {
        (self.0)(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use types::IssueKind;

    #[test]
    fn test_fn_schema_delegates() {
        let schema = from_fn(|value: Value| match value.get("name").and_then(Value::as_str) {
            Some(name) => Ok(name.to_string()),
            None => Err(ValidationErrors::single(
                "name",
                IssueKind::Missing,
                "Required field is missing",
            )),
        });

        assert_eq!(schema.parse(json!({"name": "svc"})).unwrap(), "svc");

        let errors = schema.parse(json!({})).unwrap_err();
        assert!(errors.contains_field("name"));
    }

    #[test]
    fn test_boxed_schema() {
        let schema: Box<dyn Schema<Output = Value>> = Box::new(from_fn(Ok::<Value, ValidationErrors>));
        assert_eq!(schema.parse(json!(1)).unwrap(), json!(1));
    }
}
