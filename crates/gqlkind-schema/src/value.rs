//! Runtime values flowing between resolvers.
//!
//! A resolver may hand back untyped JSON, an ordered list, or an arbitrary
//! Rust value that child resolvers downcast. [`OutputScalar`] is the
//! output-safe primitive every scalar coerces to.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

/// A value produced by a resolver.
#[derive(Clone, Default)]
pub enum FieldValue {
    /// The absent marker.
    #[default]
    Null,
    /// Untyped JSON data.
    Value(Value),
    /// An ordered sequence of values.
    List(Vec<FieldValue>),
    /// A typed Rust value, shared by reference.
    Owned(Arc<dyn Any + Send + Sync>),
}

impl FieldValue {
    /// Wraps an arbitrary Rust value so child resolvers can downcast it.
    pub fn owned<T: Any + Send + Sync>(value: T) -> Self {
        Self::Owned(Arc::new(value))
    }

    /// Builds a list value from anything convertible into field values.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<FieldValue>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Returns whether this is the absent marker (including JSON `null`).
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null | Self::Value(Value::Null))
    }

    /// Downcasts an owned value to `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Owned(value) => value.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Returns the underlying JSON value, if this is one.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the elements if this value is a list.
    ///
    /// JSON arrays count as lists; their elements are wrapped on the fly.
    pub fn as_list(&self) -> Option<Cow<'_, [FieldValue]>> {
        match self {
            Self::List(items) => Some(Cow::Borrowed(items.as_slice())),
            Self::Value(Value::Array(items)) => Some(Cow::Owned(
                items.iter().cloned().map(FieldValue::Value).collect(),
            )),
            _ => None,
        }
    }

    /// Converts to JSON, failing on owned Rust values anywhere in the tree.
    pub fn to_json(&self) -> Option<Value> {
        match self {
            Self::Null => Some(Value::Null),
            Self::Value(value) => Some(value.clone()),
            Self::List(items) => items
                .iter()
                .map(FieldValue::to_json)
                .collect::<Option<Vec<_>>>()
                .map(Value::Array),
            Self::Owned(_) => None,
        }
    }

    /// Short human-readable description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Value(value) => describe_json(value),
            Self::List(_) => "list".to_string(),
            Self::Owned(_) => "owned value".to_string(),
        }
    }
}

pub(crate) fn describe_json(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string \"{s}\""),
        Value::Array(_) => "list".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::Owned(_) => f.write_str("Owned(..)"),
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Value(a), Self::Value(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Owned(a), Self::Owned(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Value(Value::String(value.to_string()))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Value(Value::String(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Value(Value::Bool(value))
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(items: Vec<FieldValue>) -> Self {
        Self::List(items)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Output-safe primitive produced by scalar coercion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutputScalar {
    /// A string.
    String(String),
    /// An integral number.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A boolean.
    Boolean(bool),
}

impl From<OutputScalar> for Value {
    fn from(scalar: OutputScalar) -> Self {
        match scalar {
            OutputScalar::String(s) => Value::String(s),
            OutputScalar::Int(i) => Value::from(i),
            OutputScalar::Float(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            OutputScalar::Boolean(b) => Value::Bool(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    struct Book {
        id: String,
    }

    #[test]
    fn test_json_null_is_null() {
        assert!(FieldValue::Null.is_null());
        assert!(FieldValue::from(Value::Null).is_null());
        assert!(FieldValue::from(None::<String>).is_null());
        assert!(!FieldValue::from("x").is_null());
    }

    #[test]
    fn test_owned_downcast() {
        let value = FieldValue::owned(Book { id: "32".into() });
        assert_eq!(
            value.downcast_ref::<Book>(),
            Some(&Book { id: "32".into() })
        );
        assert!(value.downcast_ref::<String>().is_none());
        assert!(value.to_json().is_none());
    }

    #[test]
    fn test_json_array_is_list() {
        let value = FieldValue::from(json!([{"id": "32"}]));
        let items = value.as_list().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].as_json(), Some(&json!({"id": "32"})));
        assert!(FieldValue::from(json!({"id": "32"})).as_list().is_none());
    }

    #[test]
    fn test_to_json_nested_list() {
        let value = FieldValue::list(vec![FieldValue::from("a"), FieldValue::Null]);
        assert_eq!(value.to_json(), Some(json!(["a", null])));
    }

    #[test]
    fn test_output_scalar_serialization() {
        assert_eq!(
            serde_json::to_value(OutputScalar::Int(3)).unwrap(),
            json!(3)
        );
        assert_eq!(Value::from(OutputScalar::Float(f64::NAN)), Value::Null);
        assert_eq!(
            Value::from(OutputScalar::String("ADMIN".into())),
            json!("ADMIN")
        );
    }
}
