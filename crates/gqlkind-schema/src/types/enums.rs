//! Enum kinds: leaf types restricted to a closed, ordered set of values.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::{CoercionError, SchemaError};
use crate::value::{FieldValue, OutputScalar};

/// A named leaf type whose values come from a fixed set.
///
/// Declaration order is preserved for SDL output and other consumers that
/// list the values.
#[derive(Debug, Clone)]
pub struct EnumKind {
    name: String,
    description: Option<String>,
    values: Vec<String>,
}

impl EnumKind {
    /// Creates an enum from its name and allowed values.
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            description: None,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The enum name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The description, if any.
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The allowed values in declaration order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Returns whether `value` is one of the allowed values.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// Coerces a resolved value, which must be a member string.
    pub fn coerce(&self, value: &FieldValue) -> Result<OutputScalar, CoercionError> {
        let raw = match value {
            FieldValue::Value(Value::String(s)) => Some(s.as_str()),
            FieldValue::Owned(_) => value
                .downcast_ref::<String>()
                .map(String::as_str)
                .or_else(|| value.downcast_ref::<&'static str>().copied()),
            _ => None,
        };

        match raw {
            Some(s) if self.contains(s) => Ok(OutputScalar::String(s.to_string())),
            Some(s) => Err(CoercionError::NotInEnum {
                name: self.name.clone(),
                value: s.to_string(),
            }),
            None if value.is_null() => Err(CoercionError::Null {
                scalar: self.name.clone(),
            }),
            None => Err(CoercionError::expected_type(&self.name, value.describe())),
        }
    }

    /// Checks that the enum has at least one value and no duplicates.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.values.is_empty() {
            return Err(SchemaError::EmptyEnum(self.name.clone()));
        }
        let mut seen = HashSet::new();
        for value in &self.values {
            if !seen.insert(value.as_str()) {
                return Err(SchemaError::DuplicateEnumValue {
                    name: self.name.clone(),
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_type() -> EnumKind {
        EnumKind::new("UserType", ["MORTAL", "ADMIN"])
    }

    #[test]
    fn test_preserves_declaration_order() {
        assert_eq!(user_type().values(), &["MORTAL", "ADMIN"]);
    }

    #[test]
    fn test_coerce_member() {
        assert_eq!(
            user_type().coerce(&FieldValue::from("ADMIN")),
            Ok(OutputScalar::String("ADMIN".into()))
        );
        assert_eq!(
            user_type().coerce(&FieldValue::owned("MORTAL")),
            Ok(OutputScalar::String("MORTAL".into()))
        );
    }

    #[test]
    fn test_coerce_rejects_non_member() {
        assert_eq!(
            user_type().coerce(&FieldValue::from("ROOT")),
            Err(CoercionError::NotInEnum {
                name: "UserType".into(),
                value: "ROOT".into()
            })
        );
        assert!(matches!(
            user_type().coerce(&FieldValue::from(1)),
            Err(CoercionError::ExpectedType { .. })
        ));
    }

    #[test]
    fn test_validate() {
        assert!(user_type().validate().is_ok());
        assert_eq!(
            EnumKind::new("Empty", Vec::<String>::new()).validate(),
            Err(SchemaError::EmptyEnum("Empty".into()))
        );
        assert!(matches!(
            EnumKind::new("Twice", ["A", "A"]).validate(),
            Err(SchemaError::DuplicateEnumValue { value, .. }) if value == "A"
        ));
    }
}
