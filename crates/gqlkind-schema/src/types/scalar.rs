//! Scalar kinds and the built-in GraphQL scalars.
//!
//! A scalar pairs a name with an output coercion from whatever a resolver
//! produced to an [`OutputScalar`]. The five built-ins follow the GraphQL
//! output coercion rules:
//!
//! - `Int` - signed 32-bit integers
//! - `Float` - finite double precision numbers
//! - `String` - UTF-8 strings
//! - `Boolean` - `true` / `false`
//! - `ID` - strings, or integers rendered as strings

use std::any::Any;
use std::fmt;
use std::sync::{Arc, LazyLock};

use serde_json::{Number, Value};

use crate::error::CoercionError;
use crate::value::{FieldValue, OutputScalar};

/// Names of the scalars every schema knows without declaring them.
pub const BUILTIN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

/// Output coercion function of a scalar.
pub type CoerceFn = Arc<dyn Fn(&FieldValue) -> Result<OutputScalar, CoercionError> + Send + Sync>;

/// A named leaf type with an output coercion.
#[derive(Clone)]
pub struct ScalarKind {
    name: String,
    description: Option<String>,
    coerce: CoerceFn,
}

impl ScalarKind {
    /// Creates a scalar from a coercion over any field value.
    pub fn new<F>(name: impl Into<String>, coerce: F) -> Self
    where
        F: Fn(&FieldValue) -> Result<OutputScalar, CoercionError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: None,
            coerce: Arc::new(coerce),
        }
    }

    /// Creates a scalar whose resolvers return owned values of type `T`.
    ///
    /// Any other value is rejected with [`CoercionError::ExpectedType`].
    pub fn typed<T, F>(name: impl Into<String>, coerce: F) -> Self
    where
        T: Any,
        F: Fn(&T) -> OutputScalar + Send + Sync + 'static,
    {
        let name = name.into();
        let scalar_name = name.clone();
        Self::new(name, move |value: &FieldValue| match value.downcast_ref::<T>() {
            Some(inner) => Ok(coerce(inner)),
            None => Err(CoercionError::expected_type(&scalar_name, value.describe())),
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The scalar name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The description, if any.
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Coerces a resolved value to its output-safe primitive.
    pub fn coerce(&self, value: &FieldValue) -> Result<OutputScalar, CoercionError> {
        (self.coerce)(value)
    }

    /// Returns whether this is one of the built-in scalars.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        BUILTIN_SCALARS.contains(&self.name.as_str())
    }
}

impl fmt::Debug for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarKind")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Built-in scalars
// =============================================================================

pub(crate) static INT: LazyLock<Arc<ScalarKind>> = LazyLock::new(|| {
    Arc::new(ScalarKind::new("Int", coerce_int).description("A signed 32-bit integer"))
});

pub(crate) static FLOAT: LazyLock<Arc<ScalarKind>> = LazyLock::new(|| {
    Arc::new(ScalarKind::new("Float", coerce_float).description("A double precision number"))
});

pub(crate) static STRING: LazyLock<Arc<ScalarKind>> = LazyLock::new(|| {
    Arc::new(ScalarKind::new("String", coerce_string).description("A UTF-8 string"))
});

pub(crate) static BOOLEAN: LazyLock<Arc<ScalarKind>> = LazyLock::new(|| {
    Arc::new(ScalarKind::new("Boolean", coerce_boolean).description("true or false"))
});

pub(crate) static ID: LazyLock<Arc<ScalarKind>> = LazyLock::new(|| {
    Arc::new(ScalarKind::new("ID", coerce_id).description("A unique identifier"))
});

fn int_in_range(value: i64) -> Result<OutputScalar, CoercionError> {
    if i32::try_from(value).is_ok() {
        Ok(OutputScalar::Int(value))
    } else {
        Err(CoercionError::out_of_range("Int", value))
    }
}

/// The `Int` rule for JSON numbers, shared by argument input and field
/// output: integers, or integral floats such as `2.0`, within `i32` range.
pub(crate) fn int_from_number(n: &Number) -> Result<i32, CoercionError> {
    if let Some(i) = n.as_i64() {
        return i32::try_from(i).map_err(|_| CoercionError::out_of_range("Int", i));
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 => {
            if f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX) {
                Ok(f as i32)
            } else {
                Err(CoercionError::out_of_range("Int", n))
            }
        }
        _ => Err(CoercionError::expected_type("Int", format!("number {n}"))),
    }
}

fn coerce_int(value: &FieldValue) -> Result<OutputScalar, CoercionError> {
    match value {
        FieldValue::Null | FieldValue::Value(Value::Null) => Err(CoercionError::Null {
            scalar: "Int".into(),
        }),
        FieldValue::Value(Value::Number(n)) => {
            int_from_number(n).map(|i| OutputScalar::Int(i64::from(i)))
        }
        FieldValue::Owned(_) => {
            if let Some(i) = value.downcast_ref::<i32>() {
                Ok(OutputScalar::Int(i64::from(*i)))
            } else if let Some(i) = value.downcast_ref::<i64>() {
                int_in_range(*i)
            } else {
                Err(CoercionError::expected_type("Int", value.describe()))
            }
        }
        _ => Err(CoercionError::expected_type("Int", value.describe())),
    }
}

fn coerce_float(value: &FieldValue) -> Result<OutputScalar, CoercionError> {
    let float = match value {
        FieldValue::Null | FieldValue::Value(Value::Null) => {
            return Err(CoercionError::Null {
                scalar: "Float".into(),
            });
        }
        FieldValue::Value(Value::Number(n)) => n.as_f64(),
        FieldValue::Owned(_) => value
            .downcast_ref::<f64>()
            .copied()
            .or_else(|| value.downcast_ref::<f32>().map(|f| f64::from(*f)))
            .or_else(|| value.downcast_ref::<i32>().map(|i| f64::from(*i))),
        _ => None,
    };

    match float {
        Some(f) if f.is_finite() => Ok(OutputScalar::Float(f)),
        Some(f) => Err(CoercionError::out_of_range("Float", f)),
        None => Err(CoercionError::expected_type("Float", value.describe())),
    }
}

fn coerce_string(value: &FieldValue) -> Result<OutputScalar, CoercionError> {
    match value {
        FieldValue::Null | FieldValue::Value(Value::Null) => Err(CoercionError::Null {
            scalar: "String".into(),
        }),
        FieldValue::Value(Value::String(s)) => Ok(OutputScalar::String(s.clone())),
        FieldValue::Owned(_) => value
            .downcast_ref::<String>()
            .cloned()
            .or_else(|| value.downcast_ref::<&'static str>().map(|s| (*s).to_string()))
            .map(OutputScalar::String)
            .ok_or_else(|| CoercionError::expected_type("String", value.describe())),
        _ => Err(CoercionError::expected_type("String", value.describe())),
    }
}

fn coerce_boolean(value: &FieldValue) -> Result<OutputScalar, CoercionError> {
    match value {
        FieldValue::Null | FieldValue::Value(Value::Null) => Err(CoercionError::Null {
            scalar: "Boolean".into(),
        }),
        FieldValue::Value(Value::Bool(b)) => Ok(OutputScalar::Boolean(*b)),
        FieldValue::Owned(_) => value
            .downcast_ref::<bool>()
            .map(|b| OutputScalar::Boolean(*b))
            .ok_or_else(|| CoercionError::expected_type("Boolean", value.describe())),
        _ => Err(CoercionError::expected_type("Boolean", value.describe())),
    }
}

fn coerce_id(value: &FieldValue) -> Result<OutputScalar, CoercionError> {
    match value {
        FieldValue::Null | FieldValue::Value(Value::Null) => Err(CoercionError::Null {
            scalar: "ID".into(),
        }),
        FieldValue::Value(Value::String(s)) => Ok(OutputScalar::String(s.clone())),
        FieldValue::Value(Value::Number(n)) if n.is_i64() || n.is_u64() => {
            Ok(OutputScalar::String(n.to_string()))
        }
        FieldValue::Owned(_) => value
            .downcast_ref::<String>()
            .cloned()
            .or_else(|| value.downcast_ref::<&'static str>().map(|s| (*s).to_string()))
            .or_else(|| value.downcast_ref::<i64>().map(ToString::to_string))
            .or_else(|| value.downcast_ref::<i32>().map(ToString::to_string))
            .map(OutputScalar::String)
            .ok_or_else(|| CoercionError::expected_type("ID", value.describe())),
        _ => Err(CoercionError::expected_type("ID", value.describe())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // =========================================================================
    // Int
    // =========================================================================

    #[test]
    fn test_int_accepts_json_integer() {
        assert_eq!(
            INT.coerce(&FieldValue::from(json!(42))),
            Ok(OutputScalar::Int(42))
        );
    }

    #[test]
    fn test_int_accepts_integral_float() {
        assert_eq!(
            INT.coerce(&FieldValue::from(json!(2.0))),
            Ok(OutputScalar::Int(2))
        );
    }

    #[test]
    fn test_int_number_rule() {
        assert_eq!(int_from_number(&Number::from(-7)), Ok(-7));
        assert_eq!(int_from_number(&Number::from_f64(2.0).unwrap()), Ok(2));
        assert!(matches!(
            int_from_number(&Number::from_f64(1.5).unwrap()),
            Err(CoercionError::ExpectedType { .. })
        ));
        assert!(matches!(
            int_from_number(&Number::from_f64(1e12).unwrap()),
            Err(CoercionError::OutOfRange { .. })
        ));
        assert!(matches!(
            int_from_number(&Number::from(u64::MAX)),
            Err(CoercionError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_int_rejects_fraction_and_overflow() {
        assert!(matches!(
            INT.coerce(&FieldValue::from(json!(1.5))),
            Err(CoercionError::ExpectedType { .. })
        ));
        assert!(matches!(
            INT.coerce(&FieldValue::from(json!(1_i64 << 40))),
            Err(CoercionError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_int_owned_values() {
        assert_eq!(INT.coerce(&FieldValue::owned(7_i32)), Ok(OutputScalar::Int(7)));
        assert!(INT.coerce(&FieldValue::owned(i64::MAX)).is_err());
        assert!(INT.coerce(&FieldValue::owned("7".to_string())).is_err());
    }

    #[test]
    fn test_int_rejects_null() {
        assert_eq!(
            INT.coerce(&FieldValue::Null),
            Err(CoercionError::Null {
                scalar: "Int".into()
            })
        );
    }

    // =========================================================================
    // Float / String / Boolean / ID
    // =========================================================================

    #[test]
    fn test_float() {
        assert_eq!(
            FLOAT.coerce(&FieldValue::from(json!(1.5))),
            Ok(OutputScalar::Float(1.5))
        );
        assert_eq!(
            FLOAT.coerce(&FieldValue::owned(3_i32)),
            Ok(OutputScalar::Float(3.0))
        );
        assert!(FLOAT.coerce(&FieldValue::owned(f64::INFINITY)).is_err());
        assert!(FLOAT.coerce(&FieldValue::from("1.5")).is_err());
    }

    #[test]
    fn test_string() {
        assert_eq!(
            STRING.coerce(&FieldValue::from("Jordan")),
            Ok(OutputScalar::String("Jordan".into()))
        );
        assert_eq!(
            STRING.coerce(&FieldValue::owned("static")),
            Ok(OutputScalar::String("static".into()))
        );
        assert!(STRING.coerce(&FieldValue::from(true)).is_err());
    }

    #[test]
    fn test_boolean() {
        assert_eq!(
            BOOLEAN.coerce(&FieldValue::from(false)),
            Ok(OutputScalar::Boolean(false))
        );
        assert!(BOOLEAN.coerce(&FieldValue::from(0)).is_err());
    }

    #[test]
    fn test_id_accepts_strings_and_integers() {
        assert_eq!(
            ID.coerce(&FieldValue::from("32")),
            Ok(OutputScalar::String("32".into()))
        );
        assert_eq!(
            ID.coerce(&FieldValue::from(32)),
            Ok(OutputScalar::String("32".into()))
        );
        assert!(ID.coerce(&FieldValue::from(3.2)).is_err());
    }

    // =========================================================================
    // Custom scalars
    // =========================================================================

    #[derive(Debug)]
    struct Celsius(f64);

    #[test]
    fn test_typed_scalar() {
        let temperature = ScalarKind::typed("Temperature", |c: &Celsius| OutputScalar::Float(c.0));
        assert_eq!(
            temperature.coerce(&FieldValue::owned(Celsius(21.5))),
            Ok(OutputScalar::Float(21.5))
        );
        assert!(matches!(
            temperature.coerce(&FieldValue::from(21.5)),
            Err(CoercionError::ExpectedType { scalar, .. }) if scalar == "Temperature"
        ));
        assert!(!temperature.is_builtin());
    }

    #[test]
    fn test_builtin_names() {
        for scalar in [&*INT, &*FLOAT, &*STRING, &*BOOLEAN, &*ID] {
            assert!(scalar.is_builtin());
        }
    }
}
