//! Field arguments.
//!
//! Arguments are built in two stages so one scalar/coercion pair can back
//! any number of differently named arguments:
//!
//! ```ignore
//! let int = ScalarArg::int();            // stage one: scalar + coercion
//! let age = int.arg("age");              // stage two: argument name
//! let limit = int.arg("limit");
//! ```
//!
//! Coercion turns an untyped JSON input into a typed value which resolvers
//! read back positionally through [`Arguments`].
//!
//! Arguments are required unless built from [`ScalarArg::optional`]: a
//! required argument prints as `Int!` and rejects a missing or `null` input,
//! an optional one prints as `Int` and reads back as `Option<T>`.

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::error::{CoercionError, FieldError};
use crate::types::int_from_number;
use crate::value::describe_json;

/// Input coercion from untyped JSON to a typed argument value.
pub type InputCoerceFn<T> = Arc<dyn Fn(&Value) -> Result<T, CoercionError> + Send + Sync>;

/// Stage one of the argument builder: a scalar name and its input coercion.
pub struct ScalarArg<T> {
    scalar: String,
    nullable: bool,
    coerce: InputCoerceFn<T>,
}

impl<T> Clone for ScalarArg<T> {
    fn clone(&self) -> Self {
        Self {
            scalar: self.scalar.clone(),
            nullable: self.nullable,
            coerce: Arc::clone(&self.coerce),
        }
    }
}

impl<T: Any + Send + Sync> ScalarArg<T> {
    /// Creates an argument builder for a scalar with the given coercion.
    ///
    /// Arguments built from it are required and declared as `Scalar!`.
    pub fn new<F>(scalar: impl Into<String>, coerce: F) -> Self
    where
        F: Fn(&Value) -> Result<T, CoercionError> + Send + Sync + 'static,
    {
        Self {
            scalar: scalar.into(),
            nullable: false,
            coerce: Arc::new(coerce),
        }
    }

    /// A nullable variant of this builder.
    ///
    /// A missing or `null` input coerces to `None`; anything else goes
    /// through this builder's coercion and is wrapped in `Some`.
    pub fn optional(&self) -> ScalarArg<Option<T>> {
        let coerce = Arc::clone(&self.coerce);
        ScalarArg {
            scalar: self.scalar.clone(),
            nullable: true,
            coerce: Arc::new(move |input: &Value| match input {
                Value::Null => Ok(None),
                other => coerce(other).map(Some),
            }),
        }
    }

    /// The scalar name arguments built from this builder declare.
    pub fn scalar_name(&self) -> &str {
        &self.scalar
    }

    /// Returns whether arguments built from this builder accept `null`.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Stage two: builds a named argument sharing this coercion.
    pub fn arg(&self, name: impl Into<String>) -> Argument {
        let coerce = Arc::clone(&self.coerce);
        Argument {
            name: name.into(),
            scalar: self.scalar.clone(),
            nullable: self.nullable,
            description: None,
            coerce: Arc::new(move |input: &Value| coerce(input).map(ArgValue::new)),
        }
    }
}

impl ScalarArg<i32> {
    /// `Int` arguments: JSON integers, or integral floats, within the signed
    /// 32-bit range. Same rule as the `Int` output scalar.
    pub fn int() -> Self {
        Self::new("Int", |input: &Value| match input {
            Value::Null => Err(CoercionError::Null {
                scalar: "Int".into(),
            }),
            Value::Number(n) => int_from_number(n),
            _ => Err(CoercionError::expected_type("Int", describe_json(input))),
        })
    }
}

impl ScalarArg<f64> {
    /// `Float` arguments: any JSON number.
    pub fn float() -> Self {
        Self::new("Float", |input: &Value| match input {
            Value::Null => Err(CoercionError::Null {
                scalar: "Float".into(),
            }),
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| CoercionError::expected_type("Float", describe_json(input))),
            _ => Err(CoercionError::expected_type("Float", describe_json(input))),
        })
    }
}

impl ScalarArg<String> {
    /// `String` arguments: JSON strings only.
    pub fn string() -> Self {
        Self::new("String", |input: &Value| match input {
            Value::Null => Err(CoercionError::Null {
                scalar: "String".into(),
            }),
            Value::String(s) => Ok(s.clone()),
            _ => Err(CoercionError::expected_type("String", describe_json(input))),
        })
    }

    /// `ID` arguments: JSON strings, or integers normalized to strings.
    pub fn id() -> Self {
        Self::new("ID", |input: &Value| match input {
            Value::Null => Err(CoercionError::Null {
                scalar: "ID".into(),
            }),
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
            _ => Err(CoercionError::expected_type("ID", describe_json(input))),
        })
    }
}

impl ScalarArg<bool> {
    /// `Boolean` arguments: JSON booleans only.
    pub fn boolean() -> Self {
        Self::new("Boolean", |input: &Value| match input {
            Value::Null => Err(CoercionError::Null {
                scalar: "Boolean".into(),
            }),
            Value::Bool(b) => Ok(*b),
            _ => Err(CoercionError::expected_type("Boolean", describe_json(input))),
        })
    }
}

/// A coerced, type-erased argument value.
#[derive(Clone)]
pub struct ArgValue(Arc<dyn Any + Send + Sync>);

impl ArgValue {
    fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Downcasts to the argument's internal type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl fmt::Debug for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ArgValue(..)")
    }
}

/// Argument descriptor: a name bound to a scalar input coercion.
#[derive(Clone)]
pub struct Argument {
    name: String,
    scalar: String,
    nullable: bool,
    description: Option<String>,
    coerce: InputCoerceFn<ArgValue>,
}

impl Argument {
    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The argument name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name of the scalar this argument accepts.
    pub fn scalar_name(&self) -> &str {
        &self.scalar
    }

    /// Returns whether the argument may be omitted or given `null`.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// The declared SDL type: `Int` when nullable, `Int!` otherwise.
    pub fn type_ref(&self) -> String {
        if self.nullable {
            self.scalar.clone()
        } else {
            format!("{}!", self.scalar)
        }
    }

    /// The description, if any.
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Coerces an external input into the argument's internal value.
    pub fn coerce(&self, input: &Value) -> Result<ArgValue, CoercionError> {
        (self.coerce)(input)
    }
}

impl fmt::Debug for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argument")
            .field("name", &self.name)
            .field("scalar", &self.scalar)
            .field("nullable", &self.nullable)
            .finish_non_exhaustive()
    }
}

/// Coerced argument values in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    entries: Vec<(String, ArgValue)>,
}

impl Arguments {
    /// Creates an empty argument list (root fields without arguments).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a coerced value.
    pub fn push(&mut self, name: impl Into<String>, value: ArgValue) {
        self.entries.push((name.into(), value));
    }

    /// Number of coerced arguments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Argument names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Reads the argument at `index` as `T`.
    pub fn get<T: Any>(&self, index: usize) -> Result<&T, FieldError> {
        let (name, value) = self
            .entries
            .get(index)
            .ok_or_else(|| FieldError::MissingArgument(format!("#{index}")))?;
        value.downcast_ref::<T>().ok_or_else(|| FieldError::ArgumentType {
            argument: name.clone(),
            expected: type_name::<T>(),
        })
    }

    /// Reads the argument called `name` as `T`.
    pub fn by_name<T: Any>(&self, name: &str) -> Result<&T, FieldError> {
        let (_, value) = self
            .entries
            .iter()
            .find(|(n, _)| n == name)
            .ok_or_else(|| FieldError::MissingArgument(name.to_string()))?;
        value.downcast_ref::<T>().ok_or_else(|| FieldError::ArgumentType {
            argument: name.to_string(),
            expected: type_name::<T>(),
        })
    }
}

/// Coerces raw inputs for every declared argument, in declaration order.
///
/// Missing inputs are coerced from JSON `null`, so required arguments reject
/// them and optional ones read back `None`. The first failure is returned as
/// [`FieldError::Argument`] so it stays attached to the one field.
pub fn coerce_arguments(
    args: &[Argument],
    inputs: &Map<String, Value>,
) -> Result<Arguments, FieldError> {
    let mut coerced = Arguments::new();
    for arg in args {
        let input = inputs.get(arg.name()).unwrap_or(&Value::Null);
        match arg.coerce(input) {
            Ok(value) => coerced.push(arg.name(), value),
            Err(source) => {
                debug!(argument = %arg.name(), error = %source, "Argument coercion failed");
                return Err(FieldError::Argument {
                    argument: arg.name().to_string(),
                    source,
                });
            }
        }
    }

    for key in inputs.keys() {
        if !args.iter().any(|arg| arg.name() == key) {
            trace!(argument = %key, "Ignoring undeclared argument input");
        }
    }

    Ok(coerced)
}
