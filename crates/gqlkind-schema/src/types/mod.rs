//! The type model.
//!
//! [`Type`] is a closed sum over six kinds. Four are named kinds:
//!
//! - [`ObjectKind`] - named field collections, possibly lazy and cyclic
//! - [`UnionKind`] - candidate objects plus a runtime discriminator
//! - [`ScalarKind`] - leaf values with an output coercion
//! - [`EnumKind`] - leaf values from a closed set
//!
//! `NonNullable` and `List` wrap another `Type` by shared reference. The
//! wrapped payload is never copied, so `Type::list(t.clone())` still points at
//! the same kind as `t`.
//!
//! ## NonNullable policy
//!
//! [`Type::non_null`] normalizes: wrapping a type that is already non-null
//! returns it unchanged. [`Type::try_non_null`] rejects the same input with
//! [`SchemaError::NestedNonNullable`], and schema validation rejects any
//! hand-built `NonNullable(NonNullable(_))`.

mod enums;
mod object;
mod scalar;
mod union;

pub use enums::EnumKind;
pub use object::ObjectKind;
pub use scalar::{BUILTIN_SCALARS, CoerceFn, ScalarKind};
pub(crate) use scalar::int_from_number;
pub use union::{ResolveTypeFn, UnionKind};

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::error::{FieldError, SchemaError};
use crate::value::FieldValue;

/// A type reference in the schema graph.
pub enum Type<Ctx> {
    /// A named object type.
    Object(Arc<ObjectKind<Ctx>>),
    /// A union of object types.
    Union(Arc<UnionKind<Ctx>>),
    /// A scalar leaf.
    Scalar(Arc<ScalarKind>),
    /// An enum leaf.
    Enum(Arc<EnumKind>),
    /// The payload, never null.
    NonNullable(Arc<Type<Ctx>>),
    /// A nullable list of the payload.
    List(Arc<Type<Ctx>>),
}

impl<Ctx> Clone for Type<Ctx> {
    fn clone(&self) -> Self {
        match self {
            Self::Object(kind) => Self::Object(Arc::clone(kind)),
            Self::Union(kind) => Self::Union(Arc::clone(kind)),
            Self::Scalar(kind) => Self::Scalar(Arc::clone(kind)),
            Self::Enum(kind) => Self::Enum(Arc::clone(kind)),
            Self::NonNullable(inner) => Self::NonNullable(Arc::clone(inner)),
            Self::List(inner) => Self::List(Arc::clone(inner)),
        }
    }
}

impl<Ctx> From<Arc<ObjectKind<Ctx>>> for Type<Ctx> {
    fn from(kind: Arc<ObjectKind<Ctx>>) -> Self {
        Self::Object(kind)
    }
}

impl<Ctx> From<Arc<UnionKind<Ctx>>> for Type<Ctx> {
    fn from(kind: Arc<UnionKind<Ctx>>) -> Self {
        Self::Union(kind)
    }
}

impl<Ctx> Type<Ctx> {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Wraps an object kind.
    pub fn object(kind: ObjectKind<Ctx>) -> Self {
        Self::Object(Arc::new(kind))
    }

    /// Wraps a union kind.
    pub fn union(kind: UnionKind<Ctx>) -> Self {
        Self::Union(Arc::new(kind))
    }

    /// Wraps a scalar kind.
    pub fn scalar(kind: ScalarKind) -> Self {
        Self::Scalar(Arc::new(kind))
    }

    /// Wraps an enum kind.
    pub fn enumeration(kind: EnumKind) -> Self {
        Self::Enum(Arc::new(kind))
    }

    /// The built-in `Int` scalar.
    pub fn int() -> Self {
        Self::Scalar(Arc::clone(&scalar::INT))
    }

    /// The built-in `Float` scalar.
    pub fn float() -> Self {
        Self::Scalar(Arc::clone(&scalar::FLOAT))
    }

    /// The built-in `String` scalar.
    pub fn string() -> Self {
        Self::Scalar(Arc::clone(&scalar::STRING))
    }

    /// The built-in `Boolean` scalar.
    pub fn boolean() -> Self {
        Self::Scalar(Arc::clone(&scalar::BOOLEAN))
    }

    /// The built-in `ID` scalar.
    pub fn id() -> Self {
        Self::Scalar(Arc::clone(&scalar::ID))
    }

    /// Marks `ty` as never null.
    ///
    /// Already non-null types are returned unchanged.
    pub fn non_null(ty: Type<Ctx>) -> Self {
        if ty.is_non_null() {
            debug!(ty = %ty, "Ignoring NonNullable around a non-null type");
            return ty;
        }
        Self::NonNullable(Arc::new(ty))
    }

    /// Marks `ty` as never null, rejecting types that already are.
    pub fn try_non_null(ty: Type<Ctx>) -> Result<Self, SchemaError> {
        if ty.is_non_null() {
            return Err(SchemaError::NestedNonNullable { ty: ty.to_string() });
        }
        Ok(Self::NonNullable(Arc::new(ty)))
    }

    /// A nullable list of `ty`.
    pub fn list(ty: Type<Ctx>) -> Self {
        Self::List(Arc::new(ty))
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// The kind's name: `Object`, `Union`, `Scalar`, `Enum`, `NonNullable` or `List`.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Object(_) => "Object",
            Self::Union(_) => "Union",
            Self::Scalar(_) => "Scalar",
            Self::Enum(_) => "Enum",
            Self::NonNullable(_) => "NonNullable",
            Self::List(_) => "List",
        }
    }

    /// Nominal identity of a named kind; wrappers have none.
    pub fn name(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Object(kind) => Some(Cow::Borrowed(kind.name())),
            Self::Union(kind) => Some(kind.name()),
            Self::Scalar(kind) => Some(Cow::Borrowed(kind.name())),
            Self::Enum(kind) => Some(Cow::Borrowed(kind.name())),
            Self::NonNullable(_) | Self::List(_) => None,
        }
    }

    /// The wrapped payload of a `NonNullable` or `List`.
    pub fn of_type(&self) -> Option<&Type<Ctx>> {
        match self {
            Self::NonNullable(inner) | Self::List(inner) => Some(inner),
            _ => None,
        }
    }

    /// The named kind under all wrappers.
    pub fn named_type(&self) -> &Type<Ctx> {
        let mut ty = self;
        while let Some(inner) = ty.of_type() {
            ty = inner;
        }
        ty
    }

    /// Number of `NonNullable` / `List` layers above the named kind.
    pub fn wrapper_depth(&self) -> usize {
        let mut depth = 0;
        let mut ty = self;
        while let Some(inner) = ty.of_type() {
            depth += 1;
            ty = inner;
        }
        depth
    }

    /// Returns whether this is a `NonNullable`.
    #[must_use]
    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNullable(_))
    }

    /// Returns whether this is a `List`.
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Returns whether the named kind is a scalar or enum.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self.named_type(), Self::Scalar(_) | Self::Enum(_))
    }

    /// The object kind, if this is one.
    pub fn as_object(&self) -> Option<&Arc<ObjectKind<Ctx>>> {
        match self {
            Self::Object(kind) => Some(kind),
            _ => None,
        }
    }

    /// The union kind, if this is one.
    pub fn as_union(&self) -> Option<&Arc<UnionKind<Ctx>>> {
        match self {
            Self::Union(kind) => Some(kind),
            _ => None,
        }
    }

    /// Returns whether both types are the same node of the type graph.
    #[must_use]
    pub fn ptr_eq(&self, other: &Type<Ctx>) -> bool {
        match (self, other) {
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b),
            (Self::Union(a), Self::Union(b)) => Arc::ptr_eq(a, b),
            (Self::Scalar(a), Self::Scalar(b)) => Arc::ptr_eq(a, b),
            (Self::Enum(a), Self::Enum(b)) => Arc::ptr_eq(a, b),
            (Self::NonNullable(a), Self::NonNullable(b)) | (Self::List(a), Self::List(b)) => {
                Arc::ptr_eq(a, b)
            }
            _ => false,
        }
    }

    // =========================================================================
    // Output checks
    // =========================================================================

    /// Checks that a resolved value has the shape this type declares.
    ///
    /// Only the structural layer is checked: nullability, list shape, leaf
    /// coercion and union membership. Object fields are resolved later and
    /// are not looked at.
    pub fn check_output(&self, value: &FieldValue) -> Result<(), FieldError> {
        match self {
            Self::NonNullable(inner) => {
                if value.is_null() {
                    return Err(FieldError::NullInNonNull {
                        ty: self.to_string(),
                    });
                }
                inner.check_output(value)
            }
            _ if value.is_null() => Ok(()),
            Self::List(inner) => {
                let items = value.as_list().ok_or_else(|| FieldError::ExpectedList {
                    ty: self.to_string(),
                })?;
                items.iter().try_for_each(|item| inner.check_output(item))
            }
            Self::Scalar(kind) => kind.coerce(value).map(|_| ()).map_err(FieldError::from),
            Self::Enum(kind) => kind.coerce(value).map(|_| ()).map_err(FieldError::from),
            Self::Object(kind) => {
                if value.as_list().is_some() {
                    return Err(FieldError::new(format!(
                        "Expected a single {} value, found a list",
                        kind.name()
                    )));
                }
                Ok(())
            }
            Self::Union(kind) => kind.resolve_member(value).map(|_| ()).map_err(FieldError::from),
        }
    }

    /// Serializes a resolved leaf value (possibly wrapped) to JSON output.
    pub fn serialize_leaf(&self, value: &FieldValue) -> Result<Value, FieldError> {
        match self {
            Self::NonNullable(inner) => {
                if value.is_null() {
                    return Err(FieldError::NullInNonNull {
                        ty: self.to_string(),
                    });
                }
                inner.serialize_leaf(value)
            }
            _ if value.is_null() => Ok(Value::Null),
            Self::List(inner) => {
                let items = value.as_list().ok_or_else(|| FieldError::ExpectedList {
                    ty: self.to_string(),
                })?;
                items
                    .iter()
                    .map(|item| inner.serialize_leaf(item))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array)
            }
            Self::Scalar(kind) => Ok(kind.coerce(value)?.into()),
            Self::Enum(kind) => Ok(kind.coerce(value)?.into()),
            Self::Object(_) | Self::Union(_) => Err(FieldError::new(format!(
                "Type {self} is not a leaf type"
            ))),
        }
    }
}

impl<Ctx> fmt::Display for Type<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonNullable(inner) => write!(f, "{inner}!"),
            Self::List(inner) => write!(f, "[{inner}]"),
            named => match named.name() {
                Some(name) => f.write_str(&name),
                None => Ok(()),
            },
        }
    }
}

impl<Ctx> fmt::Debug for Type<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({self})")
    }
}
