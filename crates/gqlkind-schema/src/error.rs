//! Error types for schema construction, value coercion and field resolution.
//!
//! The three enums mirror the three failure classes of the type model:
//!
//! - [`SchemaError`] - the schema itself is malformed (duplicate names, nested
//!   `NonNullable`, a union resolving to a type it never declared)
//! - [`CoercionError`] - a scalar, enum or argument was handed a value it
//!   cannot represent
//! - [`FieldError`] - a single field failed; an execution engine reports it
//!   against that field and keeps resolving its siblings

/// Errors describing a malformed schema.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// Two fields with the same name in one object or root list.
    #[error("Duplicate field '{field}' in {scope}")]
    DuplicateField {
        /// The owning object name, or `Query` / `Mutation` for root fields.
        scope: String,
        /// The repeated field name.
        field: String,
    },

    /// Two arguments with the same name on one field.
    #[error("Duplicate argument '{argument}' on {scope}.{field}")]
    DuplicateArgument {
        /// The owning object name, or `Query` / `Mutation` for root fields.
        scope: String,
        /// The field declaring the arguments.
        field: String,
        /// The repeated argument name.
        argument: String,
    },

    /// An enum listing the same value twice.
    #[error("Duplicate value '{value}' in enum {name}")]
    DuplicateEnumValue {
        /// The enum name.
        name: String,
        /// The repeated value.
        value: String,
    },

    /// An enum without any values.
    #[error("Enum {0} declares no values")]
    EmptyEnum(String),

    /// A union without any member types.
    #[error("Union {0} declares no member types")]
    EmptyUnion(String),

    /// `NonNullable` wrapped directly around another `NonNullable`.
    #[error("NonNullable cannot wrap another NonNullable ({ty})")]
    NestedNonNullable {
        /// SDL rendering of the offending inner type.
        ty: String,
    },

    /// A union discriminator returned an object type outside the union.
    #[error("Union {union} resolved to undeclared member type {member}")]
    UndeclaredUnionMember {
        /// The union identity.
        union: String,
        /// The object type that was returned.
        member: String,
    },

    /// A type reference nests more List/NonNullable wrappers than allowed.
    #[error("Type {ty} nests {depth} wrappers, maximum allowed is {max}")]
    WrapperDepthExceeded {
        /// SDL rendering of the type reference.
        ty: String,
        /// Actual wrapper depth.
        depth: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Schema configuration values are invalid.
    #[error("Invalid schema configuration: {0}")]
    InvalidConfig(String),
}

impl SchemaError {
    /// Create a new DuplicateField error
    pub fn duplicate_field(scope: impl Into<String>, field: impl Into<String>) -> Self {
        Self::DuplicateField {
            scope: scope.into(),
            field: field.into(),
        }
    }

    /// Create a new DuplicateArgument error
    pub fn duplicate_argument(
        scope: impl Into<String>,
        field: impl Into<String>,
        argument: impl Into<String>,
    ) -> Self {
        Self::DuplicateArgument {
            scope: scope.into(),
            field: field.into(),
            argument: argument.into(),
        }
    }

    /// Create a new UndeclaredUnionMember error
    pub fn undeclared_union_member(union: impl Into<String>, member: impl Into<String>) -> Self {
        Self::UndeclaredUnionMember {
            union: union.into(),
            member: member.into(),
        }
    }

    /// Returns a stable, machine-readable code for this error.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateField { .. } => "DUPLICATE_FIELD",
            Self::DuplicateArgument { .. } => "DUPLICATE_ARGUMENT",
            Self::DuplicateEnumValue { .. } => "DUPLICATE_ENUM_VALUE",
            Self::EmptyEnum(_) => "EMPTY_ENUM",
            Self::EmptyUnion(_) => "EMPTY_UNION",
            Self::NestedNonNullable { .. } => "NESTED_NON_NULLABLE",
            Self::UndeclaredUnionMember { .. } => "UNDECLARED_UNION_MEMBER",
            Self::WrapperDepthExceeded { .. } => "WRAPPER_DEPTH_EXCEEDED",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }
}

/// Errors raised when a value cannot be represented by a scalar, enum or argument.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoercionError {
    /// A null value reached a coercer that has no null representation.
    #[error("{scalar} cannot represent a null value")]
    Null {
        /// The scalar name.
        scalar: String,
    },

    /// The value has the wrong shape for the scalar.
    #[error("{scalar} cannot represent {found}")]
    ExpectedType {
        /// The scalar name.
        scalar: String,
        /// Short description of the offending value.
        found: String,
    },

    /// The value has the right shape but does not fit the scalar's range.
    #[error("{scalar} cannot represent out-of-range value {value}")]
    OutOfRange {
        /// The scalar name.
        scalar: String,
        /// The offending value.
        value: String,
    },

    /// The value is not one of the enum's declared values.
    #[error("'{value}' is not a value of enum {name}")]
    NotInEnum {
        /// The enum name.
        name: String,
        /// The offending value.
        value: String,
    },

    /// Custom coercion failure raised by a user-supplied coercer.
    #[error("{scalar}: {message}")]
    Custom {
        /// The scalar name.
        scalar: String,
        /// Failure description.
        message: String,
    },
}

impl CoercionError {
    /// Create a new ExpectedType error
    pub fn expected_type(scalar: impl Into<String>, found: impl Into<String>) -> Self {
        Self::ExpectedType {
            scalar: scalar.into(),
            found: found.into(),
        }
    }

    /// Create a new OutOfRange error
    pub fn out_of_range(scalar: impl Into<String>, value: impl ToString) -> Self {
        Self::OutOfRange {
            scalar: scalar.into(),
            value: value.to_string(),
        }
    }

    /// Create a new Custom error
    pub fn custom(scalar: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Custom {
            scalar: scalar.into(),
            message: message.into(),
        }
    }
}

/// Errors isolated to the resolution of a single field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    /// The resolver itself failed.
    #[error("{message}")]
    Resolver {
        /// Failure description.
        message: String,
    },

    /// A supplied argument could not be coerced.
    #[error("Invalid value for argument '{argument}': {source}")]
    Argument {
        /// The argument name.
        argument: String,
        /// The underlying coercion failure.
        #[source]
        source: CoercionError,
    },

    /// The resolved value could not be coerced for output.
    #[error(transparent)]
    Coercion(#[from] CoercionError),

    /// A null value was produced for a non-nullable type.
    #[error("Cannot return null for non-nullable type {ty}")]
    NullInNonNull {
        /// SDL rendering of the non-nullable type.
        ty: String,
    },

    /// A non-list value was produced for a list type.
    #[error("Expected a list value for type {ty}")]
    ExpectedList {
        /// SDL rendering of the list type.
        ty: String,
    },

    /// The schema contract was violated while resolving.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A resolver needed a parent value but was invoked as a root field.
    #[error("Field was resolved without a source value")]
    MissingSource,

    /// The parent value is not of the type the resolver expected.
    #[error("Source value is not a {expected}")]
    SourceType {
        /// The Rust type name the resolver asked for.
        expected: &'static str,
    },

    /// A positional or named argument was read but never declared.
    #[error("Argument {0} is not declared on this field")]
    MissingArgument(String),

    /// An argument was read as the wrong Rust type.
    #[error("Argument '{argument}' is not a {expected}")]
    ArgumentType {
        /// The argument name.
        argument: String,
        /// The Rust type name the resolver asked for.
        expected: &'static str,
    },
}

impl FieldError {
    /// Create a new resolver failure
    pub fn new(message: impl Into<String>) -> Self {
        Self::Resolver {
            message: message.into(),
        }
    }

    /// Returns a stable, machine-readable code for this error.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Resolver { .. } => "RESOLVER_ERROR",
            Self::Argument { .. } => "INVALID_ARGUMENT",
            Self::Coercion(_) => "COERCION_ERROR",
            Self::NullInNonNull { .. } | Self::ExpectedList { .. } => "INVALID_OUTPUT",
            Self::Schema(err) => err.error_code(),
            Self::MissingSource | Self::SourceType { .. } => "INVALID_SOURCE",
            Self::MissingArgument(_) | Self::ArgumentType { .. } => "INVALID_ARGUMENT",
        }
    }

    /// Check if this error was caused by client-supplied input
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Argument { .. })
    }
}
