//! # gqlkind-schema
//!
//! Typed schema-definition layer for GraphQL-like APIs.
//!
//! This crate describes a type system for a query API and binds resolver
//! functions to fields. It provides:
//!
//! - A closed [`Type`] sum over objects, unions, scalars, enums, lists and
//!   non-null wrappers
//! - Lazily produced object field lists, so cyclic type graphs can be built
//!   from `LazyLock` statics
//! - Two-stage scalar arguments: one [`ScalarArg`] coercion shared by many
//!   named [`Argument`]s
//! - Resolvers returning a [`Thunk`], a result that is either ready or a
//!   future
//! - A [`Schema`] of root queries and optional mutations, with validation
//!   and SDL printing
//!
//! Parsing query documents and executing them are left to an execution
//! engine built on top of this model.
//!
//! ## Example
//!
//! ```ignore
//! let user_type = Type::enumeration(EnumKind::new("UserType", ["MORTAL", "ADMIN"]));
//!
//! let schema = Schema::builder()
//!     .query(
//!         Field::new("role", Type::non_null(user_type), |_| Thunk::value("ADMIN"))
//!             .argument(ScalarArg::int().arg("age")),
//!     )
//!     .build()?;
//!
//! println!("{}", schema.to_sdl());
//! ```
//!
//! ## Configuration
//!
//! Add to the application's TOML file:
//!
//! ```toml
//! [schema]
//! validate_reachable = false
//! max_wrapper_depth = 8
//! sdl_descriptions = true
//! ```
//!
//! ## Modules
//!
//! - [`types`] - The type model and the built-in scalars
//! - [`args`] - Argument builders and coerced argument lists
//! - [`field`] - Field descriptors
//! - [`resolver`] - Resolver functions and thunks
//! - [`schema`] - Schema aggregate, validation and SDL
//! - [`value`] - Dynamic resolved values
//! - [`config`] - Configuration options
//! - [`error`] - Error types

pub mod args;
pub mod config;
pub mod error;
pub mod field;
pub mod resolver;
pub mod schema;
pub mod types;
pub mod value;

// Re-export main types
pub use args::{ArgValue, Argument, Arguments, ScalarArg, coerce_arguments};
pub use config::SchemaConfig;
pub use error::{CoercionError, FieldError, SchemaError};
pub use field::Field;
pub use resolver::{FieldResult, Resolver, ResolverContext, Thunk};
pub use schema::{Schema, SchemaBuilder};
pub use types::{EnumKind, ObjectKind, ScalarKind, Type, UnionKind};
pub use value::{FieldValue, OutputScalar};

/// Result type for schema construction.
pub type Result<T> = std::result::Result<T, SchemaError>;
