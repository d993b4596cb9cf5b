//! Schema aggregate and builder.
//!
//! A [`Schema`] holds the root query fields and optional root mutation
//! fields. Root fields are resolved without a source value.
//!
//! ## Validation
//!
//! Building a schema always checks the root lists:
//! 1. Field names are unique within `Query` and within `Mutation`
//! 2. Argument names are unique on every root field
//! 3. Root type references have no nested `NonNullable` and respect
//!    `max_wrapper_depth`
//!
//! With `validate_reachable` enabled the same checks run over every type
//! reachable from the roots, forcing lazy field lists (see [`validate`]).

mod sdl;
pub mod validate;

use tracing::debug;

use crate::config::SchemaConfig;
use crate::error::SchemaError;
use crate::field::Field;

/// Scope name used for root query fields in errors and SDL.
pub const QUERY_SCOPE: &str = "Query";

/// Scope name used for root mutation fields in errors and SDL.
pub const MUTATION_SCOPE: &str = "Mutation";

/// The root aggregate of the type model.
pub struct Schema<Ctx> {
    queries: Vec<Field<Ctx>>,
    mutations: Option<Vec<Field<Ctx>>>,
    config: SchemaConfig,
}

impl<Ctx> Schema<Ctx> {
    /// Builds a schema with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns a `SchemaError` if root validation fails.
    pub fn new(
        queries: Vec<Field<Ctx>>,
        mutations: Option<Vec<Field<Ctx>>>,
    ) -> Result<Self, SchemaError> {
        let builder = SchemaBuilder::new().queries(queries);
        match mutations {
            Some(mutations) => builder.mutations(mutations).build(),
            None => builder.build(),
        }
    }

    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> SchemaBuilder<Ctx> {
        SchemaBuilder::new()
    }

    /// Root query fields in declaration order.
    pub fn queries(&self) -> &[Field<Ctx>] {
        &self.queries
    }

    /// Root mutation fields, if the schema declares mutations.
    pub fn mutations(&self) -> Option<&[Field<Ctx>]> {
        self.mutations.as_deref()
    }

    /// Looks up a root query field.
    pub fn query(&self, name: &str) -> Option<&Field<Ctx>> {
        self.queries.iter().find(|field| field.name() == name)
    }

    /// Looks up a root mutation field.
    pub fn mutation(&self, name: &str) -> Option<&Field<Ctx>> {
        self.mutations()?.iter().find(|field| field.name() == name)
    }

    /// The configuration the schema was built with.
    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Validates the root lists and every reachable type.
    ///
    /// This forces all lazy field lists reachable from the roots.
    pub fn validate(&self) -> Result<(), SchemaError> {
        validate::validate_roots(self)?;
        validate::validate_reachable(self)
    }

    /// Renders the schema as SDL.
    pub fn to_sdl(&self) -> String {
        sdl::print_schema(self)
    }
}

impl<Ctx> std::fmt::Debug for Schema<Ctx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("queries", &self.queries.len())
            .field("mutations", &self.mutations.as_ref().map(Vec::len))
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for constructing a [`Schema`].
pub struct SchemaBuilder<Ctx> {
    queries: Vec<Field<Ctx>>,
    mutations: Option<Vec<Field<Ctx>>>,
    config: SchemaConfig,
}

impl<Ctx> Default for SchemaBuilder<Ctx> {
    fn default() -> Self {
        Self {
            queries: Vec::new(),
            mutations: None,
            config: SchemaConfig::default(),
        }
    }
}

impl<Ctx> SchemaBuilder<Ctx> {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a root query field.
    #[must_use]
    pub fn query(mut self, field: Field<Ctx>) -> Self {
        self.queries.push(field);
        self
    }

    /// Adds several root query fields in order.
    #[must_use]
    pub fn queries(mut self, fields: impl IntoIterator<Item = Field<Ctx>>) -> Self {
        self.queries.extend(fields);
        self
    }

    /// Adds a root mutation field, declaring the mutation list if needed.
    #[must_use]
    pub fn mutation(mut self, field: Field<Ctx>) -> Self {
        self.mutations.get_or_insert_with(Vec::new).push(field);
        self
    }

    /// Adds several root mutation fields, declaring the mutation list even if empty.
    #[must_use]
    pub fn mutations(mut self, fields: impl IntoIterator<Item = Field<Ctx>>) -> Self {
        self.mutations.get_or_insert_with(Vec::new).extend(fields);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: SchemaConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds and validates the schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidConfig` for a bad configuration, or the
    /// first schema-shape error found by validation.
    pub fn build(self) -> Result<Schema<Ctx>, SchemaError> {
        self.config.validate()?;
        debug!(
            queries = self.queries.len(),
            mutations = self.mutations.as_ref().map_or(0, Vec::len),
            "Building schema"
        );

        let schema = Schema {
            queries: self.queries,
            mutations: self.mutations,
            config: self.config,
        };

        validate::validate_roots(&schema)?;
        if schema.config.validate_reachable {
            validate::validate_reachable(&schema)?;
        }

        debug!("Schema build complete");
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::ScalarArg;
    use crate::resolver::Thunk;
    use crate::types::Type;

    fn hello() -> Field<()> {
        Field::new("hello", Type::string(), |_| Thunk::value("world"))
    }

    #[test]
    fn test_queries_only() {
        let schema = Schema::new(vec![hello()], None).unwrap();
        assert_eq!(schema.queries().len(), 1);
        assert!(schema.mutations().is_none());
        assert!(schema.query("hello").is_some());
        assert!(schema.mutation("hello").is_none());
    }

    #[test]
    fn test_empty_queries_allowed() {
        let schema = Schema::<()>::new(Vec::new(), None).unwrap();
        assert!(schema.queries().is_empty());
    }

    #[test]
    fn test_duplicate_query_rejected() {
        let err = Schema::new(vec![hello(), hello()], None).unwrap_err();
        assert_eq!(err, SchemaError::duplicate_field(QUERY_SCOPE, "hello"));
    }

    #[test]
    fn test_same_name_in_query_and_mutation_allowed() {
        let schema = Schema::builder().query(hello()).mutation(hello()).build().unwrap();
        assert!(schema.mutation("hello").is_some());
    }

    #[test]
    fn test_duplicate_mutation_rejected() {
        let err = Schema::builder()
            .mutations([hello(), hello()])
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::duplicate_field(MUTATION_SCOPE, "hello"));
    }

    #[test]
    fn test_duplicate_root_argument_rejected() {
        let id = ScalarArg::id();
        let field = hello().arguments([id.arg("id"), id.arg("id")]);
        let err = Schema::new(vec![field], None).unwrap_err();
        assert_eq!(err, SchemaError::duplicate_argument(QUERY_SCOPE, "hello", "id"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SchemaConfig {
            max_wrapper_depth: 0,
            ..SchemaConfig::default()
        };
        let err = Schema::<()>::builder().config(config).build().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }
}
