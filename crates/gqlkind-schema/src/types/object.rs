//! Object kinds with eager or lazily produced field lists.
//!
//! Lazy field lists are what make cyclic type graphs buildable: a producer
//! can mention object types that do not exist yet when the object itself is
//! constructed. The producer runs the first time [`ObjectKind::fields`] is
//! called and never again; concurrent first callers block on the same
//! evaluation instead of running the producer twice.
//!
//! # Example
//!
//! ```ignore
//! static USER: LazyLock<Arc<ObjectKind<Ctx>>> = LazyLock::new(|| {
//!     Arc::new(ObjectKind::lazy("User", || {
//!         vec![Field::new("books", Type::list(Type::from(Arc::clone(&BOOK))), resolve_books)]
//!     }))
//! });
//!
//! static BOOK: LazyLock<Arc<ObjectKind<Ctx>>> = LazyLock::new(|| {
//!     Arc::new(ObjectKind::lazy("Book", || {
//!         vec![Field::new("author", Type::from(Arc::clone(&USER)), resolve_author)]
//!     }))
//! });
//! ```

use std::fmt;
use std::sync::OnceLock;

use tracing::debug;

use crate::error::SchemaError;
use crate::field::{Field, check_unique_fields};

type FieldProducer<Ctx> = Box<dyn Fn() -> Vec<Field<Ctx>> + Send + Sync>;

/// A named collection of fields.
pub struct ObjectKind<Ctx> {
    name: String,
    description: Option<String>,
    fields: OnceLock<Vec<Field<Ctx>>>,
    producer: Option<FieldProducer<Ctx>>,
}

impl<Ctx> ObjectKind<Ctx> {
    /// Creates an object with an already materialized field list.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::DuplicateField` or `SchemaError::DuplicateArgument`
    /// if names repeat within the object or within one field's arguments.
    pub fn new(name: impl Into<String>, fields: Vec<Field<Ctx>>) -> Result<Self, SchemaError> {
        let name = name.into();
        check_unique_fields(&name, &fields)?;
        Ok(Self {
            name,
            description: None,
            fields: OnceLock::from(fields),
            producer: None,
        })
    }

    /// Creates an object whose fields are produced on first access.
    ///
    /// The producer must not read this object's own field list.
    pub fn lazy<F>(name: impl Into<String>, producer: F) -> Self
    where
        F: Fn() -> Vec<Field<Ctx>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: None,
            fields: OnceLock::new(),
            producer: Some(Box::new(producer)),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The object name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The description, if any.
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The field list, forcing the producer on first access.
    pub fn fields(&self) -> &[Field<Ctx>] {
        self.fields.get_or_init(|| {
            let fields = self.producer.as_ref().map(|produce| produce()).unwrap_or_default();
            debug!(object = %self.name, fields = fields.len(), "Materialized lazy field list");
            fields
        })
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field<Ctx>> {
        self.fields().iter().find(|field| field.name() == name)
    }

    /// Returns whether the field list has been materialized.
    #[must_use]
    pub fn is_forced(&self) -> bool {
        self.fields.get().is_some()
    }

    /// Forces the field list and checks field and argument name uniqueness.
    pub fn validate(&self) -> Result<(), SchemaError> {
        check_unique_fields(&self.name, self.fields())
    }
}

impl<Ctx> fmt::Debug for ObjectKind<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectKind")
            .field("name", &self.name)
            .field("forced", &self.is_forced())
            .finish_non_exhaustive()
    }
}
