//! Union kinds: a set of candidate objects and a runtime discriminator.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use tracing::{trace, warn};

use super::ObjectKind;
use crate::error::SchemaError;
use crate::value::FieldValue;

/// Discriminator choosing the member object that describes a value.
pub type ResolveTypeFn<Ctx> = Arc<dyn Fn(&FieldValue) -> Arc<ObjectKind<Ctx>> + Send + Sync>;

/// A union of object types.
///
/// Membership is not checked at construction because member objects may
/// still be under lazy construction. [`UnionKind::resolve_member`] checks the
/// discriminator's answer every time a value is resolved.
pub struct UnionKind<Ctx> {
    name: Option<String>,
    description: Option<String>,
    types: Vec<Arc<ObjectKind<Ctx>>>,
    resolve_type: ResolveTypeFn<Ctx>,
}

impl<Ctx> UnionKind<Ctx> {
    /// Creates a union from its members and discriminator.
    pub fn new<I, F>(types: I, resolve_type: F) -> Self
    where
        I: IntoIterator<Item = Arc<ObjectKind<Ctx>>>,
        F: Fn(&FieldValue) -> Arc<ObjectKind<Ctx>> + Send + Sync + 'static,
    {
        Self {
            name: None,
            description: None,
            types: types.into_iter().collect(),
            resolve_type: Arc::new(resolve_type),
        }
    }

    /// Gives the union an explicit name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The explicit name, or the member names joined with `|`.
    pub fn name(&self) -> Cow<'_, str> {
        match &self.name {
            Some(name) => Cow::Borrowed(name.as_str()),
            None => Cow::Owned(
                self.types
                    .iter()
                    .map(|member| member.name())
                    .collect::<Vec<_>>()
                    .join("|"),
            ),
        }
    }

    /// Returns whether the union was given an explicit name.
    #[must_use]
    pub fn has_explicit_name(&self) -> bool {
        self.name.is_some()
    }

    /// The description, if any.
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The candidate member objects in declaration order.
    pub fn types(&self) -> &[Arc<ObjectKind<Ctx>>] {
        &self.types
    }

    /// Returns whether an object named `name` is a member.
    #[must_use]
    pub fn is_member(&self, name: &str) -> bool {
        self.types.iter().any(|member| member.name() == name)
    }

    /// Runs the discriminator and checks its answer is a declared member.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UndeclaredUnionMember` if the discriminator picks
    /// an object that is not one of [`UnionKind::types`].
    pub fn resolve_member(&self, value: &FieldValue) -> Result<Arc<ObjectKind<Ctx>>, SchemaError> {
        let member = (self.resolve_type)(value);
        if self.is_member(member.name()) {
            trace!(union = %self.name(), member = %member.name(), "Resolved union member");
            Ok(member)
        } else {
            warn!(
                union = %self.name(),
                member = %member.name(),
                "Union resolved to undeclared member"
            );
            Err(SchemaError::undeclared_union_member(self.name(), member.name()))
        }
    }

    /// Checks the union declares at least one member.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.types.is_empty() {
            return Err(SchemaError::EmptyUnion(self.name().into_owned()));
        }
        Ok(())
    }
}

impl<Ctx> fmt::Debug for UnionKind<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnionKind")
            .field("name", &self.name())
            .field("types", &self.types)
            .finish_non_exhaustive()
    }
}
