//! Field descriptors.
//!
//! A field binds a name, ordered arguments, a declared output type and a
//! resolver. Building a field is pure data assembly; the resolver is only
//! ever invoked by an execution engine through [`Field::resolve`] and its
//! checked variants.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::trace;

use crate::args::{Argument, Arguments, coerce_arguments};
use crate::error::SchemaError;
use crate::resolver::{FieldResult, Resolver, ResolverContext, Thunk};
use crate::types::Type;
use crate::value::FieldValue;

/// A named, typed, resolvable field.
pub struct Field<Ctx> {
    name: String,
    description: Option<String>,
    deprecation: Option<String>,
    args: Vec<Argument>,
    ty: Type<Ctx>,
    resolve: Resolver<Ctx>,
}

impl<Ctx> Clone for Field<Ctx> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            deprecation: self.deprecation.clone(),
            args: self.args.clone(),
            ty: self.ty.clone(),
            resolve: Arc::clone(&self.resolve),
        }
    }
}

impl<Ctx> Field<Ctx> {
    /// Creates a field without arguments.
    pub fn new<F>(name: impl Into<String>, ty: Type<Ctx>, resolve: F) -> Self
    where
        F: for<'a> Fn(ResolverContext<'a, Ctx>) -> Thunk<'a> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: None,
            deprecation: None,
            args: Vec::new(),
            ty,
            resolve: Arc::new(resolve),
        }
    }

    /// Appends an argument.
    #[must_use]
    pub fn argument(mut self, arg: Argument) -> Self {
        self.args.push(arg);
        self
    }

    /// Appends several arguments in order.
    #[must_use]
    pub fn arguments(mut self, args: impl IntoIterator<Item = Argument>) -> Self {
        self.args.extend(args);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the field as deprecated.
    #[must_use]
    pub fn deprecated(mut self, reason: impl Into<String>) -> Self {
        self.deprecation = Some(reason.into());
        self
    }

    /// The field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared output type.
    pub fn ty(&self) -> &Type<Ctx> {
        &self.ty
    }

    /// The declared arguments in order.
    pub fn args(&self) -> &[Argument] {
        &self.args
    }

    /// The description, if any.
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The deprecation reason, if deprecated.
    pub fn deprecation_reason(&self) -> Option<&str> {
        self.deprecation.as_deref()
    }

    /// Invokes the resolver. `source` is `None` for root fields.
    pub fn resolve<'a>(
        &self,
        source: Option<&'a FieldValue>,
        ctx: &'a Ctx,
        args: &'a Arguments,
    ) -> Thunk<'a> {
        trace!(field = %self.name, root = source.is_none(), "Invoking resolver");
        (self.resolve)(ResolverContext { source, ctx, args })
    }

    /// Invokes the resolver, awaits it and checks the value against the declared type.
    pub async fn resolve_checked(
        &self,
        source: Option<&FieldValue>,
        ctx: &Ctx,
        args: &Arguments,
    ) -> FieldResult {
        let value = self.resolve(source, ctx, args).await?;
        self.ty.check_output(&value)?;
        Ok(value)
    }

    /// Coerces raw argument inputs, then resolves and checks the field.
    ///
    /// Coercion failures surface as `FieldError::Argument` without invoking
    /// the resolver.
    pub async fn coerce_and_resolve(
        &self,
        source: Option<&FieldValue>,
        ctx: &Ctx,
        inputs: &Map<String, Value>,
    ) -> FieldResult {
        let args = coerce_arguments(&self.args, inputs)?;
        self.resolve_checked(source, ctx, &args).await
    }
}

impl<Ctx> fmt::Debug for Field<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// Checks field names within `scope` and argument names within each field.
pub(crate) fn check_unique_fields<Ctx>(
    scope: &str,
    fields: &[Field<Ctx>],
) -> Result<(), SchemaError> {
    let mut names = HashSet::new();
    for field in fields {
        if !names.insert(field.name()) {
            return Err(SchemaError::duplicate_field(scope, field.name()));
        }
        let mut arg_names = HashSet::new();
        for arg in field.args() {
            if !arg_names.insert(arg.name()) {
                return Err(SchemaError::duplicate_argument(scope, field.name(), arg.name()));
            }
        }
    }
    Ok(())
}
