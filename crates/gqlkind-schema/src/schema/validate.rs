//! Schema-shape validation.
//!
//! [`validate_roots`] only looks at the root field lists and never forces a
//! lazy object. [`validate_reachable`] walks every named type reachable from
//! the roots, forcing lazy field lists on the way. Each named type is
//! visited once per kind and name, so cyclic graphs terminate.
//!
//! Duplicate object names across the graph are not detected here.

use std::collections::HashSet;

use tracing::{debug, trace};

use super::{MUTATION_SCOPE, QUERY_SCOPE, Schema};
use crate::error::SchemaError;
use crate::field::{Field, check_unique_fields};
use crate::types::{ObjectKind, Type};

/// Checks the root lists and the type references of root fields.
pub fn validate_roots<Ctx>(schema: &Schema<Ctx>) -> Result<(), SchemaError> {
    let max_depth = schema.config().max_wrapper_depth;

    check_unique_fields(QUERY_SCOPE, schema.queries())?;
    for field in schema.queries() {
        check_type_ref(field.ty(), max_depth)?;
    }

    if let Some(mutations) = schema.mutations() {
        check_unique_fields(MUTATION_SCOPE, mutations)?;
        for field in mutations {
            check_type_ref(field.ty(), max_depth)?;
        }
    }

    Ok(())
}

/// Validates every named type reachable from the root fields.
pub fn validate_reachable<Ctx>(schema: &Schema<Ctx>) -> Result<(), SchemaError> {
    let mut walker = Walker {
        max_depth: schema.config().max_wrapper_depth,
        visited: HashSet::new(),
    };

    let roots = schema
        .queries()
        .iter()
        .chain(schema.mutations().unwrap_or_default());
    for field in roots {
        walker.visit_field(field)?;
    }

    debug!(types = walker.visited.len(), "Validated reachable types");
    Ok(())
}

/// Checks one type reference: no nested `NonNullable`, bounded wrapper depth.
pub fn check_type_ref<Ctx>(ty: &Type<Ctx>, max_depth: usize) -> Result<(), SchemaError> {
    let mut current = ty;
    while let Some(inner) = current.of_type() {
        if current.is_non_null() && inner.is_non_null() {
            return Err(SchemaError::NestedNonNullable {
                ty: inner.to_string(),
            });
        }
        current = inner;
    }

    let depth = ty.wrapper_depth();
    if depth > max_depth {
        return Err(SchemaError::WrapperDepthExceeded {
            ty: ty.to_string(),
            depth,
            max: max_depth,
        });
    }
    Ok(())
}

struct Walker {
    max_depth: usize,
    visited: HashSet<(&'static str, String)>,
}

impl Walker {
    fn visit_field<Ctx>(&mut self, field: &Field<Ctx>) -> Result<(), SchemaError> {
        check_type_ref(field.ty(), self.max_depth)?;
        self.visit_named(field.ty().named_type())
    }

    fn visit_named<Ctx>(&mut self, ty: &Type<Ctx>) -> Result<(), SchemaError> {
        let Some(name) = ty.name() else {
            return Ok(());
        };
        if !self.visited.insert((ty.kind_name(), name.into_owned())) {
            return Ok(());
        }

        match ty {
            Type::Object(kind) => self.visit_object(kind),
            Type::Union(kind) => {
                kind.validate()?;
                for member in kind.types() {
                    if self.visited.insert(("Object", member.name().to_string())) {
                        self.visit_object(member)?;
                    }
                }
                Ok(())
            }
            Type::Enum(kind) => kind.validate(),
            Type::Scalar(_) => Ok(()),
            Type::NonNullable(_) | Type::List(_) => Ok(()),
        }
    }

    fn visit_object<Ctx>(&mut self, kind: &ObjectKind<Ctx>) -> Result<(), SchemaError> {
        trace!(object = %kind.name(), "Validating object");
        kind.validate()?;
        for field in kind.fields() {
            self.visit_field(field)?;
        }
        Ok(())
    }
}
