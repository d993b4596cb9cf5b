//! SDL rendering.
//!
//! Root lists print as `type Query` and `type Mutation`, followed by every
//! named type reachable from them in discovery order. Built-in scalars are
//! not printed. Printing forces every reachable lazy field list.
//!
//! Unions without an explicit name have no valid SDL identifier; they print
//! under their member names joined with `Or` (`BookOrUser`).

use std::fmt::{self, Write};

use indexmap::IndexMap;

use super::{MUTATION_SCOPE, QUERY_SCOPE, Schema};
use crate::args::Argument;
use crate::field::Field;
use crate::types::{BUILTIN_SCALARS, EnumKind, ObjectKind, ScalarKind, Type, UnionKind};

pub(crate) fn print_schema<Ctx>(schema: &Schema<Ctx>) -> String {
    let mut printer = Printer {
        schema,
        types: IndexMap::new(),
    };
    printer.collect_fields(schema.queries());
    if let Some(mutations) = schema.mutations() {
        printer.collect_fields(mutations);
    }
    printer.to_string()
}

enum Named<'s, Ctx> {
    Object(&'s ObjectKind<Ctx>),
    Union(&'s UnionKind<Ctx>),
    Enum(&'s EnumKind),
    Scalar(&'s ScalarKind),
    /// A custom scalar only known from an argument declaration.
    ArgScalar,
}

struct Printer<'s, Ctx> {
    schema: &'s Schema<Ctx>,
    types: IndexMap<String, Named<'s, Ctx>>,
}

impl<'s, Ctx> Printer<'s, Ctx> {
    fn collect_fields(&mut self, fields: &'s [Field<Ctx>]) {
        for field in fields {
            for arg in field.args() {
                let scalar = arg.scalar_name();
                if !BUILTIN_SCALARS.contains(&scalar) && !self.types.contains_key(scalar) {
                    self.types.insert(scalar.to_string(), Named::ArgScalar);
                }
            }
            self.collect_type(field.ty().named_type());
        }
    }

    fn collect_type(&mut self, ty: &'s Type<Ctx>) {
        match ty {
            Type::Object(kind) => self.collect_object(kind),
            Type::Union(kind) => {
                let name = union_name(kind);
                if self.types.contains_key(&name) {
                    return;
                }
                self.types.insert(name, Named::Union(kind));
                for member in kind.types() {
                    self.collect_object(member);
                }
            }
            Type::Enum(kind) => {
                self.types
                    .entry(kind.name().to_string())
                    .or_insert(Named::Enum(kind));
            }
            Type::Scalar(kind) => {
                if kind.is_builtin() {
                    return;
                }
                // A later ScalarKind beats an earlier argument-only mention.
                let replace = matches!(self.types.get(kind.name()), None | Some(Named::ArgScalar));
                if replace {
                    self.types.insert(kind.name().to_string(), Named::Scalar(kind));
                }
            }
            Type::NonNullable(inner) | Type::List(inner) => self.collect_type(inner.named_type()),
        }
    }

    fn collect_object(&mut self, kind: &'s ObjectKind<Ctx>) {
        if self.types.contains_key(kind.name()) {
            return;
        }
        self.types.insert(kind.name().to_string(), Named::Object(kind));
        self.collect_fields(kind.fields());
    }

    fn descriptions(&self) -> bool {
        self.schema.config().sdl_descriptions
    }

    fn write_description(
        &self,
        f: &mut fmt::Formatter<'_>,
        text: Option<&str>,
        indent: &str,
    ) -> fmt::Result {
        match text {
            Some(text) if self.descriptions() => {
                writeln!(f, "{indent}\"\"\"{}\"\"\"", text.replace("\"\"\"", "\\\"\"\""))
            }
            _ => Ok(()),
        }
    }

    fn write_object(
        &self,
        f: &mut fmt::Formatter<'_>,
        name: &str,
        fields: &[Field<Ctx>],
    ) -> fmt::Result {
        writeln!(f, "type {name} {{")?;
        for field in fields {
            self.write_description(f, field.description_text(), "  ")?;
            write!(f, "  {}", field.name())?;
            write_arguments(f, field.args())?;
            write!(f, ": {}", type_ref(field.ty()))?;
            if let Some(reason) = field.deprecation_reason() {
                write!(f, " @deprecated(reason: {})", quote(reason))?;
            }
            writeln!(f)?;
        }
        writeln!(f, "}}")
    }

    fn write_named(
        &self,
        f: &mut fmt::Formatter<'_>,
        name: &str,
        named: &Named<'s, Ctx>,
    ) -> fmt::Result {
        match named {
            Named::Object(kind) => {
                self.write_description(f, kind.description_text(), "")?;
                self.write_object(f, name, kind.fields())
            }
            Named::Union(kind) => {
                self.write_description(f, kind.description_text(), "")?;
                let members = kind
                    .types()
                    .iter()
                    .map(|member| member.name())
                    .collect::<Vec<_>>()
                    .join(" | ");
                writeln!(f, "union {name} = {members}")
            }
            Named::Enum(kind) => {
                self.write_description(f, kind.description_text(), "")?;
                writeln!(f, "enum {name} {{")?;
                for value in kind.values() {
                    writeln!(f, "  {value}")?;
                }
                writeln!(f, "}}")
            }
            Named::Scalar(kind) => {
                self.write_description(f, kind.description_text(), "")?;
                writeln!(f, "scalar {name}")
            }
            Named::ArgScalar => writeln!(f, "scalar {name}"),
        }
    }
}

impl<Ctx> fmt::Display for Printer<'_, Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_object(f, QUERY_SCOPE, self.schema.queries())?;
        if let Some(mutations) = self.schema.mutations() {
            writeln!(f)?;
            self.write_object(f, MUTATION_SCOPE, mutations)?;
        }
        for (name, named) in &self.types {
            writeln!(f)?;
            self.write_named(f, name, named)?;
        }
        Ok(())
    }
}

fn write_arguments(f: &mut fmt::Formatter<'_>, args: &[Argument]) -> fmt::Result {
    if args.is_empty() {
        return Ok(());
    }
    f.write_char('(')?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}: {}", arg.name(), arg.type_ref())?;
    }
    f.write_char(')')
}

/// Renders a type reference using SDL names.
fn type_ref<Ctx>(ty: &Type<Ctx>) -> String {
    match ty {
        Type::NonNullable(inner) => format!("{}!", type_ref(inner)),
        Type::List(inner) => format!("[{}]", type_ref(inner)),
        Type::Union(kind) => union_name(kind),
        named => named.to_string(),
    }
}

fn union_name<Ctx>(kind: &UnionKind<Ctx>) -> String {
    if kind.has_explicit_name() {
        return kind.name().into_owned();
    }
    kind.types()
        .iter()
        .map(|member| member.name())
        .collect::<Vec<_>>()
        .join("Or")
}

fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{text}\""))
}
