//! Schema normalization: resolve, infer and recurse.
//!
//! The output of [`Normalizer::normalize`] contains no references in its
//! `properties`/`items` tree and always carries a recognised `type`. Composition
//! branches (`oneOf`/`anyOf`/`allOf`) are kept verbatim and normalized lazily
//! by [`crate::composite`] when a renderer opens them.

#[cfg(test)]
mod tests;

use indexmap::IndexMap;

use crate::{
  diagnostics::{Diagnostic, Diagnostics},
  document::OpenApiDocument,
  resolver::{RefTrail, Resolver},
  schema::{ObjectOrRef, Reference, SchemaObject, SchemaOrRef, SchemaType, TypeDecl},
};

const ITEMS_FIELD_SUFFIX: &str = "[]";

/// Upper bound on `$ref` expansions within one top-level normalize call.
pub const MAX_REF_EXPANSIONS: usize = 10_000;

/// Produces fully typed, reference-free schema trees.
///
/// Shared (non-cyclic) references are expanded at every use site, so a walk
/// is capped at `expansion_limit` expansions. Past the cap, references
/// degrade to [`SchemaObject::unresolved`] and one
/// [`Diagnostic::ExpansionLimit`] is recorded.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
  resolver: Resolver<'a>,
  expansion_limit: usize,
}

/// State of one top-level walk.
#[derive(Debug, Default)]
struct Walk {
  trail: RefTrail,
  expansions: usize,
  exhausted: bool,
}

impl<'a> Normalizer<'a> {
  #[must_use]
  pub fn new(resolver: Resolver<'a>) -> Self {
    Self {
      resolver,
      expansion_limit: MAX_REF_EXPANSIONS,
    }
  }

  #[must_use]
  pub fn with_expansion_limit(mut self, limit: usize) -> Self {
    self.expansion_limit = limit;
    self
  }

  #[must_use]
  pub fn resolver(&self) -> Resolver<'a> {
    self.resolver
  }

  /// Normalizes `schema` with a fresh walk.
  ///
  /// `field` names the schema in diagnostics (e.g. `body.address.street`).
  /// Broken references become [`SchemaObject::unresolved`] and are recorded in
  /// `diagnostics`; this never fails.
  pub fn normalize(&self, schema: &SchemaOrRef, field: &str, diagnostics: &mut Diagnostics) -> SchemaObject {
    self.normalize_on(schema, field, &mut Walk::default(), diagnostics)
  }

  /// Normalizes an inline schema with a fresh walk.
  pub fn normalize_object(&self, schema: &SchemaObject, field: &str, diagnostics: &mut Diagnostics) -> SchemaObject {
    self.normalize_inline(schema, field, &mut Walk::default(), diagnostics)
  }

  /// Normalizes `schema` continuing an existing walk.
  ///
  /// Pointers entered while normalizing this subtree are popped from the
  /// trail before returning, so siblings resolve independently.
  fn normalize_on(
    &self,
    schema: &SchemaOrRef,
    field: &str,
    walk: &mut Walk,
    diagnostics: &mut Diagnostics,
  ) -> SchemaObject {
    match schema {
      ObjectOrRef::Object(inline) => self.normalize_inline(inline, field, walk, diagnostics),
      ObjectOrRef::Ref(reference) => self.expand(reference, field, walk, diagnostics),
    }
  }

  fn expand(
    &self,
    reference: &Reference,
    field: &str,
    walk: &mut Walk,
    diagnostics: &mut Diagnostics,
  ) -> SchemaObject {
    if walk.expansions >= self.expansion_limit {
      if !walk.exhausted {
        walk.exhausted = true;
        diagnostics.record(Diagnostic::ExpansionLimit {
          reference: reference.ref_path.clone(),
          field: field.to_string(),
        });
      }
      return SchemaObject::unresolved();
    }
    walk.expansions += 1;

    let mark = walk.trail.len();
    let normalized = match self.resolver.resolve_schema(&reference.ref_path, &mut walk.trail) {
      Ok(resolved) => self.normalize_inline(&resolved, field, walk, diagnostics),
      Err(error) => {
        diagnostics.record(error.into_diagnostic(field));
        SchemaObject::unresolved()
      }
    };
    walk.trail.truncate(mark);
    normalized
  }

  fn normalize_inline(
    &self,
    schema: &SchemaObject,
    field: &str,
    walk: &mut Walk,
    diagnostics: &mut Diagnostics,
  ) -> SchemaObject {
    let mut normalized = schema.clone();

    if let Some(unknown) = schema.schema_type.as_ref().and_then(TypeDecl::unknown_name)
      && schema.schema_type().is_none()
    {
      diagnostics.record(Diagnostic::UnknownSchemaType {
        type_name: unknown.to_string(),
        field: field.to_string(),
      });
    }

    let schema_type = schema.schema_type().unwrap_or_else(|| infer_type(schema));
    if schema.is_nullable() {
      normalized.nullable = Some(true);
    }
    normalized.schema_type = Some(TypeDecl::from(schema_type));

    normalized.properties = schema
      .properties
      .iter()
      .map(|(name, property)| {
        let property_field = format!("{field}.{name}");
        let property = self.normalize_on(property, &property_field, walk, diagnostics);
        (name.clone(), SchemaOrRef::Object(property))
      })
      .collect::<IndexMap<_, _>>();

    normalized.items = schema.items.as_deref().map(|items| {
      let items_field = format!("{field}{ITEMS_FIELD_SUFFIX}");
      Box::new(SchemaOrRef::Object(
        self.normalize_on(items, &items_field, walk, diagnostics),
      ))
    });

    normalized
  }
}

/// Picks a renderable type for a schema without one.
///
/// `properties` (or `additionalProperties`) wins over `items`; enums and
/// everything else are treated as strings.
#[must_use]
pub fn infer_type(schema: &SchemaObject) -> SchemaType {
  if !schema.properties.is_empty() || schema.additional_properties.is_some() {
    SchemaType::Object
  } else if schema.items.is_some() {
    SchemaType::Array
  } else {
    SchemaType::String
  }
}

/// Normalizes one schema against `document` without caching.
///
/// Diagnostics are logged and then dropped.
#[must_use]
pub fn normalize(schema: &SchemaOrRef, document: &OpenApiDocument, field: &str) -> SchemaObject {
  let mut diagnostics = Diagnostics::new();
  Normalizer::new(Resolver::new(document)).normalize(schema, field, &mut diagnostics)
}
