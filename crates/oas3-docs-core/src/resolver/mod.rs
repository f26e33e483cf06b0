//! Local `$ref` resolution with cycle detection.
//!
//! Resolution follows `#/...` JSON pointers through the raw document and keeps
//! following while the target is itself a reference. The caller threads a
//! [`RefTrail`] through one resolution chain; a pointer seen twice on the same
//! trail is a cycle and aborts that branch. Trails are never shared between
//! independent lookups.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use dashmap::DashMap;
use indexmap::IndexSet;
use percent_encoding::percent_decode_str;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
  diagnostics::Diagnostic,
  document::OpenApiDocument,
  schema::{SchemaObject, is_schema_like},
};

const REF_FIELD: &str = "$ref";
const LOCAL_POINTER_PREFIX: &str = "#/";

/// The ordered set of pointers visited by one resolution chain.
pub type RefTrail = IndexSet<String>;

/// Why a `$ref` could not be followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
  /// Not a local `#/` pointer.
  Unsupported(String),
  /// A pointer segment does not exist in the document.
  Missing(String),
  /// The pointer was already visited on the current trail.
  Cyclic(String),
  /// The target exists but is not shaped like the requested object.
  Mismatched(String),
}

impl ResolveError {
  #[must_use]
  pub fn ref_path(&self) -> &str {
    match self {
      Self::Unsupported(path) | Self::Missing(path) | Self::Cyclic(path) | Self::Mismatched(path) => path,
    }
  }

  /// Converts the failure into a [`Diagnostic`] attributed to `field`.
  #[must_use]
  pub fn into_diagnostic(self, field: &str) -> Diagnostic {
    let field = field.to_string();
    match self {
      Self::Unsupported(reference) => Diagnostic::UnsupportedReference { reference, field },
      Self::Cyclic(reference) => Diagnostic::CyclicReference { reference, field },
      Self::Missing(reference) | Self::Mismatched(reference) => Diagnostic::UnresolvedReference { reference, field },
    }
  }
}

/// Memoized pointer lookups for one document.
///
/// Only raw pointer targets are cached, never the outcome of a chain, so a
/// cached entry cannot hide a cycle on a different trail.
#[derive(Debug, Default)]
pub struct RefCache {
  targets: DashMap<String, Option<Arc<Value>>>,
}

impl RefCache {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.targets.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.targets.is_empty()
  }

  pub fn clear(&self) {
    self.targets.clear();
  }
}

/// Follows `$ref` pointers against one document.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
  document: &'a OpenApiDocument,
  cache: Option<&'a RefCache>,
}

impl<'a> Resolver<'a> {
  /// A resolver that walks the document on every lookup.
  #[must_use]
  pub fn new(document: &'a OpenApiDocument) -> Self {
    Self { document, cache: None }
  }

  /// A resolver that memoizes pointer lookups in `cache`.
  ///
  /// The cache must belong to `document`; sharing one between documents
  /// returns targets from the wrong document.
  #[must_use]
  pub fn with_cache(document: &'a OpenApiDocument, cache: &'a RefCache) -> Self {
    Self {
      document,
      cache: Some(cache),
    }
  }

  #[must_use]
  pub fn document(&self) -> &'a OpenApiDocument {
    self.document
  }

  /// Resolves `ref_path` to a schema, following reference chains.
  ///
  /// Every pointer visited is pushed onto `trail`; callers that resolve
  /// siblings independently truncate the trail back afterwards.
  ///
  /// # Errors
  ///
  /// Returns a [`ResolveError`] when the pointer is unsupported, missing,
  /// cyclic on `trail`, or lands on something that is not schema-shaped.
  pub fn resolve_schema(&self, ref_path: &str, trail: &mut RefTrail) -> Result<SchemaObject, ResolveError> {
    let (target_path, target) = self.follow(ref_path, trail)?;
    if !is_schema_like(&target) {
      return Err(ResolveError::Mismatched(target_path));
    }
    serde_json::from_value(Value::clone(&target)).map_err(|_| ResolveError::Mismatched(target_path))
  }

  /// Resolves `ref_path` to any decodable component (parameter, response, ...).
  ///
  /// # Errors
  ///
  /// As [`Resolver::resolve_schema`], except the target only has to decode as `T`.
  pub fn resolve_as<T: DeserializeOwned>(&self, ref_path: &str, trail: &mut RefTrail) -> Result<T, ResolveError> {
    let (target_path, target) = self.follow(ref_path, trail)?;
    if !target.is_object() {
      return Err(ResolveError::Mismatched(target_path));
    }
    serde_json::from_value(Value::clone(&target)).map_err(|_| ResolveError::Mismatched(target_path))
  }

  /// Walks the chain starting at `ref_path` until a non-reference target.
  fn follow(&self, ref_path: &str, trail: &mut RefTrail) -> Result<(String, Arc<Value>), ResolveError> {
    let mut current = ref_path.to_string();
    loop {
      if !trail.insert(current.clone()) {
        return Err(ResolveError::Cyclic(current));
      }

      let target = self.lookup(&current)?;
      match target.get(REF_FIELD).and_then(Value::as_str) {
        Some(next) => current = next.to_string(),
        None => return Ok((current, target)),
      }
    }
  }

  fn lookup(&self, ref_path: &str) -> Result<Arc<Value>, ResolveError> {
    if !ref_path.starts_with(LOCAL_POINTER_PREFIX) {
      return Err(ResolveError::Unsupported(ref_path.to_string()));
    }

    let found = match self.cache {
      Some(cache) => cache
        .targets
        .entry(ref_path.to_string())
        .or_insert_with(|| self.walk(ref_path))
        .clone(),
      None => self.walk(ref_path),
    };

    found.ok_or_else(|| ResolveError::Missing(ref_path.to_string()))
  }

  fn walk(&self, ref_path: &str) -> Option<Arc<Value>> {
    let fragment = ref_path.strip_prefix('#')?;
    let pointer = percent_decode_str(fragment).decode_utf8().ok()?;
    self.document.raw().pointer(&pointer).cloned().map(Arc::new)
  }
}

/// Resolves one schema reference with a caller-provided trail.
///
/// Returns `None` for every failure; use [`Resolver::resolve_schema`] to learn why.
#[must_use]
pub fn resolve(ref_path: &str, document: &OpenApiDocument, visited: &mut RefTrail) -> Option<SchemaObject> {
  match Resolver::new(document).resolve_schema(ref_path, visited) {
    Ok(schema) => Some(schema),
    Err(error) => {
      tracing::warn!(reference = error.ref_path(), ?error, "unresolved schema reference");
      None
    }
  }
}
