//! Operation lookup by slug.
//!
//! Operations are visited in document order (paths as declared, methods in
//! [`HttpMethod::ALL`] order). Several operations may derive the same slug;
//! the Nth of them is addressed by ordinal N.

mod route;


use std::collections::HashMap;

use http::Method;
use serde::{Serialize, Serializer};

pub use route::RouteKey;

use crate::{
  document::{HttpMethod, OpenApiDocument, Operation, PathItem},
  naming::{SlugOptions, operation_slug},
  parameters::merge_parameters,
  resolver::Resolver,
};

/// An operation decorated with where it lives.
///
/// Built fresh on every lookup; the path-level parameters are already merged
/// into `operation.parameters`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedOperation {
  pub path: String,
  #[serde(serialize_with = "serialize_method")]
  pub method: Method,
  pub route: RouteKey,
  #[serde(flatten)]
  pub operation: Operation,
}

fn serialize_method<S: Serializer>(method: &Method, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.serialize_str(method.as_str())
}

impl EnhancedOperation {
  #[must_use]
  pub fn slug(&self) -> &str {
    &self.route.slug
  }
}

/// One operation with its derived identity.
#[derive(Debug, Clone, Copy)]
pub struct OperationEntry<'a> {
  pub path: &'a str,
  pub method: HttpMethod,
  pub path_item: &'a PathItem,
  pub operation: &'a Operation,
}

impl OperationEntry<'_> {
  #[must_use]
  pub fn slug(&self, options: SlugOptions) -> String {
    operation_slug(self.path, self.method, self.operation, options)
  }

  /// Builds the fresh lookup result, resolving parameter refs with `resolver`.
  #[must_use]
  pub fn enhance(&self, route: RouteKey, resolver: Resolver<'_>) -> EnhancedOperation {
    let mut operation = self.operation.clone();
    operation.parameters = merge_parameters(&self.path_item.parameters, &self.operation.parameters, resolver);

    EnhancedOperation {
      path: self.path.to_string(),
      method: self.method.to_http(),
      route,
      operation,
    }
  }
}

/// Every `(path, method, operation)` triple of a document, in lookup order.
pub fn entries(document: &OpenApiDocument) -> impl Iterator<Item = OperationEntry<'_>> {
  document.paths().iter().flat_map(|(path, path_item)| {
    path_item.methods().map(move |(method, operation)| OperationEntry {
      path: path.as_str(),
      method,
      path_item,
      operation,
    })
  })
}

/// All operations of a document keyed by their routes.
///
/// Built in one pass; the ordinal of each entry is the number of earlier
/// entries with the same slug, so `find_by_slug(doc, slug, n)` and the `n`th
/// registered entry with that slug always agree.
#[derive(Debug, Clone)]
pub struct OperationRegistry<'a> {
  document: &'a OpenApiDocument,
  entries: Vec<(RouteKey, OperationEntry<'a>)>,
}

impl<'a> OperationRegistry<'a> {
  #[must_use]
  pub fn new(document: &'a OpenApiDocument, options: SlugOptions) -> Self {
    let mut seen = HashMap::<String, usize>::new();

    let entries = entries(document)
      .map(|entry| {
        let slug = entry.slug(options);
        let count = seen.entry(slug.clone()).or_default();
        let route = RouteKey::new(slug, *count);
        *count += 1;
        (route, entry)
      })
      .collect();

    Self { document, entries }
  }

  pub fn iter(&self) -> impl Iterator<Item = (&RouteKey, &OperationEntry<'a>)> {
    self.entries.iter().map(|(route, entry)| (route, entry))
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  #[must_use]
  pub fn get(&self, route: &RouteKey) -> Option<&OperationEntry<'a>> {
    self
      .entries
      .iter()
      .find_map(|(key, entry)| (key == route).then_some(entry))
  }

  #[must_use]
  pub fn find(&self, route: &RouteKey) -> Option<EnhancedOperation> {
    self
      .get(route)
      .map(|entry| entry.enhance(route.clone(), Resolver::new(self.document)))
  }

  /// Routes of every registered operation, in lookup order.
  pub fn routes(&self) -> impl Iterator<Item = &RouteKey> {
    self.entries.iter().map(|(route, _)| route)
  }
}

/// Finds the `ordinal`th operation (0-based, in lookup order) whose slug is `slug`.
///
/// Returns `None` when no operation matches or `ordinal` exceeds the number of
/// matches.
#[must_use]
pub fn find_by_slug(
  document: &OpenApiDocument,
  slug: &str,
  ordinal: usize,
  options: SlugOptions,
) -> Option<EnhancedOperation> {
  let found = entries(document)
    .filter(|entry| entry.slug(options) == slug)
    .nth(ordinal)
    .map(|entry| entry.enhance(RouteKey::new(slug, ordinal), Resolver::new(document)));

  if found.is_none() {
    tracing::debug!(slug, ordinal, "no operation matches slug");
  }
  found
}

/// Finds the operation addressed by a UI route segment (`slug` or `slug_<ordinal>`).
#[must_use]
pub fn find_by_route(document: &OpenApiDocument, route: &str, options: SlugOptions) -> Option<EnhancedOperation> {
  let RouteKey { slug, ordinal } = RouteKey::parse(route);
  find_by_slug(document, &slug, ordinal, options)
}
