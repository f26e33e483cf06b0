//! The session owner: one loaded document and everything derived from it.

mod view;

#[cfg(test)]
mod tests;

use serde_json::Value;

pub use view::OperationView;

use crate::{
  diagnostics::Diagnostics,
  document::OpenApiDocument,
  error::DocumentError,
  locator::{self, EnhancedOperation, OperationRegistry, RouteKey},
  naming::SlugOptions,
  normalizer::Normalizer,
  parameters::ParameterClassifier,
  resolver::{RefCache, RefTrail, Resolver},
  schema::{SchemaObject, SchemaOrRef},
  sidebar::{SidebarCollection, build_sidebar},
};

/// Owns one OpenAPI document together with its slug options and reference cache.
///
/// Every derived view is computed from the owned document on request, so
/// nothing here can drift from the source. Independent documents live in
/// independent `ApiReference` values and share no state.
#[derive(Debug)]
pub struct ApiReference {
  document: OpenApiDocument,
  options: SlugOptions,
  cache: RefCache,
}

impl ApiReference {
  #[must_use]
  pub fn new(document: OpenApiDocument) -> Self {
    Self::with_options(document, SlugOptions::default())
  }

  #[must_use]
  pub fn with_options(document: OpenApiDocument, options: SlugOptions) -> Self {
    Self {
      document,
      options,
      cache: RefCache::new(),
    }
  }

  /// Validates and loads a parsed document.
  ///
  /// # Errors
  ///
  /// See [`OpenApiDocument::from_value`].
  pub fn from_value(raw: Value) -> Result<Self, DocumentError> {
    OpenApiDocument::from_value(raw).map(Self::new)
  }

  /// Parses and loads JSON text.
  ///
  /// # Errors
  ///
  /// See [`OpenApiDocument::from_json_str`].
  pub fn from_json_str(text: &str) -> Result<Self, DocumentError> {
    OpenApiDocument::from_json_str(text).map(Self::new)
  }

  #[must_use]
  pub fn document(&self) -> &OpenApiDocument {
    &self.document
  }

  #[must_use]
  pub fn options(&self) -> SlugOptions {
    self.options
  }

  #[must_use]
  pub fn cache(&self) -> &RefCache {
    &self.cache
  }

  #[must_use]
  pub fn resolver(&self) -> Resolver<'_> {
    Resolver::with_cache(&self.document, &self.cache)
  }

  #[must_use]
  pub fn normalizer(&self) -> Normalizer<'_> {
    Normalizer::new(self.resolver())
  }

  #[must_use]
  pub fn classifier(&self) -> ParameterClassifier<'_> {
    ParameterClassifier::new(self.normalizer())
  }

  #[must_use]
  pub fn registry(&self) -> OperationRegistry<'_> {
    OperationRegistry::new(&self.document, self.options)
  }

  #[must_use]
  pub fn sidebar(&self) -> Vec<SidebarCollection> {
    build_sidebar(&self.document, self.options)
  }

  #[must_use]
  pub fn find_by_slug(&self, slug: &str, ordinal: usize) -> Option<EnhancedOperation> {
    locator::find_by_slug(&self.document, slug, ordinal, self.options)
  }

  #[must_use]
  pub fn find_by_route(&self, route: &str) -> Option<EnhancedOperation> {
    locator::find_by_route(&self.document, route, self.options)
  }

  /// Builds the complete view of the `ordinal`th operation with slug `slug`.
  ///
  /// Non-fatal problems met along the way are appended to `diagnostics`.
  pub fn operation_view(&self, slug: &str, ordinal: usize, diagnostics: &mut Diagnostics) -> Option<OperationView> {
    let operation = self.find_by_slug(slug, ordinal)?;
    Some(OperationView::build(&self.document, &self.normalizer(), operation, diagnostics))
  }

  /// [`ApiReference::operation_view`] addressed by a route segment.
  pub fn operation_view_for_route(&self, route: &str, diagnostics: &mut Diagnostics) -> Option<OperationView> {
    let RouteKey { slug, ordinal } = RouteKey::parse(route);
    self.operation_view(&slug, ordinal, diagnostics)
  }

  /// Normalizes a schema against the owned document.
  pub fn normalize(&self, schema: &SchemaOrRef, field: &str, diagnostics: &mut Diagnostics) -> SchemaObject {
    self.normalizer().normalize(schema, field, diagnostics)
  }

  /// Resolves one schema reference with a fresh trail.
  #[must_use]
  pub fn resolve(&self, ref_path: &str) -> Option<SchemaObject> {
    let mut trail = RefTrail::new();
    match self.resolver().resolve_schema(ref_path, &mut trail) {
      Ok(schema) => Some(schema),
      Err(error) => {
        tracing::warn!(reference = ref_path, ?error, "unresolved schema reference");
        None
      }
    }
  }
}

impl From<OpenApiDocument> for ApiReference {
  fn from(document: OpenApiDocument) -> Self {
    Self::new(document)
  }
}
