use crate::{
  document::{HttpMethod, Operation},
  naming::slug::{SlugOptions, slugify_with},
};

/// The operation field a slug is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource<'a> {
  OperationId(&'a str),
  Summary(&'a str),
  Path(&'a str),
}

impl<'a> IdentitySource<'a> {
  #[must_use]
  pub fn text(self) -> &'a str {
    match self {
      Self::OperationId(text) | Self::Summary(text) | Self::Path(text) => text,
    }
  }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
  text.filter(|text| !text.trim().is_empty())
}

/// Applies the identity precedence: `operationId`, then `summary`, then the path.
///
/// Blank strings count as absent.
#[must_use]
pub fn identity_source<'a>(path: &'a str, operation: &'a Operation) -> IdentitySource<'a> {
  if let Some(operation_id) = non_blank(operation.operation_id.as_deref()) {
    IdentitySource::OperationId(operation_id)
  } else if let Some(summary) = non_blank(operation.summary.as_deref()) {
    IdentitySource::Summary(summary)
  } else {
    IdentitySource::Path(path)
  }
}

/// Derives the routing slug of one operation.
///
/// When the identity text slugifies to nothing (e.g. the path `/`), the slug
/// falls back to the method and path together, so every operation has a
/// non-empty slug.
#[must_use]
pub fn operation_slug(path: &str, method: HttpMethod, operation: &Operation, options: SlugOptions) -> String {
  let slug = slugify_with(identity_source(path, operation).text(), options);
  if !slug.is_empty() {
    return slug;
  }

  slugify_with(&format!("{method} {path}"), options)
}
