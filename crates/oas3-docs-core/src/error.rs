use thiserror::Error;

use crate::schema::SchemaType;

/// Fatal errors raised while loading an OpenAPI document.
///
/// These are the only conditions under which the crate rejects input outright.
/// Broken references, unexpected schema shapes and lookup misses are absorbed
/// and reported through [`crate::Diagnostics`] instead.
#[derive(Debug, Error)]
pub enum DocumentError {
  /// The document root is not a JSON object.
  #[error("OpenAPI document must be a JSON object")]
  NotAnObject,

  /// A field required by the minimal document shape is absent.
  #[error("OpenAPI document is missing required field '{field}'")]
  MissingField { field: &'static str },

  /// A required field is present but holds the wrong JSON type.
  #[error("OpenAPI document field '{field}' must be {expected}")]
  InvalidField {
    field: &'static str,
    expected: &'static str,
  },

  /// The document passed shape validation but could not be decoded.
  #[error("OpenAPI document is malformed at '{path}': {source}")]
  Malformed {
    path: String,
    #[source]
    source: serde_json::Error,
  },

  /// The input text is not valid JSON.
  #[error("OpenAPI document is not valid JSON: {0}")]
  Syntax(#[from] serde_json::Error),
}

/// Validation rules were requested for a schema that is not a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("validation rules apply to string, number and integer fields, not '{0}'")]
pub struct UnsupportedFieldType(pub SchemaType);
