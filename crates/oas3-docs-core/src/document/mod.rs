//! The loaded OpenAPI document and its lenient typed view.
//!
//! A document is validated only for the minimal shape every renderer depends
//! on (`openapi`, `info.title`, `info.version`, `paths`). Past that point the
//! typed view defaults anything it does not understand, and the raw JSON is
//! kept alongside it so `$ref` pointers can be walked verbatim.

mod content;
mod method;
mod model;


use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use serde_with::{DefaultOnError, serde_as};

pub use content::ContentCategory;
pub(crate) use content::preferred_media_type;
pub use method::HttpMethod;
pub use model::{
  Components, Info, MediaType, Operation, Parameter, ParameterLocation, ParameterOrRef, PathItem, RequestBody,
  RequestBodyOrRef, Response, ResponseOrRef, SecurityRequirement, Server,
};

use crate::error::DocumentError;

const OPENAPI_FIELD: &str = "openapi";
const INFO_FIELD: &str = "info";
const INFO_TITLE_FIELD: &str = "info.title";
const INFO_VERSION_FIELD: &str = "info.version";
const PATHS_FIELD: &str = "paths";
const EXTENSION_PREFIX: &str = "x-";

#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DecodedDocument {
  openapi: String,
  info: Info,
  #[serde_as(deserialize_as = "DefaultOnError")]
  servers: Vec<Server>,
  #[serde(deserialize_with = "deserialize_paths")]
  paths: IndexMap<String, PathItem>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  components: Option<Components>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  security: Option<Vec<SecurityRequirement>>,
}

/// Decodes `paths`, skipping `x-` extensions before they are typed.
///
/// A path entry that is not an object decodes as an empty [`PathItem`].
fn deserialize_paths<'de, D: Deserializer<'de>>(deserializer: D) -> Result<IndexMap<String, PathItem>, D::Error> {
  let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
  Ok(
    raw
      .into_iter()
      .filter(|(path, _)| !path.starts_with(EXTENSION_PREFIX))
      .map(|(path, item)| (path, PathItem::deserialize(item).unwrap_or_default()))
      .collect(),
  )
}

/// An immutable, loaded OpenAPI document.
#[derive(Debug, Clone)]
pub struct OpenApiDocument {
  raw: Value,
  openapi: String,
  info: Info,
  servers: Vec<Server>,
  paths: IndexMap<String, PathItem>,
  components: Option<Components>,
  security: Option<Vec<SecurityRequirement>>,
}

impl OpenApiDocument {
  /// Validates the minimal document shape and decodes the typed view.
  ///
  /// # Errors
  ///
  /// Returns [`DocumentError::MissingField`] or [`DocumentError::InvalidField`]
  /// naming the first required field that is absent or mistyped. Past that
  /// check, sections that do not decode are defaulted instead of rejected;
  /// [`DocumentError::Malformed`] is left for a typed view that still fails.
  pub fn from_value(raw: Value) -> Result<Self, DocumentError> {
    Self::validate_shape(&raw)?;

    let decoded: DecodedDocument =
      serde_path_to_error::deserialize(&raw).map_err(|error| DocumentError::Malformed {
        path: error.path().to_string(),
        source: error.into_inner(),
      })?;

    Ok(Self {
      raw,
      openapi: decoded.openapi,
      info: decoded.info,
      servers: decoded.servers,
      paths: decoded.paths,
      components: decoded.components,
      security: decoded.security,
    })
  }

  /// Parses JSON text and loads it with [`OpenApiDocument::from_value`].
  ///
  /// # Errors
  ///
  /// Returns [`DocumentError::Syntax`] for invalid JSON, otherwise the errors
  /// of [`OpenApiDocument::from_value`].
  pub fn from_json_str(text: &str) -> Result<Self, DocumentError> {
    Self::from_value(serde_json::from_str(text)?)
  }

  /// Parses JSON bytes and loads them with [`OpenApiDocument::from_value`].
  ///
  /// # Errors
  ///
  /// Same as [`OpenApiDocument::from_json_str`].
  pub fn from_slice(bytes: &[u8]) -> Result<Self, DocumentError> {
    Self::from_value(serde_json::from_slice(bytes)?)
  }

  fn validate_shape(raw: &Value) -> Result<(), DocumentError> {
    let Some(root) = raw.as_object() else {
      return Err(DocumentError::NotAnObject);
    };

    require_string(root, OPENAPI_FIELD, OPENAPI_FIELD)?;

    let info = match root.get(INFO_FIELD) {
      None => return Err(DocumentError::MissingField { field: INFO_FIELD }),
      Some(Value::Object(info)) => info,
      Some(_) => {
        return Err(DocumentError::InvalidField {
          field: INFO_FIELD,
          expected: "an object",
        });
      }
    };
    require_string(info, "title", INFO_TITLE_FIELD)?;
    require_string(info, "version", INFO_VERSION_FIELD)?;

    match root.get(PATHS_FIELD) {
      None => Err(DocumentError::MissingField { field: PATHS_FIELD }),
      Some(Value::Object(_)) => Ok(()),
      Some(_) => Err(DocumentError::InvalidField {
        field: PATHS_FIELD,
        expected: "an object",
      }),
    }
  }

  /// The document exactly as loaded.
  #[must_use]
  pub fn raw(&self) -> &Value {
    &self.raw
  }

  #[must_use]
  pub fn openapi(&self) -> &str {
    &self.openapi
  }

  #[must_use]
  pub fn info(&self) -> &Info {
    &self.info
  }

  #[must_use]
  pub fn title(&self) -> &str {
    &self.info.title
  }

  #[must_use]
  pub fn servers(&self) -> &[Server] {
    &self.servers
  }

  #[must_use]
  pub fn paths(&self) -> &IndexMap<String, PathItem> {
    &self.paths
  }

  #[must_use]
  pub fn path_item(&self, path: &str) -> Option<&PathItem> {
    self.paths.get(path)
  }

  #[must_use]
  pub fn components(&self) -> Option<&Components> {
    self.components.as_ref()
  }

  #[must_use]
  pub fn security(&self) -> Option<&[SecurityRequirement]> {
    self.security.as_deref()
  }

  /// Security requirements that apply to `operation`.
  ///
  /// An operation-level list, even an empty one, overrides the root list.
  #[must_use]
  pub fn effective_security<'a>(&'a self, operation: &'a Operation) -> &'a [SecurityRequirement] {
    operation
      .security
      .as_deref()
      .or(self.security.as_deref())
      .unwrap_or_default()
  }

  /// Every `(path, method, operation)` triple.
  ///
  /// Paths are visited in document order and methods in [`HttpMethod::ALL`] order.
  pub fn operations(&self) -> impl Iterator<Item = (&str, HttpMethod, &Operation)> {
    self.paths.iter().flat_map(|(path, item)| {
      item
        .methods()
        .map(move |(method, operation)| (path.as_str(), method, operation))
    })
  }
}

fn require_string(object: &Map<String, Value>, key: &str, field: &'static str) -> Result<(), DocumentError> {
  match object.get(key) {
    None => Err(DocumentError::MissingField { field }),
    Some(Value::String(_)) => Ok(()),
    Some(_) => Err(DocumentError::InvalidField {
      field,
      expected: "a string",
    }),
  }
}
