use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{DefaultOnError, serde_as, skip_serializing_none};
use strum::{AsRefStr, Display, EnumString};

use super::method::HttpMethod;
use crate::schema::{ObjectOrRef, SchemaOrRef};

/// A security requirement: scheme name to required scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Info {
  pub title: String,
  pub version: String,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub description: Option<String>,
}

#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub url: String,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub description: Option<String>,
}

/// Where a parameter is carried.
///
/// `body` and `response` never appear in a document; they tag parameters
/// derived from request bodies and response schemas. Unrecognised locations
/// (e.g. Swagger 2 `formData`) decode as [`ParameterLocation::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ParameterLocation {
  Path,
  Query,
  Header,
  Cookie,
  Body,
  Response,
  #[default]
  #[serde(other)]
  Unknown,
}

/// A parameter exactly as declared in the document.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameter {
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub name: String,
  #[serde(rename = "in")]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub location: ParameterLocation,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub required: Option<bool>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub description: Option<String>,
  pub schema: Option<SchemaOrRef>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub deprecated: Option<bool>,
  pub example: Option<Value>,
}

impl Parameter {
  /// Returns true when the parameter names itself and a known location.
  #[must_use]
  pub fn is_declared(&self) -> bool {
    !self.name.trim().is_empty() && self.location != ParameterLocation::Unknown
  }
}

pub type ParameterOrRef = ObjectOrRef<Parameter>;

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaType {
  pub schema: Option<SchemaOrRef>,
  pub example: Option<Value>,
}

#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestBody {
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub description: Option<String>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub content: IndexMap<String, MediaType>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub required: Option<bool>,
}

pub type RequestBodyOrRef = ObjectOrRef<RequestBody>;

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Response {
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub description: String,
  #[serde(skip_serializing_if = "IndexMap::is_empty")]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub content: IndexMap<String, MediaType>,
}

pub type ResponseOrRef = ObjectOrRef<Response>;

/// One HTTP method handler at one path.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Operation {
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub operation_id: Option<String>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub summary: Option<String>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub tags: Vec<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub parameters: Vec<ParameterOrRef>,
  pub request_body: Option<RequestBodyOrRef>,
  #[serde(skip_serializing_if = "IndexMap::is_empty")]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub responses: IndexMap<String, ResponseOrRef>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub security: Option<Vec<SecurityRequirement>>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub deprecated: Option<bool>,
}

impl Operation {
  /// The tag that decides sidebar grouping.
  #[must_use]
  pub fn primary_tag(&self) -> Option<&str> {
    self.tags.first().map(String::as_str)
  }
}

/// The operations and shared parameters declared under one URL template.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathItem {
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub summary: Option<String>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub parameters: Vec<ParameterOrRef>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub get: Option<Operation>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub post: Option<Operation>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub put: Option<Operation>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub patch: Option<Operation>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub delete: Option<Operation>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub head: Option<Operation>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub options: Option<Operation>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub trace: Option<Operation>,
}

impl PathItem {
  #[must_use]
  pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
    match method {
      HttpMethod::Get => self.get.as_ref(),
      HttpMethod::Post => self.post.as_ref(),
      HttpMethod::Put => self.put.as_ref(),
      HttpMethod::Patch => self.patch.as_ref(),
      HttpMethod::Delete => self.delete.as_ref(),
      HttpMethod::Head => self.head.as_ref(),
      HttpMethod::Options => self.options.as_ref(),
      HttpMethod::Trace => self.trace.as_ref(),
    }
  }

  /// Declared operations in canonical method order.
  pub fn methods(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
    HttpMethod::ALL
      .into_iter()
      .filter_map(|method| self.operation(method).map(|operation| (method, operation)))
  }
}

/// Named reusable objects.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Components {
  #[serde(skip_serializing_if = "IndexMap::is_empty")]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub schemas: IndexMap<String, SchemaOrRef>,
  #[serde(skip_serializing_if = "IndexMap::is_empty")]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub parameters: IndexMap<String, ParameterOrRef>,
  #[serde(skip_serializing_if = "IndexMap::is_empty")]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub request_bodies: IndexMap<String, RequestBodyOrRef>,
  #[serde(skip_serializing_if = "IndexMap::is_empty")]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub responses: IndexMap<String, ResponseOrRef>,
  #[serde(skip_serializing_if = "IndexMap::is_empty")]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub security_schemes: IndexMap<String, Value>,
}
