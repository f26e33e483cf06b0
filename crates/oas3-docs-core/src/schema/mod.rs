mod reference;

#[cfg(test)]
mod tests;

use std::str::FromStr;

use indexmap::IndexMap;
pub use reference::{ObjectOrRef, Reference};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{DefaultOnError, serde_as, skip_serializing_none};
use strum::{AsRefStr, Display, EnumString};

/// A schema that is either inline or a `$ref` pointer.
pub type SchemaOrRef = ObjectOrRef<SchemaObject>;

pub(crate) const UNRESOLVED_DESCRIPTION: &str = "Unresolved reference";
const NULL_TYPE: &str = "null";

/// Keys whose presence marks a JSON object as schema-shaped.
pub(crate) const SCHEMA_FACET_KEYS: &[&str] = &[
  "type",
  "format",
  "title",
  "description",
  "properties",
  "items",
  "required",
  "enum",
  "const",
  "default",
  "example",
  "minimum",
  "maximum",
  "exclusiveMinimum",
  "exclusiveMaximum",
  "multipleOf",
  "minLength",
  "maxLength",
  "pattern",
  "nullable",
  "oneOf",
  "anyOf",
  "allOf",
  "additionalProperties",
];

/// The closed set of value types a normalized schema can carry.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SchemaType {
  String,
  Number,
  Integer,
  Boolean,
  Object,
  Array,
}

impl SchemaType {
  #[must_use]
  pub const fn is_numeric(self) -> bool {
    matches!(self, Self::Number | Self::Integer)
  }

  #[must_use]
  pub const fn is_container(self) -> bool {
    matches!(self, Self::Object | Self::Array)
  }
}

/// Composition keyword used by a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum CombineKind {
  OneOf,
  AnyOf,
  AllOf,
}

/// The raw `type` keyword: a single name (3.0) or a list of names (3.1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeDecl {
  Single(String),
  Multiple(Vec<String>),
}

impl TypeDecl {
  pub fn names(&self) -> impl Iterator<Item = &str> {
    let names: &[String] = match self {
      Self::Single(name) => std::slice::from_ref(name),
      Self::Multiple(names) => names,
    };
    names.iter().map(String::as_str)
  }

  /// Returns true when `null` is one of the declared types.
  #[must_use]
  pub fn allows_null(&self) -> bool {
    self.names().any(|name| name == NULL_TYPE)
  }

  /// Returns the first recognised non-null type.
  #[must_use]
  pub fn primary(&self) -> Option<SchemaType> {
    self
      .names()
      .filter(|name| *name != NULL_TYPE)
      .find_map(|name| SchemaType::from_str(name).ok())
  }

  /// Returns the first non-null name that is not a recognised [`SchemaType`].
  #[must_use]
  pub fn unknown_name(&self) -> Option<&str> {
    self
      .names()
      .find(|name| *name != NULL_TYPE && SchemaType::from_str(name).is_err())
  }
}

impl From<SchemaType> for TypeDecl {
  fn from(schema_type: SchemaType) -> Self {
    Self::Single(schema_type.to_string())
  }
}

/// `exclusiveMinimum`/`exclusiveMaximum`: a flag in 3.0, the bound itself in 3.1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExclusiveBound {
  Flag(bool),
  Value(f64),
}

/// A numeric limit with its inclusivity resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericBound {
  pub value: f64,
  pub exclusive: bool,
}

/// The subset of JSON Schema used by OpenAPI documents.
///
/// Malformed values (e.g. `"minLength": "three"`, `"properties": true`) decode
/// as absent rather than rejecting the whole document.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchemaObject {
  #[serde(rename = "type")]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub schema_type: Option<TypeDecl>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub format: Option<String>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub title: Option<String>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "IndexMap::is_empty")]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub properties: IndexMap<String, SchemaOrRef>,
  pub items: Option<Box<SchemaOrRef>>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub required: Vec<String>,
  #[serde(rename = "enum")]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub enum_values: Option<Vec<Value>>,
  pub default: Option<Value>,
  pub example: Option<Value>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub minimum: Option<f64>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub maximum: Option<f64>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub exclusive_minimum: Option<ExclusiveBound>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub exclusive_maximum: Option<ExclusiveBound>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub multiple_of: Option<f64>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub min_length: Option<u64>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub max_length: Option<u64>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub pattern: Option<String>,
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub nullable: Option<bool>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub one_of: Vec<SchemaOrRef>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub any_of: Vec<SchemaOrRef>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub all_of: Vec<SchemaOrRef>,
  pub additional_properties: Option<Value>,
}

impl SchemaObject {
  /// The degraded schema substituted for a reference that cannot be followed.
  #[must_use]
  pub fn unresolved() -> Self {
    Self {
      schema_type: Some(SchemaType::String.into()),
      description: Some(UNRESOLVED_DESCRIPTION.to_string()),
      ..Default::default()
    }
  }

  #[must_use]
  pub fn of_type(schema_type: SchemaType) -> Self {
    Self {
      schema_type: Some(schema_type.into()),
      ..Default::default()
    }
  }

  /// Returns true for the placeholder produced by [`SchemaObject::unresolved`].
  #[must_use]
  pub fn is_unresolved(&self) -> bool {
    self.description.as_deref() == Some(UNRESOLVED_DESCRIPTION)
      && self.properties.is_empty()
      && self.schema_type() == Some(SchemaType::String)
  }

  /// The recognised type of this schema, if one is declared.
  #[must_use]
  pub fn schema_type(&self) -> Option<SchemaType> {
    self.schema_type.as_ref().and_then(TypeDecl::primary)
  }

  #[must_use]
  pub fn is_nullable(&self) -> bool {
    self.nullable.unwrap_or(false) || self.schema_type.as_ref().is_some_and(TypeDecl::allows_null)
  }

  #[must_use]
  pub fn has_enum(&self) -> bool {
    self.enum_values.as_ref().is_some_and(|values| !values.is_empty())
  }

  #[must_use]
  pub fn is_required(&self, property: &str) -> bool {
    self.required.iter().any(|name| name == property)
  }

  /// Returns the first composition keyword present, checked as `oneOf`, `anyOf`, `allOf`.
  #[must_use]
  pub fn combine_kind(&self) -> Option<CombineKind> {
    [CombineKind::OneOf, CombineKind::AnyOf, CombineKind::AllOf]
      .into_iter()
      .find(|kind| !self.branches(*kind).is_empty())
  }

  #[must_use]
  pub fn branches(&self, kind: CombineKind) -> &[SchemaOrRef] {
    match kind {
      CombineKind::OneOf => &self.one_of,
      CombineKind::AnyOf => &self.any_of,
      CombineKind::AllOf => &self.all_of,
    }
  }

  /// Iterates over inline property schemas, skipping any that are still references.
  ///
  /// On a normalized schema this yields every property.
  pub fn property_schemas(&self) -> impl Iterator<Item = (&str, &SchemaObject)> {
    self
      .properties
      .iter()
      .filter_map(|(name, schema)| schema.as_object().map(|schema| (name.as_str(), schema)))
  }

  /// The inline items schema, if present and not a reference.
  #[must_use]
  pub fn item_schema(&self) -> Option<&SchemaObject> {
    self.items.as_deref().and_then(ObjectOrRef::as_object)
  }

  /// Lower numeric limit, honouring both the 3.0 flag and the 3.1 value form.
  #[must_use]
  pub fn lower_bound(&self) -> Option<NumericBound> {
    Self::bound(self.minimum, self.exclusive_minimum)
  }

  /// Upper numeric limit, honouring both the 3.0 flag and the 3.1 value form.
  #[must_use]
  pub fn upper_bound(&self) -> Option<NumericBound> {
    Self::bound(self.maximum, self.exclusive_maximum)
  }

  fn bound(inclusive: Option<f64>, exclusive: Option<ExclusiveBound>) -> Option<NumericBound> {
    match (inclusive, exclusive) {
      (_, Some(ExclusiveBound::Value(value))) => Some(NumericBound { value, exclusive: true }),
      (Some(value), Some(ExclusiveBound::Flag(flag))) => Some(NumericBound { value, exclusive: flag }),
      (Some(value), None) => Some(NumericBound {
        value,
        exclusive: false,
      }),
      (None, _) => None,
    }
  }
}

impl From<SchemaObject> for SchemaOrRef {
  fn from(schema: SchemaObject) -> Self {
    Self::Object(schema)
  }
}

/// Returns true when `value` is a JSON object carrying at least one schema keyword.
#[must_use]
pub fn is_schema_like(value: &Value) -> bool {
  value
    .as_object()
    .is_some_and(|object| SCHEMA_FACET_KEYS.iter().any(|key| object.contains_key(*key)))
}
