use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{
  normalizer::infer_type,
  schema::{SchemaObject, SchemaType},
};

/// Which numeric rule branch a numeric field validates with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NumericKind {
  Integer,
  Number,
}

/// The input widget family a schema renders as.
///
/// `integer` and `number` share [`FieldKind::Numeric`]; only their validation
/// rules differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "numeric")]
pub enum FieldKind {
  Text,
  Numeric(NumericKind),
  Boolean,
  Array,
  Object,
}

impl FieldKind {
  /// Maps a schema to its field kind, inferring the type when absent.
  #[must_use]
  pub fn for_schema(schema: &SchemaObject) -> Self {
    Self::from(schema.schema_type().unwrap_or_else(|| infer_type(schema)))
  }

  /// Returns true for text fields restricted to an enum, rendered as a choice.
  #[must_use]
  pub fn is_choice(schema: &SchemaObject) -> bool {
    Self::for_schema(schema) == Self::Text && schema.has_enum()
  }

  /// Returns true for kinds that validation rules can be derived for.
  #[must_use]
  pub const fn is_leaf(self) -> bool {
    matches!(self, Self::Text | Self::Numeric(_))
  }
}

impl From<SchemaType> for FieldKind {
  fn from(schema_type: SchemaType) -> Self {
    match schema_type {
      SchemaType::String => Self::Text,
      SchemaType::Integer => Self::Numeric(NumericKind::Integer),
      SchemaType::Number => Self::Numeric(NumericKind::Number),
      SchemaType::Boolean => Self::Boolean,
      SchemaType::Array => Self::Array,
      SchemaType::Object => Self::Object,
    }
  }
}
