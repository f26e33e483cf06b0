use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;

const REF_FIELD: &str = "$ref";

/// A `{ "$ref": "..." }` pointer into the same document.
///
/// References are never owned data: they are resolved against the document
/// root and the target is copied, the reference itself is never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
  #[serde(rename = "$ref")]
  pub ref_path: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

impl Reference {
  #[must_use]
  pub fn new(ref_path: impl Into<String>) -> Self {
    Self {
      ref_path: ref_path.into(),
      description: None,
    }
  }

  /// Returns the last pointer segment, e.g. `Pet` for `#/components/schemas/Pet`.
  #[must_use]
  pub fn name(&self) -> Option<&str> {
    self.ref_path.rsplit('/').next().filter(|segment| !segment.is_empty())
  }
}

/// Either an inline object of type `T` or a [`Reference`] to one.
///
/// Decoding never fails: any JSON object with a string `$ref` is a reference,
/// and anything that does not decode as `T` (an OpenAPI 3.1 boolean schema, a
/// stray string) becomes `T::default()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ObjectOrRef<T> {
  Ref(Reference),
  Object(T),
}

impl<T> ObjectOrRef<T> {
  #[must_use]
  pub fn as_ref_path(&self) -> Option<&str> {
    match self {
      Self::Ref(reference) => Some(&reference.ref_path),
      Self::Object(_) => None,
    }
  }

  #[must_use]
  pub fn as_object(&self) -> Option<&T> {
    match self {
      Self::Ref(_) => None,
      Self::Object(object) => Some(object),
    }
  }

  #[must_use]
  pub fn is_ref(&self) -> bool {
    matches!(self, Self::Ref(_))
  }
}

impl<'de, T: DeserializeOwned + Default> Deserialize<'de> for ObjectOrRef<T> {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let value = Value::deserialize(deserializer)?;

    if let Some(ref_path) = value.get(REF_FIELD).and_then(Value::as_str) {
      let reference = Reference::deserialize(&value).unwrap_or_else(|_| Reference::new(ref_path));
      return Ok(Self::Ref(reference));
    }

    Ok(Self::Object(T::deserialize(value).unwrap_or_default()))
  }
}

impl<T> From<Reference> for ObjectOrRef<T> {
  fn from(reference: Reference) -> Self {
    Self::Ref(reference)
  }
}
