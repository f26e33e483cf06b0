use serde::{Deserialize, Serialize};

use crate::{
  diagnostics::Diagnostics,
  document::{Operation, Response},
  normalizer::Normalizer,
  resolver::RefTrail,
  schema::{ObjectOrRef, SchemaObject, UNRESOLVED_DESCRIPTION},
};

/// One media type of a response with its normalized schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseContent {
  pub media_type: String,
  pub schema: SchemaObject,
}

/// A declared response, resolved and normalized for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseView {
  pub status: String,
  pub description: String,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub content: Vec<ResponseContent>,
}

impl ResponseView {
  fn unresolved(status: &str) -> Self {
    Self {
      status: status.to_string(),
      description: UNRESOLVED_DESCRIPTION.to_string(),
      content: Vec::new(),
    }
  }

  /// Returns true for `2XX` status codes (and their `2XX` wildcard).
  #[must_use]
  pub fn is_success(&self) -> bool {
    self.status.starts_with('2')
  }
}

/// Resolves and normalizes every response of `operation`, in document order.
///
/// Media types without a schema are omitted. A response reference that cannot
/// be followed yields a view described as unresolved with no content.
pub fn normalize_responses(
  operation: &Operation,
  normalizer: &Normalizer<'_>,
  diagnostics: &mut Diagnostics,
) -> Vec<ResponseView> {
  operation
    .responses
    .iter()
    .map(|(status, response)| {
      let response = match response {
        ObjectOrRef::Object(response) => response.clone(),
        ObjectOrRef::Ref(reference) => {
          let mut trail = RefTrail::new();
          match normalizer.resolver().resolve_as::<Response>(&reference.ref_path, &mut trail) {
            Ok(response) => response,
            Err(error) => {
              diagnostics.record(error.into_diagnostic(&format!("responses.{status}")));
              return ResponseView::unresolved(status);
            }
          }
        }
      };

      let content = response
        .content
        .iter()
        .filter_map(|(media_type, media)| {
          let schema = media.schema.as_ref()?;
          let field = format!("responses.{status}.{media_type}");
          Some(ResponseContent {
            media_type: media_type.clone(),
            schema: normalizer.normalize(schema, &field, diagnostics),
          })
        })
        .collect();

      ResponseView {
        status: status.clone(),
        description: response.description,
        content,
      }
    })
    .collect()
}
