use serde::Serialize;

use crate::{
  diagnostics::Diagnostics,
  document::{OpenApiDocument, RequestBody, SecurityRequirement, preferred_media_type},
  locator::EnhancedOperation,
  normalizer::Normalizer,
  parameters::{ClassifiedParameters, ParameterClassifier, ParameterObject},
  resolver::RefTrail,
  responses::{ResponseView, normalize_responses},
  schema::ObjectOrRef,
};

const REQUEST_BODY_FIELD: &str = "requestBody";

/// Everything a renderer or request executor needs for one operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationView {
  pub operation: EnhancedOperation,
  #[serde(flatten)]
  pub parameters: ClassifiedParameters,
  pub body_params: Vec<ParameterObject>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub body_content_type: Option<String>,
  pub body_required: bool,
  pub responses: Vec<ResponseView>,
  pub security: Vec<SecurityRequirement>,
}

impl OperationView {
  pub(crate) fn build(
    document: &OpenApiDocument,
    normalizer: &Normalizer<'_>,
    operation: EnhancedOperation,
    diagnostics: &mut Diagnostics,
  ) -> Self {
    let name = format!("{} {}", operation.method, operation.path);
    let classifier = ParameterClassifier::new(*normalizer);

    let parameters = classifier.classify(&operation.operation.parameters, &name, diagnostics);

    let request_body = resolve_request_body(&operation, normalizer, diagnostics);
    let (body_content_type, body_schema) = request_body
      .as_ref()
      .and_then(|body| preferred_media_type(&body.content))
      .map_or((None, None), |(content_type, media)| {
        (Some(content_type.to_string()), media.schema.as_ref())
      });
    let body_params = classifier.extract_body_params(body_schema, &name, diagnostics);
    let body_required = request_body.as_ref().and_then(|body| body.required).unwrap_or(false);

    let responses = normalize_responses(&operation.operation, normalizer, diagnostics);
    let security = document.effective_security(&operation.operation).to_vec();

    Self {
      operation,
      parameters,
      body_params,
      body_content_type,
      body_required,
      responses,
      security,
    }
  }
}

fn resolve_request_body(
  operation: &EnhancedOperation,
  normalizer: &Normalizer<'_>,
  diagnostics: &mut Diagnostics,
) -> Option<RequestBody> {
  match operation.operation.request_body.as_ref()? {
    ObjectOrRef::Object(body) => Some(body.clone()),
    ObjectOrRef::Ref(reference) => {
      let mut trail = RefTrail::new();
      normalizer
        .resolver()
        .resolve_as::<RequestBody>(&reference.ref_path, &mut trail)
        .map_err(|error| diagnostics.record(error.into_diagnostic(REQUEST_BODY_FIELD)))
        .ok()
    }
  }
}
