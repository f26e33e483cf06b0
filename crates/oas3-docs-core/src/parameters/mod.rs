//! Parameter classification and request-body extraction.
//!
//! Only `path` and `query` parameters reach the documentation UI; `header`
//! and `cookie` parameters are valid but intentionally left out. Request body
//! properties become `body` parameters.

mod merge;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

pub use merge::merge_parameters;

pub use crate::document::ParameterLocation;
use crate::{
  composite::flatten_all_of,
  diagnostics::{Diagnostic, Diagnostics},
  document::{OpenApiDocument, Parameter, ParameterOrRef},
  normalizer::Normalizer,
  resolver::{RefTrail, ResolveError, Resolver},
  schema::{CombineKind, ObjectOrRef, SchemaObject, SchemaOrRef, SchemaType},
};

const BODY_FIELD: &str = "body";
const PARAMETERS_FIELD: &str = "parameters";

/// A parameter ready for rendering: resolved, normalized and located.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterObject {
  pub name: String,
  #[serde(rename = "in")]
  pub location: ParameterLocation,
  pub required: bool,
  pub schema: SchemaObject,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub combine_schemas: Option<CombineKind>,
}

impl ParameterObject {
  fn new(name: String, location: ParameterLocation, required: bool, schema: SchemaObject) -> Self {
    let description = schema.description.clone();
    let combine_schemas = schema.combine_kind();
    Self {
      name,
      location,
      required,
      schema,
      description,
      combine_schemas,
    }
  }
}

/// Path and query parameters of one operation, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedParameters {
  pub path_params: Vec<ParameterObject>,
  pub query_params: Vec<ParameterObject>,
}

impl ClassifiedParameters {
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.path_params.is_empty() && self.query_params.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &ParameterObject> {
    self.path_params.iter().chain(&self.query_params)
  }
}

/// Classifies parameters and extracts body parameters against one document.
#[derive(Debug, Clone, Copy)]
pub struct ParameterClassifier<'a> {
  normalizer: Normalizer<'a>,
}

impl<'a> ParameterClassifier<'a> {
  #[must_use]
  pub fn new(normalizer: Normalizer<'a>) -> Self {
    Self { normalizer }
  }

  fn resolver(&self) -> Resolver<'a> {
    self.normalizer.resolver()
  }

  /// Resolves a parameter entry, following `#/components/parameters/...` refs.
  ///
  /// Returns `None` and records [`Diagnostic::UnresolvedParameter`] when a
  /// reference cannot be followed or lands on something without a `name` and
  /// a known `in`.
  pub fn resolve_parameter(
    &self,
    parameter: &ParameterOrRef,
    operation: &str,
    diagnostics: &mut Diagnostics,
  ) -> Option<Parameter> {
    match parameter {
      ObjectOrRef::Object(parameter) => Some(parameter.clone()),
      ObjectOrRef::Ref(reference) => match resolve_parameter_ref(self.resolver(), &reference.ref_path) {
        Ok(parameter) => Some(parameter),
        Err(_) => {
          diagnostics.record(Diagnostic::UnresolvedParameter {
            reference: reference.ref_path.clone(),
            operation: operation.to_string(),
          });
          None
        }
      },
    }
  }

  /// Normalizes and buckets `parameters` into path and query lists.
  ///
  /// `operation` names the owning operation in diagnostics.
  pub fn classify(
    &self,
    parameters: &[ParameterOrRef],
    operation: &str,
    diagnostics: &mut Diagnostics,
  ) -> ClassifiedParameters {
    let mut classified = ClassifiedParameters::default();

    for parameter in parameters {
      let Some(parameter) = self.resolve_parameter(parameter, operation, diagnostics) else {
        continue;
      };

      let bucket = match parameter.location {
        ParameterLocation::Path => &mut classified.path_params,
        ParameterLocation::Query => &mut classified.query_params,
        _ => continue,
      };
      bucket.push(self.normalize_parameter(parameter, diagnostics));
    }

    classified
  }

  fn normalize_parameter(&self, parameter: Parameter, diagnostics: &mut Diagnostics) -> ParameterObject {
    let schema = match &parameter.schema {
      Some(schema) => self.normalizer.normalize(schema, &parameter.name, diagnostics),
      None => self
        .normalizer
        .normalize_object(&SchemaObject::of_type(SchemaType::String), &parameter.name, diagnostics),
    };
    let required = parameter
      .required
      .unwrap_or(parameter.location == ParameterLocation::Path);

    let mut object = ParameterObject::new(parameter.name, parameter.location, required, schema);
    if parameter.description.is_some() {
      object.description = parameter.description;
    }
    object
  }

  /// Turns the properties of an object body schema into `body` parameters.
  ///
  /// An `allOf` body is merged first. A body that does not normalize to an
  /// object yields no parameters and records [`Diagnostic::NonObjectBody`].
  pub fn extract_body_params(
    &self,
    body: Option<&SchemaOrRef>,
    operation: &str,
    diagnostics: &mut Diagnostics,
  ) -> Vec<ParameterObject> {
    let Some(body) = body else {
      return Vec::new();
    };

    let normalized = self.normalizer.normalize(body, BODY_FIELD, diagnostics);
    let schema = flatten_all_of(&normalized, &self.normalizer, diagnostics);

    let found = schema.schema_type();
    if found != Some(SchemaType::Object) {
      diagnostics.record(Diagnostic::NonObjectBody {
        operation: operation.to_string(),
        found: found.map_or_else(|| "untyped".to_string(), |found| found.to_string()),
      });
      return Vec::new();
    }

    schema
      .property_schemas()
      .map(|(name, property)| {
        ParameterObject::new(
          name.to_string(),
          ParameterLocation::Body,
          schema.is_required(name),
          property.clone(),
        )
      })
      .collect()
  }
}

/// Follows a parameter reference to a target that declares a name and a known location.
pub(crate) fn resolve_parameter_ref(resolver: Resolver<'_>, ref_path: &str) -> Result<Parameter, ResolveError> {
  let mut trail = RefTrail::new();
  let parameter = resolver.resolve_as::<Parameter>(ref_path, &mut trail)?;
  if parameter.is_declared() {
    Ok(parameter)
  } else {
    Err(ResolveError::Mismatched(ref_path.to_string()))
  }
}

/// Classifies `parameters` against `document`, logging and dropping diagnostics.
#[must_use]
pub fn classify(parameters: &[ParameterOrRef], document: &OpenApiDocument) -> ClassifiedParameters {
  let mut diagnostics = Diagnostics::new();
  classify_detached(parameters, document, &mut diagnostics)
}

/// Classifies a parameter list that belongs to no located operation.
pub(crate) fn classify_detached(
  parameters: &[ParameterOrRef],
  document: &OpenApiDocument,
  diagnostics: &mut Diagnostics,
) -> ClassifiedParameters {
  ParameterClassifier::new(Normalizer::new(Resolver::new(document))).classify(parameters, PARAMETERS_FIELD, diagnostics)
}

/// Extracts body parameters from `body` against `document`, logging and dropping diagnostics.
#[must_use]
pub fn extract_body_params(body: Option<&SchemaOrRef>, document: &OpenApiDocument) -> Vec<ParameterObject> {
  let mut diagnostics = Diagnostics::new();
  ParameterClassifier::new(Normalizer::new(Resolver::new(document))).extract_body_params(
    body,
    BODY_FIELD,
    &mut diagnostics,
  )
}
