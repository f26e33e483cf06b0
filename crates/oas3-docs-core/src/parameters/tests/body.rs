use serde_json::json;

use crate::{
  diagnostics::{Diagnostic, Diagnostics},
  normalizer::Normalizer,
  parameters::{ParameterClassifier, ParameterLocation, extract_body_params},
  resolver::Resolver,
  schema::{SchemaOrRef, SchemaType},
  tests::common::create_schema_document,
};

fn schema(value: serde_json::Value) -> SchemaOrRef {
  serde_json::from_value(value).expect("schema decodes")
}

#[test]
fn test_object_body_yields_one_parameter_per_property() {
  let document = create_schema_document(json!({
    "NewPet": {
      "required": ["name"],
      "properties": {
        "name": { "type": "string", "description": "Display name" },
        "age": { "type": "integer" }
      }
    }
  }));

  let params = extract_body_params(Some(&schema(json!({ "$ref": "#/components/schemas/NewPet" }))), &document);

  let summary = params
    .iter()
    .map(|p| (p.name.as_str(), p.location, p.required, p.schema.schema_type()))
    .collect::<Vec<_>>();
  assert_eq!(
    summary,
    [
      ("name", ParameterLocation::Body, true, Some(SchemaType::String)),
      ("age", ParameterLocation::Body, false, Some(SchemaType::Integer)),
    ]
  );
  assert_eq!(params[0].description.as_deref(), Some("Display name"));
}

#[test]
fn test_all_of_body_is_merged_before_extraction() {
  let document = create_schema_document(json!({
    "Base": { "required": ["id"], "properties": { "id": { "type": "string" } } }
  }));
  let classifier = ParameterClassifier::new(Normalizer::new(Resolver::new(&document)));
  let mut diagnostics = Diagnostics::new();

  let params = classifier.extract_body_params(
    Some(&schema(json!({
      "allOf": [
        { "$ref": "#/components/schemas/Base" },
        { "required": ["note"], "properties": { "note": { "type": "string" } } }
      ]
    }))),
    "POST /notes",
    &mut diagnostics,
  );

  let names = params.iter().map(|p| (p.name.as_str(), p.required)).collect::<Vec<_>>();
  assert_eq!(names, [("id", true), ("note", true)]);
  assert!(diagnostics.is_empty());
}

#[test]
fn test_non_object_body_yields_nothing_and_reports() {
  let document = create_schema_document(json!({}));
  let classifier = ParameterClassifier::new(Normalizer::new(Resolver::new(&document)));

  let cases = [
    (json!({ "type": "array", "items": { "type": "string" } }), "array"),
    (json!({ "type": "string", "format": "binary" }), "string"),
  ];

  for (raw, found) in cases {
    let mut diagnostics = Diagnostics::new();
    let params = classifier.extract_body_params(Some(&schema(raw.clone())), "PUT /upload", &mut diagnostics);

    assert!(params.is_empty(), "no parameters for {raw}");
    assert_eq!(
      diagnostics.into_vec(),
      [Diagnostic::NonObjectBody {
        operation: "PUT /upload".to_string(),
        found: found.to_string(),
      }]
    );
  }
}

#[test]
fn test_absent_body_is_silent() {
  let document = create_schema_document(json!({}));
  let classifier = ParameterClassifier::new(Normalizer::new(Resolver::new(&document)));
  let mut diagnostics = Diagnostics::new();

  assert!(classifier.extract_body_params(None, "GET /", &mut diagnostics).is_empty());
  assert!(diagnostics.is_empty());
}
