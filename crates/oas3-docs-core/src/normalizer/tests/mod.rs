use serde_json::json;

use crate::{
  diagnostics::{Diagnostic, Diagnostics},
  normalizer::{Normalizer, infer_type},
  resolver::Resolver,
  schema::{CombineKind, SchemaObject, SchemaOrRef, SchemaType},
  tests::common::create_schema_document,
};

fn schema(value: serde_json::Value) -> SchemaOrRef {
  serde_json::from_value(value).expect("schema decodes")
}

#[test]
fn test_infer_type() {
  let cases = [
    (json!({ "properties": { "a": {} } }), SchemaType::Object),
    (json!({ "additionalProperties": { "type": "string" } }), SchemaType::Object),
    (json!({ "items": { "type": "string" } }), SchemaType::Array),
    (json!({ "properties": { "a": {} }, "items": {} }), SchemaType::Object),
    (json!({ "enum": [1, 2] }), SchemaType::String),
    (json!({}), SchemaType::String),
  ];

  for (raw, expected) in cases {
    let parsed: SchemaObject = serde_json::from_value(raw.clone()).unwrap();
    assert_eq!(infer_type(&parsed), expected, "inferred type of {raw}");
  }
}

#[test]
fn test_normalize_resolves_nested_properties_and_items() {
  let document = create_schema_document(json!({
    "Tag": { "type": "object", "properties": { "label": { "type": "string" } } },
    "Pet": {
      "required": ["name"],
      "properties": {
        "name": { "type": "string", "minLength": 1 },
        "tags": { "type": "array", "items": { "$ref": "#/components/schemas/Tag" } }
      }
    }
  }));
  let normalizer = Normalizer::new(Resolver::new(&document));
  let mut diagnostics = Diagnostics::new();

  let pet = normalizer.normalize(&schema(json!({ "$ref": "#/components/schemas/Pet" })), "pet", &mut diagnostics);

  assert_eq!(pet.schema_type(), Some(SchemaType::Object));
  assert_eq!(pet.required, ["name"], "facets are kept");
  let (_, name) = pet.property_schemas().next().unwrap();
  assert_eq!(name.min_length, Some(1));
  let tags = pet.property_schemas().nth(1).map(|(_, tags)| tags).unwrap();
  let tag = tags.item_schema().expect("items are inlined");
  assert_eq!(tag.schema_type(), Some(SchemaType::Object));
  assert!(tag.properties.values().all(|label| !label.is_ref()), "no reference survives");
  assert!(diagnostics.is_empty());
}

#[test]
fn test_unresolved_reference_degrades_to_placeholder() {
  let document = create_schema_document(json!({}));
  let normalizer = Normalizer::new(Resolver::new(&document));
  let mut diagnostics = Diagnostics::new();

  let normalized = normalizer.normalize(
    &schema(json!({ "properties": { "owner": { "$ref": "#/components/schemas/Owner" } } })),
    "body",
    &mut diagnostics,
  );

  let (_, owner) = normalized.property_schemas().next().unwrap();
  assert_eq!(
    serde_json::to_value(owner).unwrap(),
    json!({ "type": "string", "description": "Unresolved reference" })
  );
  assert_eq!(
    diagnostics.into_vec(),
    [Diagnostic::UnresolvedReference {
      reference: "#/components/schemas/Owner".to_string(),
      field: "body.owner".to_string(),
    }]
  );
}

#[test]
fn test_unknown_type_is_reported_and_inferred() {
  let document = create_schema_document(json!({}));
  let normalizer = Normalizer::new(Resolver::new(&document));
  let mut diagnostics = Diagnostics::new();

  let normalized = normalizer.normalize(
    &schema(json!({ "type": "file", "items": { "type": "string" } })),
    "upload",
    &mut diagnostics,
  );

  assert_eq!(normalized.schema_type(), Some(SchemaType::Array));
  assert_eq!(
    diagnostics.into_vec(),
    [Diagnostic::UnknownSchemaType {
      type_name: "file".to_string(),
      field: "upload".to_string(),
    }]
  );
}

#[test]
fn test_nullable_type_arrays_collapse_to_single_type() {
  let document = create_schema_document(json!({}));
  let normalizer = Normalizer::new(Resolver::new(&document));
  let mut diagnostics = Diagnostics::new();

  let normalized = normalizer.normalize(&schema(json!({ "type": ["null", "integer"] })), "age", &mut diagnostics);

  assert_eq!(serde_json::to_value(&normalized).unwrap(), json!({ "type": "integer", "nullable": true }));
}

#[test]
fn test_composition_keys_are_kept_verbatim() {
  let document = create_schema_document(json!({ "Cat": { "type": "object" } }));
  let normalizer = Normalizer::new(Resolver::new(&document));
  let mut diagnostics = Diagnostics::new();

  let normalized = normalizer.normalize(
    &schema(json!({ "oneOf": [{ "$ref": "#/components/schemas/Cat" }, { "type": "string" }] })),
    "pet",
    &mut diagnostics,
  );

  assert_eq!(normalized.combine_kind(), Some(CombineKind::OneOf));
  assert!(normalized.one_of[0].is_ref(), "branches are normalized lazily");
}

fn doubling_chain(depth: usize) -> serde_json::Value {
  let mut schemas = serde_json::Map::new();
  for level in 0..depth {
    let next = json!({ "$ref": format!("#/components/schemas/L{}", level + 1) });
    schemas.insert(
      format!("L{level}"),
      json!({ "type": "object", "properties": { "a": next.clone(), "b": next } }),
    );
  }
  schemas.insert(format!("L{depth}"), json!({ "type": "string" }));
  serde_json::Value::Object(schemas)
}

#[test]
fn test_shared_references_stop_at_expansion_limit() {
  let document = create_schema_document(doubling_chain(24));
  let normalizer = Normalizer::new(Resolver::new(&document));
  let mut diagnostics = Diagnostics::new();

  let normalized = normalizer.normalize(&schema(json!({ "$ref": "#/components/schemas/L0" })), "root", &mut diagnostics);

  assert_eq!(normalized.schema_type(), Some(SchemaType::Object));
  let limits = diagnostics
    .iter()
    .filter(|diagnostic| matches!(diagnostic, Diagnostic::ExpansionLimit { .. }))
    .count();
  assert_eq!(limits, 1, "the limit is reported once per walk");
  assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_expansion_limit_reports_first_cut_reference() {
  let document = create_schema_document(doubling_chain(2));
  let mut diagnostics = Diagnostics::new();

  let normalizer = Normalizer::new(Resolver::new(&document)).with_expansion_limit(2);
  normalizer.normalize(&schema(json!({ "$ref": "#/components/schemas/L0" })), "root", &mut diagnostics);

  assert_eq!(
    diagnostics.into_vec(),
    [Diagnostic::ExpansionLimit {
      reference: "#/components/schemas/L2".to_string(),
      field: "root.a.a".to_string(),
    }]
  );
}

#[test]
fn test_shallow_shared_references_expand_fully() {
  let document = create_schema_document(doubling_chain(4));
  let normalizer = Normalizer::new(Resolver::new(&document));
  let mut diagnostics = Diagnostics::new();

  let normalized = normalizer.normalize(&schema(json!({ "$ref": "#/components/schemas/L0" })), "root", &mut diagnostics);

  let mut leaf = &normalized;
  for _ in 0..4 {
    leaf = leaf.property_schemas().nth(1).map(|(_, next)| next).expect("object level");
  }
  assert_eq!(leaf.schema_type(), Some(SchemaType::String), "every shared use is inlined");
  assert!(diagnostics.is_empty(), "{:?}", diagnostics.into_vec());
}
