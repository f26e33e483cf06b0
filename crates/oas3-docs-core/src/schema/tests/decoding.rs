use serde_json::json;

use crate::schema::{CombineKind, NumericBound, ObjectOrRef, SchemaObject, SchemaOrRef, SchemaType, is_schema_like};

fn decode(value: serde_json::Value) -> SchemaOrRef {
  serde_json::from_value(value).expect("schema decodes")
}

#[test]
fn test_reference_takes_precedence_over_inline_fields() {
  let schema = decode(json!({ "$ref": "#/components/schemas/Pet", "description": "ignored sibling" }));
  assert_eq!(schema.as_ref_path(), Some("#/components/schemas/Pet"));
}

#[test]
fn test_malformed_constraints_decode_as_absent() {
  let schema = decode(json!({
    "type": "string",
    "minLength": "three",
    "required": true,
    "maxLength": 8
  }));
  let ObjectOrRef::Object(schema) = schema else {
    panic!("expected inline schema");
  };
  assert_eq!(schema.min_length, None);
  assert!(schema.required.is_empty());
  assert_eq!(schema.max_length, Some(8));
  assert_eq!(schema.schema_type(), Some(SchemaType::String));
}

#[test]
fn test_type_arrays_pick_first_non_null_type() {
  let cases = [
    (json!({ "type": ["null", "integer"] }), Some(SchemaType::Integer), true),
    (json!({ "type": ["string", "null"] }), Some(SchemaType::String), true),
    (json!({ "type": "boolean" }), Some(SchemaType::Boolean), false),
    (json!({ "type": "file" }), None, false),
    (json!({ "nullable": true }), None, true),
  ];

  for (raw, expected_type, expected_nullable) in cases {
    let schema: SchemaObject = serde_json::from_value(raw.clone()).unwrap();
    assert_eq!(schema.schema_type(), expected_type, "type of {raw}");
    assert_eq!(schema.is_nullable(), expected_nullable, "nullability of {raw}");
  }
}

#[test]
fn test_bounds_support_flag_and_value_forms() {
  let cases = [
    (
      json!({ "minimum": 1 }),
      Some(NumericBound {
        value: 1.0,
        exclusive: false,
      }),
    ),
    (
      json!({ "minimum": 1, "exclusiveMinimum": true }),
      Some(NumericBound {
        value: 1.0,
        exclusive: true,
      }),
    ),
    (
      json!({ "exclusiveMinimum": 5 }),
      Some(NumericBound {
        value: 5.0,
        exclusive: true,
      }),
    ),
    (json!({ "exclusiveMinimum": true }), None),
  ];

  for (raw, expected) in cases {
    let schema: SchemaObject = serde_json::from_value(raw.clone()).unwrap();
    assert_eq!(schema.lower_bound(), expected, "lower bound of {raw}");
  }
}

#[test]
fn test_combine_kind_checks_one_of_then_any_of_then_all_of() {
  let schema: SchemaObject = serde_json::from_value(json!({
    "allOf": [{ "type": "object" }],
    "anyOf": [{ "type": "string" }]
  }))
  .unwrap();
  assert_eq!(schema.combine_kind(), Some(CombineKind::AnyOf));
  assert_eq!(SchemaObject::default().combine_kind(), None);
}

#[test]
fn test_schema_like_detection() {
  assert!(is_schema_like(&json!({ "type": "string" })));
  assert!(is_schema_like(&json!({ "properties": {} })));
  assert!(!is_schema_like(&json!({ "name": "id", "in": "path" })));
  assert!(!is_schema_like(&json!("string")));
  assert!(!is_schema_like(&json!({})));
}

#[test]
fn test_unresolved_placeholder_serializes_compactly() {
  let placeholder = SchemaObject::unresolved();
  assert!(placeholder.is_unresolved());
  assert_eq!(
    serde_json::to_value(&placeholder).unwrap(),
    json!({ "type": "string", "description": "Unresolved reference" })
  );
}
