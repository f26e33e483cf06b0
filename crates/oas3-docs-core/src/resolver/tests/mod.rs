use serde_json::json;

use crate::{
  diagnostics::Diagnostic,
  document::Parameter,
  resolver::{RefCache, RefTrail, ResolveError, Resolver, resolve},
  schema::SchemaType,
  tests::common::{create_schema_document, create_test_value},
};

fn fixture() -> crate::document::OpenApiDocument {
  create_schema_document(json!({
    "Pet": { "type": "object", "properties": { "name": { "type": "string" } } },
    "PetAlias": { "$ref": "#/components/schemas/Pet" },
    "AliasOfAlias": { "$ref": "#/components/schemas/PetAlias" },
    "a/b": { "type": "integer" },
    "tilde~name": { "type": "boolean" },
    "with space": { "type": "number" },
    "Ping": { "$ref": "#/components/schemas/Pong" },
    "Pong": { "$ref": "#/components/schemas/Ping" },
    "NotASchema": { "foo": "bar" }
  }))
}

#[test]
fn test_resolve_schema_targets() {
  let document = fixture();
  let resolver = Resolver::new(&document);

  let cases = [
    ("#/components/schemas/Pet", SchemaType::Object),
    ("#/components/schemas/PetAlias", SchemaType::Object),
    ("#/components/schemas/AliasOfAlias", SchemaType::Object),
    ("#/components/schemas/a~1b", SchemaType::Integer),
    ("#/components/schemas/tilde~0name", SchemaType::Boolean),
    ("#/components/schemas/with%20space", SchemaType::Number),
  ];

  for (ref_path, expected) in cases {
    let mut trail = RefTrail::new();
    let schema = resolver
      .resolve_schema(ref_path, &mut trail)
      .unwrap_or_else(|error| panic!("{ref_path} failed: {error:?}"));
    assert_eq!(schema.schema_type(), Some(expected), "type behind {ref_path}");
  }
}

#[test]
fn test_resolve_failures_are_classified() {
  let document = fixture();
  let resolver = Resolver::new(&document);

  let cases = [
    (
      "#/components/schemas/Missing",
      ResolveError::Missing("#/components/schemas/Missing".to_string()),
    ),
    (
      "other.yaml#/components/schemas/Pet",
      ResolveError::Unsupported("other.yaml#/components/schemas/Pet".to_string()),
    ),
    (
      "#/components/schemas/Ping",
      ResolveError::Cyclic("#/components/schemas/Ping".to_string()),
    ),
    (
      "#/components/schemas/NotASchema",
      ResolveError::Mismatched("#/components/schemas/NotASchema".to_string()),
    ),
    ("#/paths", ResolveError::Mismatched("#/paths".to_string())),
  ];

  for (ref_path, expected) in cases {
    let mut trail = RefTrail::new();
    assert_eq!(resolver.resolve_schema(ref_path, &mut trail), Err(expected), "resolving {ref_path}");
  }
}

#[test]
fn test_resolve_errors_map_to_diagnostics() {
  let cases = [
    (
      ResolveError::Cyclic("#/a".to_string()),
      Diagnostic::CyclicReference {
        reference: "#/a".to_string(),
        field: "body".to_string(),
      },
    ),
    (
      ResolveError::Unsupported("a.json".to_string()),
      Diagnostic::UnsupportedReference {
        reference: "a.json".to_string(),
        field: "body".to_string(),
      },
    ),
    (
      ResolveError::Missing("#/b".to_string()),
      Diagnostic::UnresolvedReference {
        reference: "#/b".to_string(),
        field: "body".to_string(),
      },
    ),
  ];

  for (error, expected) in cases {
    assert_eq!(error.into_diagnostic("body"), expected);
  }
}

#[test]
fn test_trail_records_the_chain_and_is_caller_owned() {
  let document = fixture();
  let resolver = Resolver::new(&document);

  let mut trail = RefTrail::new();
  resolver
    .resolve_schema("#/components/schemas/AliasOfAlias", &mut trail)
    .unwrap();
  assert_eq!(
    trail.iter().map(String::as_str).collect::<Vec<_>>(),
    [
      "#/components/schemas/AliasOfAlias",
      "#/components/schemas/PetAlias",
      "#/components/schemas/Pet"
    ]
  );

  let again = resolver.resolve_schema("#/components/schemas/Pet", &mut trail);
  assert!(matches!(again, Err(ResolveError::Cyclic(_))), "same trail sees a revisit");

  let mut fresh = RefTrail::new();
  assert!(resolver.resolve_schema("#/components/schemas/Pet", &mut fresh).is_ok());
}

#[test]
fn test_cache_memoizes_pointer_targets() {
  let document = fixture();
  let cache = RefCache::new();
  let resolver = Resolver::with_cache(&document, &cache);

  for _ in 0..3 {
    let mut trail = RefTrail::new();
    resolver.resolve_schema("#/components/schemas/PetAlias", &mut trail).unwrap();
  }
  assert_eq!(cache.len(), 2, "alias and target are cached once each");

  let mut trail = RefTrail::new();
  assert!(resolver.resolve_schema("#/components/schemas/Missing", &mut trail).is_err());
  assert_eq!(cache.len(), 3, "misses are cached too");

  cache.clear();
  assert!(cache.is_empty());
}

#[test]
fn test_resolve_as_decodes_non_schema_components() {
  let document = crate::document::OpenApiDocument::from_value(json!({
    "openapi": "3.0.3",
    "info": { "title": "T", "version": "1" },
    "paths": {},
    "components": {
      "parameters": {
        "Limit": { "name": "limit", "in": "query", "schema": { "type": "integer" } },
        "LimitAlias": { "$ref": "#/components/parameters/Limit" }
      }
    }
  }))
  .unwrap();
  let resolver = Resolver::new(&document);

  let mut trail = RefTrail::new();
  let parameter = resolver
    .resolve_as::<Parameter>("#/components/parameters/LimitAlias", &mut trail)
    .unwrap();

  assert_eq!(parameter.name, "limit");
  assert_eq!(parameter.location, crate::document::ParameterLocation::Query);
}

#[test]
fn test_resolve_convenience_returns_none_on_failure() {
  let document = crate::document::OpenApiDocument::from_value(create_test_value(
    json!({}),
    json!({ "Id": { "type": "string", "format": "uuid" } }),
  ))
  .unwrap();

  let mut visited = RefTrail::new();
  let schema = resolve("#/components/schemas/Id", &document, &mut visited).unwrap();
  assert_eq!(schema.format.as_deref(), Some("uuid"));

  let mut visited = RefTrail::new();
  assert!(resolve("#/components/schemas/Nope", &document, &mut visited).is_none());
}
