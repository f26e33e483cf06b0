use serde_json::{Value, json};

use crate::{document::OpenApiDocument, reference::ApiReference};

pub(crate) fn create_test_value(paths: Value, schemas: Value) -> Value {
  json!({
    "openapi": "3.0.3",
    "info": { "title": "Test API", "version": "1.0.0" },
    "paths": paths,
    "components": { "schemas": schemas }
  })
}

pub(crate) fn create_test_document(paths: Value, schemas: Value) -> OpenApiDocument {
  OpenApiDocument::from_value(create_test_value(paths, schemas)).expect("test document is valid")
}

pub(crate) fn create_schema_document(schemas: Value) -> OpenApiDocument {
  create_test_document(json!({}), schemas)
}

pub(crate) fn create_test_reference(paths: Value, schemas: Value) -> ApiReference {
  ApiReference::new(create_test_document(paths, schemas))
}

/// Two operations whose summaries both slug to `get-users`, plus one distinct.
pub(crate) fn colliding_paths() -> Value {
  json!({
    "/users": {
      "get": { "summary": "Get users", "tags": ["Users"] }
    },
    "/v2/users": {
      "get": { "summary": "Get Users!", "tags": ["Users"] },
      "post": { "operationId": "createUser", "tags": ["Users"] }
    }
  })
}
