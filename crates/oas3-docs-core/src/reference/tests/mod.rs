use serde_json::json;

use crate::{
  diagnostics::Diagnostics,
  naming::SlugOptions,
  reference::ApiReference,
  schema::{SchemaOrRef, SchemaType},
  tests::common::{create_test_document, create_test_value},
};

fn petstore() -> serde_json::Value {
  json!({
    "openapi": "3.0.3",
    "info": { "title": "Petstore", "version": "1.0.0" },
    "security": [{ "apiKey": [] }],
    "paths": {
      "/pets/{petId}": {
        "parameters": [{ "$ref": "#/components/parameters/PetId" }],
        "put": {
          "operationId": "updatePet",
          "summary": "Update a pet",
          "tags": ["pets"],
          "parameters": [
            { "name": "dryRun", "in": "query", "schema": { "type": "boolean" } },
            { "name": "X-Request-Id", "in": "header" }
          ],
          "requestBody": { "$ref": "#/components/requestBodies/PetBody" },
          "responses": {
            "200": {
              "description": "Updated",
              "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } } }
            },
            "default": { "$ref": "#/components/responses/Error" }
          },
          "security": []
        }
      }
    },
    "components": {
      "parameters": {
        "PetId": { "name": "petId", "in": "path", "required": true, "schema": { "type": "integer" } }
      },
      "requestBodies": {
        "PetBody": {
          "required": true,
          "content": {
            "text/plain": { "schema": { "type": "string" } },
            "application/merge-patch+json": { "schema": { "$ref": "#/components/schemas/Pet" } }
          }
        }
      },
      "responses": {
        "Error": { "description": "Unexpected error" }
      },
      "schemas": {
        "Pet": {
          "required": ["name"],
          "properties": {
            "name": { "type": "string" },
            "owner": { "$ref": "#/components/schemas/Owner" }
          }
        }
      }
    }
  })
}

#[test]
fn test_operation_view_assembles_the_operation() {
  let reference = ApiReference::from_value(petstore()).unwrap();
  let mut diagnostics = Diagnostics::new();

  let view = reference.operation_view("updatepet", 0, &mut diagnostics).unwrap();

  assert_eq!(view.operation.path, "/pets/{petId}");
  assert_eq!(view.operation.method, http::Method::PUT);

  let path = view.parameters.path_params.iter().map(|p| p.name.as_str()).collect::<Vec<_>>();
  let query = view.parameters.query_params.iter().map(|p| p.name.as_str()).collect::<Vec<_>>();
  assert_eq!(path, ["petId"], "path-level parameter references are merged and resolved");
  assert_eq!(query, ["dryRun"]);

  assert_eq!(view.body_content_type.as_deref(), Some("application/merge-patch+json"));
  assert!(view.body_required);
  let body = view.body_params.iter().map(|p| (p.name.as_str(), p.required)).collect::<Vec<_>>();
  assert_eq!(body, [("name", true), ("owner", false)]);
  assert!(view.body_params[1].schema.is_unresolved());

  let statuses = view
    .responses
    .iter()
    .map(|response| (response.status.as_str(), response.description.as_str()))
    .collect::<Vec<_>>();
  assert_eq!(statuses, [("200", "Updated"), ("default", "Unexpected error")]);

  assert!(view.security.is_empty(), "an empty operation list disables root security");

  assert_eq!(
    diagnostics.iter().filter(|diagnostic| diagnostic.is_reference_error()).count(),
    2,
    "Owner is missing in both the body and the 200 response: {:?}",
    diagnostics
  );
}

#[test]
fn test_operation_view_misses() {
  let reference = ApiReference::from_value(petstore()).unwrap();
  let mut diagnostics = Diagnostics::new();

  assert!(reference.operation_view("updatepet", 1, &mut diagnostics).is_none());
  assert!(reference.operation_view_for_route("nothing-here", &mut diagnostics).is_none());
  assert!(reference.operation_view_for_route("updatepet_0", &mut diagnostics).is_some());
}

#[test]
fn test_options_are_shared_by_sidebar_and_lookup() {
  let document = create_test_document(
    json!({ "/users": { "get": { "operationId": "listUsers", "summary": "List users" } } }),
    json!({}),
  );
  let reference = ApiReference::with_options(document, SlugOptions::decamelized());

  let sidebar = reference.sidebar();
  let item = &sidebar[0].requests[0].items[0];

  assert_eq!(item.url, "list-users");
  assert!(reference.find_by_slug(&item.url, 0).is_some());
  assert!(reference.find_by_route(&item.route).is_some());
}

#[test]
fn test_documents_do_not_share_state() {
  let first = ApiReference::from_value(create_test_value(
    json!({}),
    json!({ "Thing": { "type": "string" } }),
  ))
  .unwrap();
  let second = ApiReference::from_value(create_test_value(
    json!({}),
    json!({ "Thing": { "type": "integer" } }),
  ))
  .unwrap();

  let thing: SchemaOrRef = serde_json::from_value(json!({ "$ref": "#/components/schemas/Thing" })).unwrap();
  let mut diagnostics = Diagnostics::new();

  assert_eq!(
    first.normalize(&thing, "thing", &mut diagnostics).schema_type(),
    Some(SchemaType::String)
  );
  assert_eq!(
    second.normalize(&thing, "thing", &mut diagnostics).schema_type(),
    Some(SchemaType::Integer)
  );
  assert_eq!(first.cache().len(), 1);
  assert_eq!(second.cache().len(), 1);
  assert!(diagnostics.is_empty());
}

#[test]
fn test_resolve_reports_failures_as_none() {
  let reference = ApiReference::from_value(petstore()).unwrap();

  assert!(reference.resolve("#/components/schemas/Pet").is_some());
  assert!(reference.resolve("#/components/schemas/Owner").is_none());
}
