use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use oas3_docs_core::{ApiReference, Diagnostics, OperationView, ParameterObject, RouteKey, SlugOptions};
use serde::Serialize;
use serde_json::Value;

use crate::{ui::Colors, utils::spec::load_reference};

const OPERATIONS_EXTENSION: &str = "x-operations";
const SIDEBAR_EXTENSION: &str = "x-sidebar";

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct BuildConfig {
  pub input: PathBuf,
  pub output: PathBuf,
  pub with_sidebar: bool,
  pub options: SlugOptions,
  pub verbose: bool,
  pub quiet: bool,
}

impl BuildConfig {
  async fn write_output(&self, artifact: &Value) -> anyhow::Result<()> {
    if let Some(parent) = self.output.parent()
      && !parent.as_os_str().is_empty()
    {
      tokio::fs::create_dir_all(parent)
        .await
        .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let bytes = serde_json::to_vec_pretty(artifact)?;
    tokio::fs::write(&self.output, bytes)
      .await
      .with_context(|| format!("failed to write {}", self.output.display()))?;
    Ok(())
  }
}

/// Precomputed per-operation data embedded under `x-operations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationSummary {
  pub route: RouteKey,
  pub method: String,
  pub path: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub operation_id: Option<String>,
  pub path_params: Vec<String>,
  pub query_params: Vec<String>,
  pub body_params: Vec<String>,
}

impl From<&OperationView> for OperationSummary {
  fn from(view: &OperationView) -> Self {
    let names = |params: &[ParameterObject]| -> Vec<String> { params.iter().map(|param| param.name.clone()).collect() };
    Self {
      route: view.operation.route.clone(),
      method: view.operation.method.to_string(),
      path: view.operation.path.clone(),
      operation_id: view.operation.operation.operation_id.clone(),
      path_params: names(&view.parameters.path_params),
      query_params: names(&view.parameters.query_params),
      body_params: names(&view.body_params),
    }
  }
}

#[derive(Debug, Default)]
struct BuildStats {
  operations: usize,
  sidebar_groups: Option<usize>,
}

/// Copies the raw document and adds the precomputed extensions.
fn enhance_document(
  reference: &ApiReference,
  with_sidebar: bool,
  diagnostics: &mut Diagnostics,
) -> anyhow::Result<(Value, BuildStats)> {
  let mut artifact = reference.document().raw().clone();
  let Some(root) = artifact.as_object_mut() else {
    anyhow::bail!("OpenAPI document root is not an object");
  };

  let operations = reference
    .registry()
    .routes()
    .filter_map(|route| reference.operation_view(&route.slug, route.ordinal, diagnostics))
    .map(|view| OperationSummary::from(&view))
    .collect::<Vec<_>>();

  let mut stats = BuildStats {
    operations: operations.len(),
    ..Default::default()
  };
  root.insert(OPERATIONS_EXTENSION.to_string(), serde_json::to_value(operations)?);

  if with_sidebar {
    let sidebar = reference.sidebar();
    stats.sidebar_groups = Some(sidebar.iter().map(|collection| collection.requests.len()).sum());
    root.insert(SIDEBAR_EXTENSION.to_string(), serde_json::to_value(sidebar)?);
  }

  Ok((artifact, stats))
}

struct BuildLogger<'a> {
  config: &'a BuildConfig,
  colors: &'a Colors,
}

impl<'a> BuildLogger<'a> {
  fn new(config: &'a BuildConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        message.with(self.colors.primary())
      );
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn print_statistics(&self, stats: &BuildStats, diagnostics: &Diagnostics) {
    self.stat("Operations:", stats.operations.to_string());
    if let Some(groups) = stats.sidebar_groups {
      self.stat("Sidebar groups:", groups.to_string());
    }
    if !diagnostics.is_empty() {
      self.stat("Warnings:", diagnostics.len().to_string());
    }
  }

  fn print_warnings(&self, diagnostics: &Diagnostics) {
    if diagnostics.is_empty() || self.config.quiet || !self.config.verbose {
      return;
    }

    println!();
    for diagnostic in diagnostics {
      eprintln!(
        "{} {}",
        "Warning:".with(self.colors.accent()),
        diagnostic.to_string().with(self.colors.primary())
      );
    }
  }

  fn log_success(&self) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        "Successfully built reference artifact".with(self.colors.success())
      );
    }
  }
}

pub async fn build_artifact(config: &BuildConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = BuildLogger::new(config, colors);

  logger.info(&format!("Loading OpenAPI spec from: {}", config.input.display()));
  let reference = load_reference(&config.input, config.options).await?;

  logger.info("Resolving operations...");
  let mut diagnostics = Diagnostics::new();
  let (artifact, stats) = enhance_document(&reference, config.with_sidebar, &mut diagnostics)?;
  logger.print_statistics(&stats, &diagnostics);
  logger.print_warnings(&diagnostics);

  logger.info(&format!("Writing to: {}", config.output.display()));
  config.write_output(&artifact).await?;

  logger.log_success();
  Ok(())
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::ui::colors::Theme;

  fn petstore() -> Value {
    json!({
      "openapi": "3.0.3",
      "info": { "title": "Petstore", "version": "1.0.0" },
      "paths": {
        "/pets/{petId}": {
          "parameters": [{ "name": "petId", "in": "path", "schema": { "type": "string" } }],
          "get": {
            "operationId": "showPetById",
            "tags": ["pets"],
            "parameters": [
              { "name": "fields", "in": "query", "schema": { "type": "string" } },
              { "name": "X-Trace", "in": "header", "schema": { "type": "string" } }
            ]
          },
          "put": {
            "operationId": "updatePet",
            "tags": ["pets"],
            "requestBody": {
              "content": {
                "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } }
              }
            }
          }
        },
        "/broken": {
          "post": {
            "summary": "Broken body",
            "requestBody": {
              "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Missing" } } }
            }
          }
        }
      },
      "components": {
        "schemas": {
          "Pet": {
            "type": "object",
            "required": ["name"],
            "properties": { "name": { "type": "string" }, "tag": { "type": "string" } }
          }
        }
      }
    })
  }

  #[test]
  fn test_enhance_document_adds_operations() {
    let reference = ApiReference::from_value(petstore()).unwrap();
    let mut diagnostics = Diagnostics::new();
    let (artifact, stats) = enhance_document(&reference, false, &mut diagnostics).unwrap();

    assert_eq!(stats.operations, 3);
    assert_eq!(stats.sidebar_groups, None);
    assert!(artifact.get(SIDEBAR_EXTENSION).is_none());
    assert_eq!(artifact["info"]["title"], "Petstore", "original document is preserved");

    let operations = &artifact[OPERATIONS_EXTENSION];
    assert_eq!(
      operations[0],
      json!({
        "route": "showpetbyid",
        "method": "GET",
        "path": "/pets/{petId}",
        "operationId": "showPetById",
        "pathParams": ["petId"],
        "queryParams": ["fields"],
        "bodyParams": []
      })
    );
    assert_eq!(operations[1]["bodyParams"], json!(["name", "tag"]));
    assert_eq!(operations[2]["route"], "broken-body");
    assert_eq!(operations[2]["bodyParams"], json!([]));

    assert!(
      diagnostics.iter().any(|diagnostic| diagnostic.is_reference_error()),
      "missing body schema is reported"
    );
  }

  #[test]
  fn test_enhance_document_with_sidebar() {
    let reference = ApiReference::from_value(petstore()).unwrap();
    let mut diagnostics = Diagnostics::new();
    let (artifact, stats) = enhance_document(&reference, true, &mut diagnostics).unwrap();

    assert_eq!(stats.sidebar_groups, Some(2));
    let groups = artifact[SIDEBAR_EXTENSION][0]["requests"].as_array().unwrap();
    let names = groups.iter().map(|group| group["name"].clone()).collect::<Vec<_>>();
    assert_eq!(names, [json!("pets"), json!("Untagged")]);
  }

  #[tokio::test]
  async fn test_build_artifact_writes_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("petstore.json");
    let output = dir.path().join("dist").join("reference.json");
    tokio::fs::write(&input, serde_json::to_vec(&petstore()).unwrap())
      .await
      .unwrap();

    let config = BuildConfig {
      input,
      output: output.clone(),
      with_sidebar: true,
      options: SlugOptions::default(),
      verbose: false,
      quiet: true,
    };
    build_artifact(&config, &Colors::new(false, Theme::Dark)).await.unwrap();

    let written: Value = serde_json::from_slice(&tokio::fs::read(&output).await.unwrap()).unwrap();
    assert_eq!(written[OPERATIONS_EXTENSION].as_array().map(Vec::len), Some(3));
    assert!(written.get(SIDEBAR_EXTENSION).is_some());
    assert_eq!(written["components"]["schemas"]["Pet"]["required"], json!(["name"]));
  }
}
