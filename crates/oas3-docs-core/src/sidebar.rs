//! Tag-grouped navigation over every operation of a document.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
  document::OpenApiDocument,
  locator::{OperationEntry, OperationRegistry},
  naming::SlugOptions,
};

/// Group name for operations without tags.
pub const UNTAGGED: &str = "Untagged";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarRequestItem {
  pub name: String,
  /// The bare operation slug.
  pub url: String,
  /// The slug plus its collision ordinal; unique per document.
  pub route: String,
  /// Lowercase HTTP method.
  pub request_type: String,
}

/// All items of one tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarRequest {
  pub name: String,
  pub items: Vec<SidebarRequestItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarCollection {
  pub collection_name: String,
  pub requests: Vec<SidebarRequest>,
}

fn non_blank(text: Option<&str>) -> Option<&str> {
  text.filter(|text| !text.trim().is_empty())
}

/// Display name precedence: `summary`, then `description`, then `<METHOD> <path>`.
fn display_name(entry: &OperationEntry<'_>) -> String {
  let operation = entry.operation;
  non_blank(operation.summary.as_deref())
    .or_else(|| non_blank(operation.description.as_deref()))
    .map_or_else(
      || format!("{} {}", entry.method.to_http(), entry.path),
      ToString::to_string,
    )
}

/// Builds the navigation tree in one pass over the operations.
///
/// Groups appear in the order their tag is first seen; items inside a group
/// are stable-sorted by display name. Slugs come from the same registry the
/// locator resolves, so every `route` finds its operation.
#[must_use]
pub fn build_sidebar(document: &OpenApiDocument, options: SlugOptions) -> Vec<SidebarCollection> {
  let registry = OperationRegistry::new(document, options);
  let mut groups = IndexMap::<String, Vec<SidebarRequestItem>>::new();

  for (route, entry) in registry.iter() {
    let tag = entry.operation.primary_tag().unwrap_or(UNTAGGED);
    groups.entry(tag.to_string()).or_default().push(SidebarRequestItem {
      name: display_name(entry),
      url: route.slug.clone(),
      route: route.to_string(),
      request_type: entry.method.as_str().to_string(),
    });
  }

  let requests = groups
    .into_iter()
    .map(|(name, mut items)| {
      items.sort_by(|left, right| left.name.cmp(&right.name));
      SidebarRequest { name, items }
    })
    .collect();

  vec![SidebarCollection {
    collection_name: document.title().to_string(),
    requests,
  }]
}
