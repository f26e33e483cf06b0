use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
  composite::select_branch,
  diagnostics::Diagnostics,
  normalizer::Normalizer,
  schema::{CombineKind, SchemaObject},
};

/// The editing state of one `oneOf`/`anyOf` subtree.
///
/// Values entered for a branch belong to that branch only: switching to a
/// different branch drops them so a request never mixes fields from two
/// alternatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchSelection {
  kind: CombineKind,
  branch_count: usize,
  selected: usize,
  values: IndexMap<String, Value>,
}

impl BranchSelection {
  /// A selection over `branch_count` alternatives starting at branch 0.
  #[must_use]
  pub fn new(kind: CombineKind, branch_count: usize) -> Self {
    Self {
      kind,
      branch_count,
      selected: 0,
      values: IndexMap::new(),
    }
  }

  /// Starts a selection for a schema composed with `oneOf` or `anyOf`.
  ///
  /// `allOf` schemas are merged, never selected, and yield `None`.
  #[must_use]
  pub fn for_schema(schema: &SchemaObject) -> Option<Self> {
    match schema.combine_kind()? {
      CombineKind::AllOf => None,
      kind => Some(Self::new(kind, schema.branches(kind).len())),
    }
  }

  #[must_use]
  pub fn kind(&self) -> CombineKind {
    self.kind
  }

  #[must_use]
  pub fn selected(&self) -> usize {
    self.selected
  }

  #[must_use]
  pub fn branch_count(&self) -> usize {
    self.branch_count
  }

  /// Switches to branch `index`, clearing entered values when it changes.
  ///
  /// Returns false and leaves the state untouched when `index` is out of
  /// range or already selected.
  pub fn select(&mut self, index: usize) -> bool {
    if index >= self.branch_count || index == self.selected {
      return false;
    }
    self.selected = index;
    self.values.clear();
    true
  }

  pub fn set_value(&mut self, name: impl Into<String>, value: Value) {
    self.values.insert(name.into(), value);
  }

  #[must_use]
  pub fn value(&self, name: &str) -> Option<&Value> {
    self.values.get(name)
  }

  #[must_use]
  pub fn values(&self) -> &IndexMap<String, Value> {
    &self.values
  }

  /// Normalizes the selected branch of `schema`.
  pub fn selected_schema(
    &self,
    schema: &SchemaObject,
    normalizer: &Normalizer<'_>,
    diagnostics: &mut Diagnostics,
  ) -> Option<SchemaObject> {
    select_branch(schema.branches(self.kind), self.selected, normalizer, diagnostics)
  }
}
