//! `allOf` merging and `oneOf`/`anyOf` branch selection.
//!
//! Composition branches are normalized here, on demand, rather than by the
//! normalizer.

mod selection;


pub use selection::BranchSelection;

use crate::{
  diagnostics::Diagnostics,
  normalizer::Normalizer,
  schema::{SchemaObject, SchemaOrRef, SchemaType},
};

/// Merges `allOf` branches into one object schema.
///
/// Properties are merged shallowly with later branches winning per key,
/// `required` is the first-seen union of every branch and the first non-empty
/// `description` is kept. Nested `allOf` lists inside a branch are not expanded.
pub fn combine_all_of(
  branches: &[SchemaOrRef],
  normalizer: &Normalizer<'_>,
  diagnostics: &mut Diagnostics,
) -> SchemaObject {
  let mut combined = SchemaObject::default();
  let mut fallback_type = None;

  for (index, branch) in branches.iter().enumerate() {
    let branch = normalizer.normalize(branch, &format!("allOf[{index}]"), diagnostics);
    if fallback_type.is_none() && !branch.is_unresolved() {
      fallback_type = branch.schema_type();
    }

    for (name, property) in branch.properties {
      combined.properties.insert(name, property);
    }
    for name in branch.required {
      if !combined.required.contains(&name) {
        combined.required.push(name);
      }
    }
    if combined.description.is_none() {
      combined.description = branch.description.filter(|description| !description.trim().is_empty());
    }
  }

  let schema_type = if combined.properties.is_empty() {
    fallback_type.unwrap_or(SchemaType::Object)
  } else {
    SchemaType::Object
  };
  combined.schema_type = Some(schema_type.into());
  combined
}

/// Expands a schema's own `allOf` list, keeping its own properties and
/// description ahead of the branches'.
///
/// Schemas without `allOf` are returned unchanged.
pub fn flatten_all_of(
  schema: &SchemaObject,
  normalizer: &Normalizer<'_>,
  diagnostics: &mut Diagnostics,
) -> SchemaObject {
  if schema.all_of.is_empty() {
    return schema.clone();
  }

  let mut branches = Vec::with_capacity(schema.all_of.len() + 1);
  if !schema.properties.is_empty() || !schema.required.is_empty() {
    branches.push(SchemaOrRef::from(SchemaObject {
      all_of: Vec::new(),
      schema_type: None,
      ..schema.clone()
    }));
  }
  branches.extend(schema.all_of.iter().cloned());

  let mut combined = combine_all_of(&branches, normalizer, diagnostics);
  if let Some(description) = schema.description.as_ref().filter(|description| !description.trim().is_empty()) {
    combined.description = Some(description.clone());
  }
  combined
}

/// Normalizes the `index`th `oneOf`/`anyOf` branch for rendering.
///
/// Returns `None` when `index` is out of range.
pub fn select_branch(
  branches: &[SchemaOrRef],
  index: usize,
  normalizer: &Normalizer<'_>,
  diagnostics: &mut Diagnostics,
) -> Option<SchemaObject> {
  let branch = branches.get(index)?;
  Some(normalizer.normalize(branch, &format!("branch[{index}]"), diagnostics))
}
