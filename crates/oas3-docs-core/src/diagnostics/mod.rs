#[cfg(test)]
mod tests;

use strum::Display;

/// A non-fatal condition encountered while deriving views from a document.
///
/// Each variant corresponds to a place where the engine substituted a
/// placeholder or an empty result instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Diagnostic {
  #[strum(to_string = "Unresolved reference '{reference}' for '{field}'")]
  UnresolvedReference { reference: String, field: String },
  #[strum(to_string = "Cyclic reference '{reference}' for '{field}'")]
  CyclicReference { reference: String, field: String },
  #[strum(to_string = "Unsupported reference '{reference}' for '{field}', only local '#/' pointers resolve")]
  UnsupportedReference { reference: String, field: String },
  #[strum(to_string = "Reference expansion limit reached at '{reference}' for '{field}'")]
  ExpansionLimit { reference: String, field: String },
  #[strum(to_string = "Request body of '{operation}' is '{found}', expected an object")]
  NonObjectBody { operation: String, found: String },
  #[strum(to_string = "Dropped parameter reference '{reference}' in '{operation}'")]
  UnresolvedParameter { reference: String, operation: String },
  #[strum(to_string = "Unknown schema type '{type_name}' for '{field}'")]
  UnknownSchemaType { type_name: String, field: String },
  #[strum(to_string = "Invalid pattern '{pattern}': {error}")]
  InvalidPattern { pattern: String, error: String },
}

impl Diagnostic {
  /// Returns true when the diagnostic concerns a `$ref` that could not be followed.
  #[must_use]
  pub fn is_reference_error(&self) -> bool {
    matches!(
      self,
      Self::UnresolvedReference { .. }
        | Self::CyclicReference { .. }
        | Self::UnsupportedReference { .. }
        | Self::ExpansionLimit { .. }
        | Self::UnresolvedParameter { .. }
    )
  }

  /// The `$ref` pointer the diagnostic concerns, if any.
  #[must_use]
  pub fn reference(&self) -> Option<&str> {
    match self {
      Self::UnresolvedReference { reference, .. }
      | Self::CyclicReference { reference, .. }
      | Self::UnsupportedReference { reference, .. }
      | Self::ExpansionLimit { reference, .. }
      | Self::UnresolvedParameter { reference, .. } => Some(reference),
      Self::NonObjectBody { .. } | Self::UnknownSchemaType { .. } | Self::InvalidPattern { .. } => None,
    }
  }

  /// The field or operation the diagnostic was raised for, if any.
  #[must_use]
  pub fn field(&self) -> Option<&str> {
    match self {
      Self::UnresolvedReference { field, .. }
      | Self::CyclicReference { field, .. }
      | Self::UnsupportedReference { field, .. }
      | Self::ExpansionLimit { field, .. }
      | Self::UnknownSchemaType { field, .. } => Some(field),
      Self::NonObjectBody { operation, .. } | Self::UnresolvedParameter { operation, .. } => Some(operation),
      Self::InvalidPattern { .. } => None,
    }
  }
}

/// Sink for [`Diagnostic`]s collected during one derivation call.
///
/// Every recorded diagnostic is also emitted as a `tracing` warning, so callers
/// that never inspect the sink still see the condition in their logs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
  entries: Vec<Diagnostic>,
}

impl Diagnostics {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  pub fn record(&mut self, diagnostic: Diagnostic) {
    tracing::warn!(
      reference = diagnostic.reference(),
      field = diagnostic.field(),
      %diagnostic,
      "degraded OpenAPI document"
    );
    self.entries.push(diagnostic);
  }

  pub fn record_all(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
    for diagnostic in diagnostics {
      self.record(diagnostic);
    }
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
    self.entries.iter()
  }

  #[must_use]
  pub fn into_vec(self) -> Vec<Diagnostic> {
    self.entries
  }
}

impl<'a> IntoIterator for &'a Diagnostics {
  type Item = &'a Diagnostic;
  type IntoIter = std::slice::Iter<'a, Diagnostic>;

  fn into_iter(self) -> Self::IntoIter {
    self.entries.iter()
  }
}
