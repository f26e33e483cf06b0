use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// The schema facet a [`Rule`] enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum RuleKind {
  Type,
  Required,
  Enum,
  Format,
  MinLength,
  MaxLength,
  Pattern,
  Minimum,
  Maximum,
  MultipleOf,
}

/// One derived constraint, described twice.
///
/// `short_message` is a compact label; `long_message` is the sentence shown
/// to users and is also the failure message of this rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
  #[serde(rename = "rule")]
  pub kind: RuleKind,
  pub short_message: String,
  pub long_message: String,
}

impl Rule {
  pub(crate) fn new(kind: RuleKind, short_message: impl Into<String>, long_message: impl Into<String>) -> Self {
    Self {
      kind,
      short_message: short_message.into(),
      long_message: long_message.into(),
    }
  }

  pub(crate) fn issue(&self) -> Issue {
    Issue {
      kind: self.kind,
      message: self.long_message.clone(),
    }
  }
}

/// A failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
  #[serde(rename = "rule")]
  pub kind: RuleKind,
  pub message: String,
}
