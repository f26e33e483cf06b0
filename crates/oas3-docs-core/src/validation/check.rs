use regex::Regex;
use serde_json::Value;
use validator::ValidateEmail;

use super::{Rule, RuleKind, bound_holds, display_value};
use crate::schema::{NumericBound, SchemaType};

const MULTIPLE_TOLERANCE: f64 = 1e-9;

/// The primitive a field's values must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ValueKind {
  String,
  Integer,
  Number,
}

/// A present value converted to the field's primitive.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum TypedValue<'a> {
  Text(&'a str),
  Numeric(f64),
}

impl ValueKind {
  pub(super) fn for_type(schema_type: SchemaType) -> Option<Self> {
    match schema_type {
      SchemaType::String => Some(Self::String),
      SchemaType::Integer => Some(Self::Integer),
      SchemaType::Number => Some(Self::Number),
      SchemaType::Boolean | SchemaType::Object | SchemaType::Array => None,
    }
  }

  pub(super) fn rule(self) -> Rule {
    match self {
      Self::String => Rule::new(RuleKind::Type, "string", "Must be a string"),
      Self::Integer => Rule::new(RuleKind::Type, "integer", "Must be an integer"),
      Self::Number => Rule::new(RuleKind::Type, "number", "Must be a number"),
    }
  }

  /// Converts `value` to this primitive, or `None` when it has another type.
  pub(super) fn coerce(self, value: &Value) -> Option<TypedValue<'_>> {
    match self {
      Self::String => value.as_str().map(TypedValue::Text),
      Self::Number => numeric(value).map(TypedValue::Numeric),
      Self::Integer => numeric(value)
        .filter(|number| number.fract() == 0.0)
        .map(TypedValue::Numeric),
    }
  }
}

fn numeric(value: &Value) -> Option<f64> {
  let number = match value {
    Value::Number(number) => number.as_f64(),
    Value::String(text) => text.trim().parse::<f64>().ok(),
    _ => None,
  };
  number.filter(|number| number.is_finite())
}

/// The executable side of one rule.
#[derive(Debug, Clone)]
pub(super) enum Check {
  Type,
  Required,
  Enum(Vec<Value>),
  Email,
  MinLength(u64),
  MaxLength(u64),
  Pattern(Regex),
  Minimum(NumericBound),
  Maximum(NumericBound),
  MultipleOf(f64),
}

impl Check {
  /// Whether a present, correctly typed value satisfies this check.
  ///
  /// Checks that do not apply to the value's primitive pass.
  pub(super) fn passes(&self, value: &TypedValue<'_>) -> bool {
    match (self, value) {
      (Self::Type | Self::Required, _) => true,
      (Self::Enum(values), TypedValue::Text(text)) => values.iter().any(|allowed| display_value(allowed) == *text),
      (Self::Email, TypedValue::Text(text)) => text.validate_email(),
      (Self::MinLength(min), TypedValue::Text(text)) => char_count(text) >= *min,
      (Self::MaxLength(max), TypedValue::Text(text)) => char_count(text) <= *max,
      (Self::Pattern(pattern), TypedValue::Text(text)) => pattern.is_match(text),
      (Self::Minimum(bound), TypedValue::Numeric(number)) => bound_holds(*number, *bound, true),
      (Self::Maximum(bound), TypedValue::Numeric(number)) => bound_holds(*number, *bound, false),
      (Self::MultipleOf(step), TypedValue::Numeric(number)) => {
        let quotient = number / step;
        (quotient - quotient.round()).abs() < MULTIPLE_TOLERANCE
      }
      _ => true,
    }
  }
}

fn char_count(text: &str) -> u64 {
  u64::try_from(text.chars().count()).unwrap_or(u64::MAX)
}
