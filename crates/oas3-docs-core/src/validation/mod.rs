//! Validation rules derived from leaf schema constraints.
//!
//! Rules are ordered for display: the type rule first, then `required`, then
//! the facet rules. String schemas emit `enum` (which replaces every later
//! string rule), `format: email`, `minLength`, `maxLength` and `pattern`;
//! numeric schemas emit `minimum`, `maximum` and `multipleOf`.

mod check;
mod rule;


use serde_json::Value;

use check::{Check, ValueKind};
pub use rule::{Issue, Rule, RuleKind};

use crate::{
  diagnostics::{Diagnostic, Diagnostics},
  error::UnsupportedFieldType,
  normalizer::infer_type,
  schema::{NumericBound, SchemaObject, SchemaType},
};

const EMAIL_FORMAT: &str = "email";

#[derive(Debug, Clone)]
struct CompiledRule {
  rule: Rule,
  check: Check,
}

/// The rules of one field plus the compiled checks that enforce them.
#[derive(Debug, Clone)]
pub struct ValidationContract {
  value_kind: ValueKind,
  required: bool,
  rules: Vec<CompiledRule>,
}

impl ValidationContract {
  /// Derives the contract of a `string`, `number` or `integer` schema.
  ///
  /// An invalid `pattern` is skipped and recorded as
  /// [`Diagnostic::InvalidPattern`].
  ///
  /// # Errors
  ///
  /// Returns [`UnsupportedFieldType`] for `boolean`, `object` and `array`
  /// schemas; only leaves carry validation rules.
  pub fn derive(
    schema: &SchemaObject,
    required: bool,
    diagnostics: &mut Diagnostics,
  ) -> Result<Self, UnsupportedFieldType> {
    let schema_type = schema.schema_type().unwrap_or_else(|| infer_type(schema));
    let value_kind = ValueKind::for_type(schema_type).ok_or(UnsupportedFieldType(schema_type))?;

    let mut contract = Self {
      value_kind,
      required,
      rules: Vec::new(),
    };

    contract.push(value_kind.rule(), Check::Type);
    if required {
      contract.push(
        Rule::new(RuleKind::Required, "required", "This field is required"),
        Check::Required,
      );
    }

    if schema_type == SchemaType::String {
      contract.derive_string_rules(schema, diagnostics);
    } else {
      contract.derive_numeric_rules(schema);
    }

    Ok(contract)
  }

  fn push(&mut self, rule: Rule, check: Check) {
    self.rules.push(CompiledRule { rule, check });
  }

  fn derive_string_rules(&mut self, schema: &SchemaObject, diagnostics: &mut Diagnostics) {
    if let Some(values) = schema.enum_values.as_ref().filter(|values| !values.is_empty()) {
      let listed = values.iter().map(display_value).collect::<Vec<_>>().join(", ");
      self.push(
        Rule::new(RuleKind::Enum, "enum", format!("Must be one of: {listed}")),
        Check::Enum(values.clone()),
      );
      return;
    }

    if schema.format.as_deref() == Some(EMAIL_FORMAT) {
      self.push(
        Rule::new(RuleKind::Format, "email", "Must be a valid email address"),
        Check::Email,
      );
    }

    if let Some(min) = schema.min_length {
      self.push(
        Rule::new(
          RuleKind::MinLength,
          format!("minLength: {min}"),
          format!("Must be at least {min} {} long", characters(min)),
        ),
        Check::MinLength(min),
      );
    }

    if let Some(max) = schema.max_length {
      self.push(
        Rule::new(
          RuleKind::MaxLength,
          format!("maxLength: {max}"),
          format!("Must be at most {max} {} long", characters(max)),
        ),
        Check::MaxLength(max),
      );
    }

    if let Some(pattern) = schema.pattern.as_deref() {
      match regex::Regex::new(pattern) {
        Ok(compiled) => self.push(
          Rule::new(
            RuleKind::Pattern,
            format!("pattern: {pattern}"),
            format!("Must match the pattern {pattern}"),
          ),
          Check::Pattern(compiled),
        ),
        Err(error) => diagnostics.record(Diagnostic::InvalidPattern {
          pattern: pattern.to_string(),
          error: error.to_string(),
        }),
      }
    }
  }

  fn derive_numeric_rules(&mut self, schema: &SchemaObject) {
    if let Some(bound) = schema.lower_bound() {
      let rule = if bound.exclusive {
        Rule::new(
          RuleKind::Minimum,
          format!("exclusiveMinimum: {}", bound.value),
          format!("Must be greater than {}", bound.value),
        )
      } else {
        Rule::new(
          RuleKind::Minimum,
          format!("minimum: {}", bound.value),
          format!("Must be greater than or equal to {}", bound.value),
        )
      };
      self.push(rule, Check::Minimum(bound));
    }

    if let Some(bound) = schema.upper_bound() {
      let rule = if bound.exclusive {
        Rule::new(
          RuleKind::Maximum,
          format!("exclusiveMaximum: {}", bound.value),
          format!("Must be less than {}", bound.value),
        )
      } else {
        Rule::new(
          RuleKind::Maximum,
          format!("maximum: {}", bound.value),
          format!("Must be less than or equal to {}", bound.value),
        )
      };
      self.push(rule, Check::Maximum(bound));
    }

    if let Some(step) = schema.multiple_of.filter(|step| *step > 0.0) {
      self.push(
        Rule::new(
          RuleKind::MultipleOf,
          format!("multipleOf: {step}"),
          format!("Must be a multiple of {step}"),
        ),
        Check::MultipleOf(step),
      );
    }
  }

  pub fn rules(&self) -> impl ExactSizeIterator<Item = &Rule> {
    self.rules.iter().map(|compiled| &compiled.rule)
  }

  #[must_use]
  pub fn kinds(&self) -> Vec<RuleKind> {
    self.rules().map(|rule| rule.kind).collect()
  }

  #[must_use]
  pub fn is_required(&self) -> bool {
    self.required
  }

  /// Checks `value` against every rule and returns the failures in rule order.
  ///
  /// Absent values (`null` or an empty string) only fail `required`. A value
  /// of the wrong primitive type fails the type rule alone. Numeric fields
  /// accept numeric strings, as entered in a form.
  #[must_use]
  pub fn validate(&self, value: &Value) -> Vec<Issue> {
    if is_absent(value) {
      return self
        .rules
        .iter()
        .filter(|compiled| matches!(compiled.check, Check::Required))
        .map(|compiled| compiled.rule.issue())
        .collect();
    }

    let Some(typed) = self.value_kind.coerce(value) else {
      return self
        .rules
        .iter()
        .filter(|compiled| matches!(compiled.check, Check::Type))
        .map(|compiled| compiled.rule.issue())
        .collect();
    };

    self
      .rules
      .iter()
      .filter(|compiled| !compiled.check.passes(&typed))
      .map(|compiled| compiled.rule.issue())
      .collect()
  }

  /// Returns true when `value` passes every rule.
  #[must_use]
  pub fn is_valid(&self, value: &Value) -> bool {
    self.validate(value).is_empty()
  }
}

fn is_absent(value: &Value) -> bool {
  match value {
    Value::Null => true,
    Value::String(text) => text.is_empty(),
    _ => false,
  }
}

fn characters(count: u64) -> &'static str {
  if count == 1 { "character" } else { "characters" }
}

fn display_value(value: &Value) -> String {
  match value {
    Value::String(text) => text.clone(),
    other => other.to_string(),
  }
}

/// Derives the validation contract of a leaf schema, logging invalid patterns.
///
/// # Errors
///
/// See [`ValidationContract::derive`].
pub fn derive_rules(schema: &SchemaObject, required: bool) -> Result<ValidationContract, UnsupportedFieldType> {
  let mut diagnostics = Diagnostics::new();
  ValidationContract::derive(schema, required, &mut diagnostics)
}

fn bound_holds(value: f64, bound: NumericBound, lower: bool) -> bool {
  match (lower, bound.exclusive) {
    (true, true) => value > bound.value,
    (true, false) => value >= bound.value,
    (false, true) => value < bound.value,
    (false, false) => value <= bound.value,
  }
}
