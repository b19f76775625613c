//! A small declarative rule engine.
//!
//! Each entity (or API input) declares a static table of [`FieldRules`]. The
//! table is evaluated against a JSON view of the data, so the same rules apply
//! to typed entities and to raw request bodies whose fields may be missing or
//! of the wrong type.

use serde_json::Value;

use crate::notification::Notification;

/// One constraint on a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
  /// Present, non-null, and not blank when it is a string.
  NotEmpty,
  IsString,
  IsBoolean,
  /// At most `n` characters. Anything that is not a string fails.
  MaxLength(usize),
}

impl Rule {
  pub fn check(self, value: Option<&Value>) -> bool {
    match self {
      Self::NotEmpty => match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
      },
      Self::IsString => matches!(value, Some(Value::String(_))),
      Self::IsBoolean => matches!(value, Some(Value::Bool(_))),
      Self::MaxLength(max) => {
        matches!(value, Some(Value::String(s)) if s.chars().count() <= max)
      }
    }
  }

  pub fn message(self, field: &str) -> String {
    match self {
      Self::NotEmpty => format!("{field} should not be empty"),
      Self::IsString => format!("{field} must be a string"),
      Self::IsBoolean => format!("{field} must be a boolean value"),
      Self::MaxLength(max) => {
        format!("{field} must be shorter than or equal to {max} characters")
      }
    }
  }
}

/// The rules attached to one field, checked in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
  pub field:    &'static str,
  /// When set, an absent or `null` value skips every rule.
  pub optional: bool,
  pub rules:    &'static [Rule],
}

/// Evaluate `table` against `data`, recording one message per violated rule.
///
/// `fields` restricts evaluation to the named fields; `None` checks the whole
/// table. Returns `true` when no rule was violated by this run (errors that
/// were already in `notification` do not count).
pub fn validate(
  table: &[FieldRules],
  notification: &mut Notification,
  data: &Value,
  fields: Option<&[&str]>,
) -> bool {
  let mut valid = true;

  for entry in table {
    if fields.is_some_and(|wanted| !wanted.contains(&entry.field)) {
      continue;
    }

    let value = data.get(entry.field);
    if entry.optional && matches!(value, None | Some(Value::Null)) {
      continue;
    }

    for rule in entry.rules {
      if !rule.check(value) {
        notification.add_error(rule.message(entry.field), Some(entry.field));
        valid = false;
      }
    }
  }

  valid
}
