//! The `Uuid` value object: a validated identifier kept in its textual form.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, value_object::ValueObject};

/// Length of the hyphenated 8-4-4-4-12 form.
const HYPHENATED_LEN: usize = 36;

/// A syntactically valid UUID string.
///
/// The wrapped string is exactly what the caller supplied (case included), so
/// `Uuid::parse(s)?.id() == s` holds for every accepted `s`. Any version is
/// accepted; only the hyphenated hex layout is checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Uuid {
  id: String,
}

impl Uuid {
  /// Generate a fresh random (v4) identifier. It goes through the same
  /// format check as [`parse`](Self::parse).
  pub fn new() -> Self {
    let id = uuid::Uuid::new_v4().hyphenated().to_string();
    match Self::validate(&id) {
      Ok(()) => Self { id },
      Err(_) => unreachable!("a hyphenated v4 uuid is always 8-4-4-4-12"),
    }
  }

  /// Wrap `id` after checking its format.
  pub fn parse(id: impl Into<String>) -> Result<Self> {
    let id = id.into();
    Self::validate(&id)?;
    Ok(Self { id })
  }

  pub fn id(&self) -> &str { &self.id }

  fn validate(id: &str) -> Result<()> {
    #[cfg(test)]
    tests::VALIDATIONS.with(|n| n.set(n.get() + 1));

    // `uuid` also accepts the simple, braced and URN forms; those have other
    // lengths, so pinning the length leaves only 8-4-4-4-12.
    if id.len() == HYPHENATED_LEN && uuid::Uuid::parse_str(id).is_ok() {
      Ok(())
    } else {
      Err(Error::InvalidUuid(id.to_owned()))
    }
  }
}

impl ValueObject for Uuid {}

impl Default for Uuid {
  fn default() -> Self { Self::new() }
}

impl fmt::Display for Uuid {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.id) }
}

impl FromStr for Uuid {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl TryFrom<String> for Uuid {
  type Error = Error;

  fn try_from(value: String) -> Result<Self> { Self::parse(value) }
}

impl From<Uuid> for String {
  fn from(value: Uuid) -> Self { value.id }
}
