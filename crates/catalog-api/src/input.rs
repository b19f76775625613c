//! Request body validation.
//!
//! Bodies are received as raw JSON and checked against a rule table before
//! being read into typed inputs, so a wrong-typed field produces a validation
//! message instead of a deserialisation error.

use axum::extract::FromRequest;
use catalog_core::{
  notification::Notification,
  validator::{self, FieldRules, Rule},
};
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

use crate::error::ApiError;

/// `axum::Json` whose rejections are reported as [`ApiError`] bodies.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

pub const CREATE_CATEGORY_RULES: &[FieldRules] = &[
  FieldRules {
    field:    "name",
    optional: false,
    rules:    &[Rule::NotEmpty, Rule::IsString],
  },
  FieldRules {
    field:    "description",
    optional: true,
    rules:    &[Rule::IsString],
  },
  FieldRules {
    field:    "is_active",
    optional: true,
    rules:    &[Rule::IsBoolean],
  },
];

pub const UPDATE_CATEGORY_RULES: &[FieldRules] = &[
  FieldRules {
    field:    "name",
    optional: true,
    rules:    &[Rule::NotEmpty, Rule::IsString],
  },
  FieldRules {
    field:    "description",
    optional: true,
    rules:    &[Rule::IsString],
  },
  FieldRules {
    field:    "is_active",
    optional: true,
    rules:    &[Rule::IsBoolean],
  },
];

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryInput {
  pub name:        String,
  pub description: Option<String>,
  pub is_active:   Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategoryInput {
  pub name:        Option<String>,
  /// `Some(None)` when the body sets `description` to `null`.
  #[serde(default, deserialize_with = "present")]
  pub description: Option<Option<String>>,
  pub is_active:   Option<bool>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  T::deserialize(deserializer).map(Some)
}

/// Check `body` against `rules`, then read it as `T`.
pub fn parse<T: DeserializeOwned>(
  rules: &[FieldRules],
  body: Value,
) -> Result<T, ApiError> {
  let mut notification = Notification::new();
  if !validator::validate(rules, &mut notification, &body, None) {
    return Err(ApiError::from_notification(&notification));
  }
  serde_json::from_value(body)
    .map_err(|e| ApiError::Unprocessable(vec![e.to_string()]))
}
