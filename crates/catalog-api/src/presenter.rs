//! Outward-facing JSON shape of a category.

use catalog_core::category::Category;
use chrono::SecondsFormat;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryOutput {
  pub id:          String,
  pub name:        String,
  pub description: Option<String>,
  pub is_active:   bool,
  /// RFC 3339, UTC, millisecond precision.
  pub created_at:  String,
}

impl From<&Category> for CategoryOutput {
  fn from(category: &Category) -> Self {
    Self {
      id:          category.category_id().id().to_owned(),
      name:        category.name().to_owned(),
      description: category.description().map(str::to_owned),
      is_active:   category.is_active(),
      created_at:  category
        .created_at()
        .to_rfc3339_opts(SecondsFormat::Millis, true),
    }
  }
}
