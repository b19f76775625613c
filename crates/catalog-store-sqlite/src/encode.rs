//! Encoding and decoding helpers between domain types and the plain values
//! stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 UTC strings with millisecond precision,
//! so lexical order matches chronological order. Ids are stored exactly as the
//! `Uuid` value object holds them.

use catalog_core::{
  category::{Category, CategoryProps},
  id::Uuid,
};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column values of one `categories` row, owned so they can cross into the
/// connection thread.
pub struct RawCategory {
  pub category_id: String,
  pub name:        String,
  pub description: Option<String>,
  pub is_active:   bool,
  pub created_at:  String,
}

impl RawCategory {
  pub fn from_category(category: &Category) -> Self {
    Self {
      category_id: category.category_id().id().to_owned(),
      name:        category.name().to_owned(),
      description: category.description().map(str::to_owned),
      is_active:   category.is_active(),
      created_at:  encode_dt(category.created_at()),
    }
  }

  /// Read a row selected with [`crate::store::COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      category_id: row.get(0)?,
      name:        row.get(1)?,
      description: row.get(2)?,
      is_active:   row.get(3)?,
      created_at:  row.get(4)?,
    })
  }

  pub fn into_category(self) -> Result<Category> {
    Ok(Category::new(CategoryProps {
      category_id: Some(Uuid::parse(self.category_id)?),
      name:        self.name,
      description: self.description,
      is_active:   Some(self.is_active),
      created_at:  Some(decode_dt(&self.created_at)?),
    }))
  }
}
