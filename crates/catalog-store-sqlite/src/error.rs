//! Error type for `catalog-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] catalog_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// An update or delete addressed a category that is not stored.
  #[error("Category Not Found using ID {0}")]
  CategoryNotFound(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
