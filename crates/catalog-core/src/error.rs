//! Error types for `catalog-core`.

use thiserror::Error;

use crate::notification::Notification;

#[derive(Debug, Error)]
pub enum Error {
  /// The string handed to [`crate::id::Uuid::parse`] is not 8-4-4-4-12 hex.
  #[error("Invalid uuid")]
  InvalidUuid(String),

  /// Raised by the strict entity constructors when validation recorded errors.
  #[error("Entity Validation Error")]
  EntityValidation(Notification),

  #[error("{entity} Not Found using ID {id}")]
  NotFound { entity: &'static str, id: String },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
    Self::NotFound { entity, id: id.to_string() }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
