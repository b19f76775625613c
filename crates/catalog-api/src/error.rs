//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error body has the shape
//! `{"statusCode": <u16>, "error": <reason phrase>, "message": <...>}`, where
//! `message` is a string, or a list of strings for validation failures.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use catalog_core::notification::Notification;
use serde_json::{Value, json};
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  NotFound(String),

  /// Validation failed; one entry per distinct message.
  #[error("unprocessable: {}", .0.join(", "))]
  Unprocessable(Vec<String>),

  /// The request body could not be read as JSON.
  #[error("{1}")]
  Rejected(StatusCode, String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }

  pub fn category_not_found(id: impl std::fmt::Display) -> Self {
    Self::NotFound(format!("Category Not Found using ID {id}"))
  }

  /// Flatten the notification's messages, dropping repeats but keeping the
  /// order in which they were first recorded.
  pub fn from_notification(notification: &Notification) -> Self {
    let mut messages: Vec<String> = Vec::new();
    for message in notification.all_messages() {
      if !messages.iter().any(|m| m == message) {
        messages.push(message.to_owned());
      }
    }
    Self::Unprocessable(messages)
  }
}

impl From<catalog_core::Error> for ApiError {
  fn from(e: catalog_core::Error) -> Self {
    use catalog_core::Error as E;
    match e {
      E::EntityValidation(n) => Self::from_notification(&n),
      E::NotFound { .. } => Self::NotFound(e.to_string()),
      E::InvalidUuid(_) | E::Serialization(_) => {
        Self::Unprocessable(vec![e.to_string()])
      }
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    Self::Rejected(rejection.status(), rejection.body_text())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, Value::String(m)),
      ApiError::Unprocessable(ms) => (StatusCode::UNPROCESSABLE_ENTITY, ms.into()),
      ApiError::Rejected(status, m) => (status, Value::String(m)),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, Value::String(e.to_string()))
      }
    };
    let body = json!({
      "statusCode": status.as_u16(),
      "error":      status.canonical_reason().unwrap_or_default(),
      "message":    message,
    });
    (status, Json(body)).into_response()
  }
}
