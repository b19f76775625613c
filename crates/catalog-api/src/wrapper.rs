//! Response envelope.
//!
//! Successful JSON bodies are returned as `{"data": <body>}`. A body that is
//! already an object with a `meta` key (a paginated listing) is passed
//! through untouched, as are error responses and non-JSON bodies.

use axum::{
  body::Body,
  extract::Request,
  http::{HeaderValue, StatusCode, header},
  middleware::Next,
  response::{IntoResponse, Response},
};
use serde_json::{Value, json};

/// Wrap `body` in the `data` envelope unless it carries its own `meta`.
pub fn wrap_data(body: Value) -> Value {
  match &body {
    Value::Object(map) if map.contains_key("meta") => body,
    _ => json!({ "data": body }),
  }
}

fn is_json(response: &Response) -> bool {
  response
    .headers()
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .is_some_and(|ct| ct.starts_with("application/json"))
}

/// Middleware applying [`wrap_data`] to every successful JSON response.
pub async fn envelope(req: Request, next: Next) -> Response {
  let response = next.run(req).await;
  if !response.status().is_success() || !is_json(&response) {
    return response;
  }

  let (mut parts, body) = response.into_parts();
  let bytes = match axum::body::to_bytes(body, usize::MAX).await {
    Ok(b) => b,
    Err(e) => {
      tracing::error!(error = %e, "failed to buffer response body");
      return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
  };
  let value: Value = match serde_json::from_slice(&bytes) {
    Ok(v) => v,
    Err(_) => return Response::from_parts(parts, Body::from(bytes)),
  };

  let wrapped = wrap_data(value).to_string();
  parts.headers.insert(header::CONTENT_LENGTH, HeaderValue::from(wrapped.len()));
  Response::from_parts(parts, Body::from(wrapped))
}
