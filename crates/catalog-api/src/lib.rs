//! JSON REST API for the category catalog.
//!
//! Exposes an axum [`Router`] backed by any
//! [`catalog_core::repository::CategoryRepository`]. Successful JSON bodies are
//! wrapped in a `{"data": ...}` envelope by [`wrapper::envelope`].
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", catalog_api::api_router(store.clone()))
//! ```

pub mod categories;
pub mod error;
pub mod input;
pub mod presenter;
pub mod wrapper;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, middleware, routing::get};
use catalog_core::repository::CategoryRepository;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CATALOG_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  pub database_path: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:          "127.0.0.1".to_string(),
      port:          3000,
      database_path: PathBuf::from("catalog.db"),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `repo`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<R>(repo: Arc<R>) -> Router<()>
where
  R: CategoryRepository + 'static,
{
  Router::new()
    .route(
      "/categories",
      get(categories::list::<R>).post(categories::create::<R>),
    )
    .route(
      "/categories/{id}",
      get(categories::get_one::<R>)
        .patch(categories::update::<R>)
        .delete(categories::delete::<R>),
    )
    .layer(middleware::from_fn(wrapper::envelope))
    .layer(TraceLayer::new_for_http())
    .with_state(repo)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use catalog_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(
    app:    &Router,
    method: &str,
    uri:    &str,
    body:   Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(json) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(json.to_string())
      }
      None => Body::empty(),
    };
    let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  async fn create(app: &Router, body: Value) -> Value {
    let (status, json) = send(app, "POST", "/categories", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["data"].clone()
  }

  #[test]
  fn config_defaults() {
    let cfg = ServerConfig::default();
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.database_path, PathBuf::from("catalog.db"));
  }

  // ── Create ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_returns_201_wrapped_in_data() {
    let app = app().await;
    let data = create(&app, json!({ "name": "Movie" })).await;

    assert_eq!(data["name"], "Movie");
    assert!(data["description"].is_null());
    assert_eq!(data["is_active"], true);
    assert!(data["id"].as_str().is_some_and(|id| id.len() == 36));
    assert!(data["created_at"].is_string());
  }

  #[tokio::test]
  async fn create_keeps_optional_fields() {
    let app = app().await;
    let data = create(
      &app,
      json!({ "name": "Movie", "description": "some description", "is_active": false }),
    )
    .await;
    assert_eq!(data["description"], "some description");
    assert_eq!(data["is_active"], false);
  }

  #[tokio::test]
  async fn create_without_name_is_422() {
    let app = app().await;
    let (status, json) = send(&app, "POST", "/categories", Some(json!({}))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json, json!({
      "statusCode": 422,
      "error":      "Unprocessable Entity",
      "message":    ["name should not be empty", "name must be a string"],
    }));
  }

  #[tokio::test]
  async fn create_with_long_name_is_422() {
    let app = app().await;
    let (status, json) =
      send(&app, "POST", "/categories", Some(json!({ "name": "t".repeat(256) }))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["message"], json!(["name must be shorter than or equal to 255 characters"]));
  }

  #[tokio::test]
  async fn create_with_wrong_types_is_422() {
    let app = app().await;
    let (status, json) = send(
      &app,
      "POST",
      "/categories",
      Some(json!({ "name": 5, "is_active": "yes" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
      json["message"],
      json!(["name must be a string", "is_active must be a boolean value"]),
    );
  }

  // ── Get one ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn get_returns_created_category() {
    let app = app().await;
    let created = create(&app, json!({ "name": "Movie" })).await;
    let id = created["id"].as_str().unwrap();

    let (status, json) = send(&app, "GET", &format!("/categories/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], created);
  }

  #[tokio::test]
  async fn get_missing_is_404() {
    let app = app().await;
    let id = "8d0b0c9c-7bd8-4b2f-8a88-7a3b1b0a4f20";
    let (status, json) = send(&app, "GET", &format!("/categories/{id}"), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({
      "statusCode": 404,
      "error":      "Not Found",
      "message":    format!("Category Not Found using ID {id}"),
    }));
  }

  #[tokio::test]
  async fn malformed_id_is_422() {
    let app = app().await;
    let (status, json) = send(&app, "GET", "/categories/fake-id", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["message"], json!(["Invalid uuid"]));
  }

  // ── List ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_paginates_with_meta() {
    let app = app().await;
    for name in ["a", "b", "c"] {
      create(&app, json!({ "name": name })).await;
    }

    let (status, json) =
      send(&app, "GET", "/categories?per_page=2&sort=name&sort_dir=desc", None).await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = json["data"]
      .as_array()
      .unwrap()
      .iter()
      .map(|c| c["name"].as_str().unwrap())
      .collect();
    assert_eq!(names, ["c", "b"]);
    assert_eq!(json["meta"], json!({
      "current_page": 1,
      "per_page":     2,
      "last_page":    2,
      "total":        3,
    }));
  }

  #[tokio::test]
  async fn list_filters_by_name() {
    let app = app().await;
    for name in ["Movie", "Documentary", "movie night"] {
      create(&app, json!({ "name": name })).await;
    }

    let (_, json) = send(&app, "GET", "/categories?filter=MOVIE&page=abc", None).await;
    assert_eq!(json["meta"]["total"], 2);
    assert_eq!(json["meta"]["current_page"], 1);
  }

  #[tokio::test]
  async fn list_survives_out_of_range_paging() {
    let app = app().await;
    create(&app, json!({ "name": "Movie" })).await;

    let uri = format!("/categories?page={}&per_page={}", u64::MAX, u64::MAX);
    let (status, json) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["meta"]["current_page"], 1);
    assert_eq!(json["meta"]["per_page"], 15);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let uri = format!("/categories?page={}", i64::MAX);
    let (status, json) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["data"].as_array().unwrap().is_empty());
    assert_eq!(json["meta"]["total"], 1);
  }

  // ── Body rejections ─────────────────────────────────────────────────────────

  async fn post_raw(app: &Router, content_type: Option<&str>, body: &str) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("POST").uri("/categories");
    if let Some(ct) = content_type {
      builder = builder.header(header::CONTENT_TYPE, ct);
    }
    let req = builder.body(Body::from(body.to_string())).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
  }

  #[tokio::test]
  async fn malformed_json_body_uses_error_shape() {
    let app = app().await;
    let (status, json) = post_raw(&app, Some("application/json"), "{\"name\":").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["statusCode"], 400);
    assert_eq!(json["error"], "Bad Request");
    assert!(json["message"].is_string());
  }

  #[tokio::test]
  async fn missing_content_type_uses_error_shape() {
    let app = app().await;
    let (status, json) = post_raw(&app, None, r#"{"name":"Movie"}"#).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(json["statusCode"], 415);
    assert_eq!(json["error"], "Unsupported Media Type");
  }

  // ── Update ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn patch_updates_given_fields() {
    let app = app().await;
    let created = create(&app, json!({ "name": "Movie", "description": "old" })).await;
    let uri = format!("/categories/{}", created["id"].as_str().unwrap());

    let (status, json) =
      send(&app, "PATCH", &uri, Some(json!({ "name": "Film", "is_active": false }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["name"], "Film");
    assert_eq!(json["data"]["description"], "old");
    assert_eq!(json["data"]["is_active"], false);

    let (_, json) = send(&app, "PATCH", &uri, Some(json!({ "description": null }))).await;
    assert!(json["data"]["description"].is_null());

    let (_, json) = send(&app, "GET", &uri, None).await;
    assert_eq!(json["data"]["name"], "Film");
    assert!(json["data"]["description"].is_null());
  }

  #[tokio::test]
  async fn patch_with_invalid_name_is_422() {
    let app = app().await;
    let created = create(&app, json!({ "name": "Movie" })).await;
    let uri = format!("/categories/{}", created["id"].as_str().unwrap());

    let (status, json) = send(&app, "PATCH", &uri, Some(json!({ "name": "" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["message"], json!(["name should not be empty"]));

    let (status, json) =
      send(&app, "PATCH", &uri, Some(json!({ "name": "t".repeat(256) }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["message"], json!(["name must be shorter than or equal to 255 characters"]));

    let (_, json) = send(&app, "GET", &uri, None).await;
    assert_eq!(json["data"]["name"], "Movie");
  }

  #[tokio::test]
  async fn patch_missing_is_404() {
    let app = app().await;
    let uri = "/categories/8d0b0c9c-7bd8-4b2f-8a88-7a3b1b0a4f20";
    let (status, _) = send(&app, "PATCH", uri, Some(json!({ "name": "Film" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Delete ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_returns_204_then_404() {
    let app = app().await;
    let created = create(&app, json!({ "name": "Movie" })).await;
    let uri = format!("/categories/{}", created["id"].as_str().unwrap());

    let (status, json) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(json.is_null());

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }
}
