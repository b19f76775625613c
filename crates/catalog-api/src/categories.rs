//! Handlers for `/categories` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/categories` | `?page&per_page&sort&sort_dir&filter` |
//! | `POST`   | `/categories` | Body: `{"name":"Movie"}` |
//! | `GET`    | `/categories/{id}` | 404 if not found |
//! | `PATCH`  | `/categories/{id}` | Any of `name`, `description`, `is_active` |
//! | `DELETE` | `/categories/{id}` | 204 on success |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use catalog_core::{
  category::{Category, CategoryProps},
  entity::Entity as _,
  id::Uuid,
  repository::CategoryRepository,
  search::{RawSearchParams, SearchParams},
};
use serde_json::{Value, json};

use crate::{
  error::ApiError,
  input::{self, CreateCategoryInput, JsonBody, UpdateCategoryInput},
  presenter::CategoryOutput,
};

/// Parse a path id; malformed ids are a validation failure, not a miss.
fn parse_id(id: String) -> Result<Uuid, ApiError> { Ok(Uuid::parse(id)?) }

async fn load<R>(repo: &R, id: &Uuid) -> Result<Category, ApiError>
where
  R: CategoryRepository,
{
  repo
    .find_by_id(id.clone())
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::category_not_found(id))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /categories`
pub async fn list<R>(
  State(repo): State<Arc<R>>,
  Query(raw): Query<RawSearchParams>,
) -> Result<Json<Value>, ApiError>
where
  R: CategoryRepository,
{
  let params = SearchParams::normalize(raw);
  let page = repo
    .search(&params)
    .await
    .map_err(ApiError::store)?;

  let last_page = page.last_page();
  let page = page.map(|c| CategoryOutput::from(&c));
  Ok(Json(json!({
    "data": page.items,
    "meta": {
      "current_page": page.current_page,
      "per_page":     page.per_page,
      "last_page":    last_page,
      "total":        page.total,
    },
  })))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /categories`
pub async fn create<R>(
  State(repo): State<Arc<R>>,
  JsonBody(body): JsonBody<Value>,
) -> Result<impl IntoResponse, ApiError>
where
  R: CategoryRepository,
{
  let input: CreateCategoryInput =
    input::parse(input::CREATE_CATEGORY_RULES, body)?;

  let category = Category::create(CategoryProps {
    category_id: None,
    name:        input.name,
    description: input.description,
    is_active:   input.is_active,
    created_at:  None,
  });
  if category.notification().has_errors() {
    return Err(ApiError::from_notification(category.notification()));
  }

  repo.insert(&category).await.map_err(ApiError::store)?;
  tracing::info!(category_id = %category.category_id(), "category created");
  Ok((StatusCode::CREATED, Json(CategoryOutput::from(&category))))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /categories/{id}`
pub async fn get_one<R>(
  State(repo): State<Arc<R>>,
  Path(id): Path<String>,
) -> Result<Json<CategoryOutput>, ApiError>
where
  R: CategoryRepository,
{
  let id = parse_id(id)?;
  let category = load(repo.as_ref(), &id).await?;
  Ok(Json(CategoryOutput::from(&category)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /categories/{id}`
pub async fn update<R>(
  State(repo): State<Arc<R>>,
  Path(id): Path<String>,
  JsonBody(body): JsonBody<Value>,
) -> Result<Json<CategoryOutput>, ApiError>
where
  R: CategoryRepository,
{
  let id = parse_id(id)?;
  let input: UpdateCategoryInput =
    input::parse(input::UPDATE_CATEGORY_RULES, body)?;
  let mut category = load(repo.as_ref(), &id).await?;

  if let Some(name) = input.name {
    category.change_name(name);
  }
  if let Some(description) = input.description {
    category.change_description(description);
  }
  match input.is_active {
    Some(true) => category.activate(),
    Some(false) => category.deactivate(),
    None => {}
  }
  if category.notification().has_errors() {
    return Err(ApiError::from_notification(category.notification()));
  }

  repo.update(&category).await.map_err(ApiError::store)?;
  tracing::info!(category_id = %id, "category updated");
  Ok(Json(CategoryOutput::from(&category)))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /categories/{id}`
pub async fn delete<R>(
  State(repo): State<Arc<R>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  R: CategoryRepository,
{
  let id = parse_id(id)?;
  load(repo.as_ref(), &id).await?;

  repo.delete(id.clone()).await.map_err(ApiError::store)?;
  tracing::info!(category_id = %id, "category deleted");
  Ok(StatusCode::NO_CONTENT)
}
