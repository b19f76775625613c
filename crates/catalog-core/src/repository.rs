//! The `CategoryRepository` trait.
//!
//! The trait is implemented by storage backends (e.g. `catalog-store-sqlite`).
//! The API layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  category::Category,
  id::Uuid,
  search::{SearchParams, SearchResult},
};

/// Fields a backend may sort by; anything else falls back to the default
/// order (newest first).
pub const SORTABLE_FIELDS: &[&str] = &["name", "created_at"];

/// Abstraction over a category store backend.
///
/// Categories handed back by a backend are rebuilt with
/// [`Category::new`], so each carries a fresh, empty notification.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CategoryRepository: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Persist a new category. Fails if the id is already taken.
  fn insert<'a>(
    &'a self,
    category: &'a Category,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Persist several categories atomically.
  fn bulk_insert<'a>(
    &'a self,
    categories: &'a [Category],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Overwrite the stored row for `category`. Fails with a not-found error if
  /// no row has its id.
  fn update<'a>(
    &'a self,
    category: &'a Category,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Remove the row for `id`. Fails with a not-found error if there is none.
  fn delete(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Retrieve a category by id. Returns `None` if not found.
  fn find_by_id(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Category>, Self::Error>> + Send + '_;

  /// Every stored category, newest first.
  fn find_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Category>, Self::Error>> + Send + '_;

  /// One page of categories matching `params`.
  fn search<'a>(
    &'a self,
    params: &'a SearchParams,
  ) -> impl Future<Output = Result<SearchResult<Category>, Self::Error>> + Send + 'a;
}
