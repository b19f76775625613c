//! [`SqliteStore`], the SQLite implementation of [`CategoryRepository`].

use std::path::Path;

use catalog_core::{
  category::Category,
  id::Uuid,
  repository::{CategoryRepository, SORTABLE_FIELDS},
  search::{SearchParams, SearchResult},
};
use rusqlite::{OptionalExtension as _, functions::FunctionFlags};

use crate::{encode::RawCategory, schema::SCHEMA, Error, Result};

/// Column list shared by every `SELECT`; [`RawCategory::from_row`] reads
/// columns in this order.
pub const COLUMNS: &str = "category_id, name, description, is_active, created_at";

const INSERT_SQL: &str = "INSERT INTO categories (
     category_id, name, description, is_active, created_at
   ) VALUES (?1, ?2, ?3, ?4, ?5)";

const DEFAULT_ORDER: &str = "created_at DESC";

/// SQL function lowercasing its argument with full Unicode case mapping;
/// SQLite's own `lower()` and `LIKE` fold ASCII only.
const CASEFOLD_FN: &str = "casefold";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A category store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.create_scalar_function(
          CASEFOLD_FN,
          1,
          FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
          |ctx| Ok(ctx.get::<String>(0)?.to_lowercase()),
        )?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Column metadata of the `categories` table as
  /// `(name, declared type, not null, primary key)`.
  pub async fn table_info(&self) -> Result<Vec<(String, String, bool, bool)>> {
    let columns = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("PRAGMA table_info(categories)")?;
        let rows = stmt
          .query_map([], |row| {
            Ok((
              row.get::<_, String>(1)?,
              row.get::<_, String>(2)?,
              row.get::<_, bool>(3)?,
              row.get::<_, i64>(5)? > 0,
            ))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(columns)
  }
}

/// `ORDER BY` clause for `params`; only whitelisted columns are interpolated.
fn order_clause(params: &SearchParams) -> String {
  match params.sort.as_deref() {
    Some(field) if SORTABLE_FIELDS.contains(&field) => {
      let dir = params.sort_dir.unwrap_or_default().as_sql();
      format!("{field} {dir}")
    }
    _ => DEFAULT_ORDER.to_owned(),
  }
}


// ─── CategoryRepository impl ─────────────────────────────────────────────────

impl CategoryRepository for SqliteStore {
  type Error = Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn insert(&self, category: &Category) -> Result<()> {
    let raw = RawCategory::from_category(category);
    let id = raw.category_id.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          INSERT_SQL,
          rusqlite::params![
            raw.category_id,
            raw.name,
            raw.description,
            raw.is_active,
            raw.created_at,
          ],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(category_id = %id, "category inserted");
    Ok(())
  }

  async fn bulk_insert(&self, categories: &[Category]) -> Result<()> {
    let raws: Vec<RawCategory> =
      categories.iter().map(RawCategory::from_category).collect();
    let count = raws.len();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(INSERT_SQL)?;
          for raw in &raws {
            stmt.execute(rusqlite::params![
              raw.category_id,
              raw.name,
              raw.description,
              raw.is_active,
              raw.created_at,
            ])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    tracing::debug!(count, "categories bulk inserted");
    Ok(())
  }

  async fn update(&self, category: &Category) -> Result<()> {
    let raw = RawCategory::from_category(category);
    let id = raw.category_id.clone();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE categories
             SET name = ?2, description = ?3, is_active = ?4, created_at = ?5
           WHERE category_id = ?1",
          rusqlite::params![
            raw.category_id,
            raw.name,
            raw.description,
            raw.is_active,
            raw.created_at,
          ],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::CategoryNotFound(id));
    }
    tracing::debug!(category_id = %id, "category updated");
    Ok(())
  }

  async fn delete(&self, id: Uuid) -> Result<()> {
    let id_str = id.id().to_owned();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM categories WHERE category_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::CategoryNotFound(id.to_string()));
    }
    tracing::debug!(category_id = %id, "category deleted");
    Ok(())
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
    let id_str = id.id().to_owned();

    let raw: Option<RawCategory> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {COLUMNS} FROM categories WHERE category_id = ?1"),
            rusqlite::params![id_str],
            RawCategory::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawCategory::into_category).transpose()
  }

  async fn find_all(&self) -> Result<Vec<Category>> {
    let raws: Vec<RawCategory> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {COLUMNS} FROM categories ORDER BY {DEFAULT_ORDER}"
        ))?;
        let rows = stmt
          .query_map([], RawCategory::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCategory::into_category).collect()
  }

  async fn search(&self, params: &SearchParams) -> Result<SearchResult<Category>> {
    let needle     = params.filter.as_deref().map(str::to_lowercase);
    let order      = order_clause(params);
    let limit_val  = i64::try_from(params.per_page).unwrap_or(i64::MAX);
    let offset_val = i64::try_from(params.offset()).unwrap_or(i64::MAX);

    let (raws, total): (Vec<RawCategory>, i64) = self
      .conn
      .call(move |conn| {
        let filter = format!("?1 IS NULL OR instr({CASEFOLD_FN}(name), ?1) > 0");

        let total: i64 = conn.query_row(
          &format!("SELECT COUNT(*) FROM categories WHERE {filter}"),
          rusqlite::params![needle.as_deref()],
          |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(&format!(
          "SELECT {COLUMNS} FROM categories
           WHERE {filter}
           ORDER BY {order}
           LIMIT ?2 OFFSET ?3"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![needle.as_deref(), limit_val, offset_val],
            RawCategory::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((rows, total))
      })
      .await?;

    let items = raws
      .into_iter()
      .map(RawCategory::into_category)
      .collect::<Result<Vec<_>>>()?;

    Ok(SearchResult {
      items,
      total:        total as u64,
      current_page: params.page,
      per_page:     params.per_page,
    })
  }
}
