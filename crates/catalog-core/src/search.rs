//! Paginated search parameters and results.
//!
//! Parameters arrive from query strings, so [`SearchParams::normalize`] turns
//! loose input into sane values instead of rejecting it.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PER_PAGE: u64 = 15;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
  #[default]
  Asc,
  Desc,
}

impl SortDirection {
  pub fn as_sql(self) -> &'static str {
    match self {
      Self::Asc => "ASC",
      Self::Desc => "DESC",
    }
  }
}

/// Raw, unvalidated search input (typically a deserialised query string).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchParams {
  pub page:     Option<String>,
  pub per_page: Option<String>,
  pub sort:     Option<String>,
  pub sort_dir: Option<String>,
  pub filter:   Option<String>,
}

/// Normalised parameters for [`crate::repository::CategoryRepository::search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
  pub page:     u64,
  pub per_page: u64,
  pub sort:     Option<String>,
  /// Only meaningful when `sort` is set.
  pub sort_dir: Option<SortDirection>,
  /// Case-insensitive substring match on the name.
  pub filter:   Option<String>,
}

impl Default for SearchParams {
  fn default() -> Self {
    Self {
      page:     DEFAULT_PAGE,
      per_page: DEFAULT_PER_PAGE,
      sort:     None,
      sort_dir: None,
      filter:   None,
    }
  }
}

impl SearchParams {
  pub fn normalize(raw: RawSearchParams) -> Self {
    let sort = non_blank(raw.sort);
    let sort_dir = sort.as_ref().map(|_| {
      match raw.sort_dir.as_deref().map(str::trim) {
        Some(dir) if dir.eq_ignore_ascii_case("desc") => SortDirection::Desc,
        _ => SortDirection::Asc,
      }
    });

    Self {
      page: positive(raw.page).unwrap_or(DEFAULT_PAGE),
      per_page: positive(raw.per_page).unwrap_or(DEFAULT_PER_PAGE),
      sort,
      sort_dir,
      filter: non_blank(raw.filter),
    }
  }

  /// Rows to skip before this page; saturates instead of overflowing.
  pub fn offset(&self) -> u64 {
    self.page.saturating_sub(1).saturating_mul(self.per_page)
  }
}

/// A whole number in `1..=i64::MAX`, the range SQLite can bind.
fn positive(value: Option<String>) -> Option<u64> {
  value?
    .trim()
    .parse::<u64>()
    .ok()
    .filter(|n| (1..=i64::MAX as u64).contains(n))
}

fn non_blank(value: Option<String>) -> Option<String> {
  value
    .map(|s| s.trim().to_owned())
    .filter(|s| !s.is_empty())
}

/// One page of results plus the pagination numbers needed to render it.
#[derive(Debug, Clone)]
pub struct SearchResult<T> {
  pub items:        Vec<T>,
  pub total:        u64,
  pub current_page: u64,
  pub per_page:     u64,
}

impl<T> SearchResult<T> {
  pub fn last_page(&self) -> u64 { self.total.div_ceil(self.per_page).max(1) }

  pub fn map<U>(self, f: impl FnMut(T) -> U) -> SearchResult<U> {
    SearchResult {
      items:        self.items.into_iter().map(f).collect(),
      total:        self.total,
      current_page: self.current_page,
      per_page:     self.per_page,
    }
  }
}
