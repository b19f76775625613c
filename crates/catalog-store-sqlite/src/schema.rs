//! SQL schema for the catalog SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS categories (
    category_id CHAR(36)     PRIMARY KEY NOT NULL,  -- hyphenated UUID
    name        VARCHAR(255) NOT NULL,
    description TEXT,
    is_active   BOOLEAN      NOT NULL DEFAULT 1,
    created_at  DATETIME(3)  NOT NULL               -- RFC 3339 UTC, milliseconds
);

CREATE INDEX IF NOT EXISTS categories_created_idx ON categories(created_at);
CREATE INDEX IF NOT EXISTS categories_name_idx    ON categories(name);

PRAGMA user_version = 1;
";
