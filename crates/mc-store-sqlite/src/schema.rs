//! SQL schema for the Mission Control SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
///
/// The index expressions must match the text `lookup` generates exactly, or
/// SQLite will fall back to a scan.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per record; `seq` gives a stable insertion order.
CREATE TABLE IF NOT EXISTS documents (
    seq        INTEGER PRIMARY KEY AUTOINCREMENT,
    collection TEXT NOT NULL,
    id         TEXT NOT NULL,   -- hyphenated lowercase UUID
    body       TEXT NOT NULL,   -- the record, camelCase JSON
    UNIQUE (collection, id)
);

CREATE INDEX IF NOT EXISTS documents_status_idx
    ON documents(collection, json_extract(body, '$.status'));
CREATE INDEX IF NOT EXISTS documents_project_idx
    ON documents(collection, json_extract(body, '$.project'));
CREATE INDEX IF NOT EXISTS documents_rating_idx
    ON documents(collection, json_extract(body, '$.rating'));
CREATE INDEX IF NOT EXISTS documents_type_idx
    ON documents(collection, json_extract(body, '$.type'));

PRAGMA user_version = 1;
";
