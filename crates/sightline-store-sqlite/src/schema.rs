//! SQL schema for the Sightline SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `INTEGER PRIMARY KEY AUTOINCREMENT` is the store-scoped monotonic id
/// sequence for each table: ids are assigned by SQLite at insert time and
/// never reused, so no in-process counter exists to diverge across store
/// instances sharing one file.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS persons (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL,
    created_at  TEXT NOT NULL,   -- RFC 3339 UTC; store-assigned
    updated_at  TEXT,            -- NULL until the first content mutation
    deleted_at  TEXT             -- NULL while active; set once, never cleared
);

-- Uniqueness holds among ACTIVE persons only: a soft-deleted person's email
-- may be reused. The write path checks this inside its transaction; the
-- partial index backstops it at the schema level.
CREATE UNIQUE INDEX IF NOT EXISTS persons_active_email_idx
    ON persons(email) WHERE deleted_at IS NULL;

-- Reports are append-only apart from the deleted_at marker.
CREATE TABLE IF NOT EXISTS reports (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id    INTEGER NOT NULL REFERENCES persons(id),
    observations TEXT NOT NULL,
    evidence     TEXT NOT NULL,
    created_at   TEXT NOT NULL,
    deleted_at   TEXT
);

CREATE INDEX IF NOT EXISTS reports_person_idx  ON reports(person_id);
CREATE INDEX IF NOT EXISTS reports_created_idx ON reports(created_at);

PRAGMA user_version = 1;
";
