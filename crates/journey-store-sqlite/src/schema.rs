//! SQL schema for the Journey SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Timestamps are fixed-width RFC 3339 UTC strings, so text order is
/// chronological order.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS trips (
    trip_id      TEXT PRIMARY KEY,
    destination  TEXT NOT NULL,
    owner_name   TEXT NOT NULL,
    owner_email  TEXT NOT NULL,
    starts_at    TEXT NOT NULL,
    ends_at      TEXT NOT NULL,
    is_confirmed INTEGER NOT NULL DEFAULT 0,
    CHECK (starts_at <= ends_at)
);

CREATE TABLE IF NOT EXISTS participants (
    participant_id TEXT PRIMARY KEY,
    trip_id        TEXT NOT NULL REFERENCES trips(trip_id),
    email          TEXT NOT NULL,
    is_confirmed   INTEGER NOT NULL DEFAULT 0,
    is_owner       INTEGER NOT NULL DEFAULT 0,
    UNIQUE (trip_id, email)
);

-- Activities and links are never updated or deleted.
CREATE TABLE IF NOT EXISTS activities (
    activity_id TEXT PRIMARY KEY,
    trip_id     TEXT NOT NULL REFERENCES trips(trip_id),
    title       TEXT NOT NULL,
    occurs_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS links (
    link_id TEXT PRIMARY KEY,
    trip_id TEXT NOT NULL REFERENCES trips(trip_id),
    title   TEXT NOT NULL,
    url     TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS participants_trip_idx ON participants(trip_id);
CREATE INDEX IF NOT EXISTS activities_trip_idx   ON activities(trip_id, occurs_at);
CREATE INDEX IF NOT EXISTS links_trip_idx        ON links(trip_id);

PRAGMA user_version = 1;
";
