//! SQL schema for the Unifest SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per pinned festival; rows are only ever replaced or deleted.
CREATE TABLE IF NOT EXISTS liked_festival (
    festival_id   INTEGER PRIMARY KEY,
    school_id     INTEGER NOT NULL,
    school_name   TEXT    NOT NULL,
    festival_name TEXT    NOT NULL,
    thumbnail     TEXT    NOT NULL,
    region        TEXT,
    begin_date    TEXT    NOT NULL,   -- YYYY-MM-DD
    end_date      TEXT    NOT NULL,   -- YYYY-MM-DD
    star_list     TEXT    NOT NULL DEFAULT '[]',   -- JSON array of StarInfo
    latitude      REAL,
    longitude     REAL
);

-- Presence is the liked state; there is no liked column.
CREATE TABLE IF NOT EXISTS liked_booth (
    booth_id    INTEGER PRIMARY KEY,
    name        TEXT    NOT NULL,
    category    TEXT    NOT NULL,
    description TEXT    NOT NULL,
    thumbnail   TEXT    NOT NULL,
    warning     TEXT    NOT NULL,
    location    TEXT    NOT NULL,
    latitude    REAL    NOT NULL,
    longitude   REAL    NOT NULL,
    menus       TEXT    NOT NULL DEFAULT '[]',   -- JSON array of Menu
    like_count  INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS preference (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

PRAGMA user_version = 1;
";
