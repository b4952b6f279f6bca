//! SQL schema for the registrar SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Students are soft-deleted via is_active; rows are never removed.
CREATE TABLE IF NOT EXISTS students (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    student_number  TEXT NOT NULL UNIQUE,
    name            TEXT NOT NULL,
    email           TEXT NOT NULL UNIQUE,
    phone           TEXT,
    is_active       INTEGER NOT NULL DEFAULT 1,
    created_at      TEXT NOT NULL,   -- RFC 3339 UTC
    updated_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS courses (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    course_code     TEXT NOT NULL UNIQUE,
    title           TEXT NOT NULL,
    description     TEXT,
    credits         INTEGER NOT NULL,
    max_students    INTEGER NOT NULL,
    is_active       INTEGER NOT NULL DEFAULT 1,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);

-- Junction table. The composite key is the final guard against
-- duplicate enrollment; rowid preserves insertion order for listings.
CREATE TABLE IF NOT EXISTS enrollments (
    student_id      INTEGER NOT NULL REFERENCES students(id),
    course_id       INTEGER NOT NULL REFERENCES courses(id),
    enrollment_date TEXT NOT NULL,
    is_active       INTEGER NOT NULL DEFAULT 1,
    PRIMARY KEY (student_id, course_id)
);

CREATE INDEX IF NOT EXISTS enrollments_course_idx ON enrollments(course_id);

PRAGMA user_version = 1;
";
