//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings and booleans as integers.
//! Decode failures surface as [`rusqlite::Error::FromSqlConversionFailure`]
//! so row mappers can use `?` throughout.

use chrono::{DateTime, Utc};
use registrar_core::{course::Course, enrollment::Enrollment, student::Student};
use rusqlite::{Row, types::Type};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
  let raw: String = row.get(idx)?;
  DateTime::parse_from_rfc3339(&raw)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

// ─── Column lists and row mappers ────────────────────────────────────────────

pub const STUDENT_COLUMNS: &str =
  "id, student_number, name, email, phone, is_active, created_at, updated_at";

pub fn student_from_row(row: &Row<'_>) -> rusqlite::Result<Student> {
  Ok(Student {
    id:             row.get(0)?,
    student_number: row.get(1)?,
    name:           row.get(2)?,
    email:          row.get(3)?,
    phone:          row.get(4)?,
    is_active:      row.get(5)?,
    created_at:     decode_dt(row, 6)?,
    updated_at:     decode_dt(row, 7)?,
  })
}

pub const COURSE_COLUMNS: &str = "id, course_code, title, description, credits, \
                                  max_students, is_active, created_at, updated_at";

pub fn course_from_row(row: &Row<'_>) -> rusqlite::Result<Course> {
  Ok(Course {
    id:           row.get(0)?,
    course_code:  row.get(1)?,
    title:        row.get(2)?,
    description:  row.get(3)?,
    credits:      row.get(4)?,
    max_students: row.get(5)?,
    is_active:    row.get(6)?,
    created_at:   decode_dt(row, 7)?,
    updated_at:   decode_dt(row, 8)?,
  })
}

pub const ENROLLMENT_COLUMNS: &str =
  "student_id, course_id, enrollment_date, is_active";

pub fn enrollment_from_row(row: &Row<'_>) -> rusqlite::Result<Enrollment> {
  Ok(Enrollment {
    student_id:      row.get(0)?,
    course_id:       row.get(1)?,
    enrollment_date: decode_dt(row, 2)?,
    is_active:       row.get(3)?,
  })
}

/// `true` if `err` is a UNIQUE or PRIMARY KEY constraint violation.
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
  match err {
    rusqlite::Error::SqliteFailure(e, _) => {
      e.code == rusqlite::ErrorCode::ConstraintViolation
        && (e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
          || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
    }
    _ => false,
  }
}
