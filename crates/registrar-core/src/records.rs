//! Repository-style record access consumed by the rule functions.
//!
//! A backend implements these traits over a single transaction. The rule
//! functions in [`crate::directory`], [`crate::catalog`] and
//! [`crate::ledger`] never see more than one transaction, so a backend that
//! commits only on `Ok` gets all-or-nothing semantics for free.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
  course::{Course, NewCourse},
  enrollment::Enrollment,
  student::{NewStudent, Student},
  Error,
};

// ─── Paging ──────────────────────────────────────────────────────────────────

/// Offset/limit window over an id-ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Page {
  #[serde(default)]
  pub skip:  u32,
  #[serde(default = "Page::default_limit")]
  pub limit: u32,
}

impl Page {
  pub const DEFAULT_LIMIT: u32 = 100;

  fn default_limit() -> u32 { Self::DEFAULT_LIMIT }
}

impl Default for Page {
  fn default() -> Self { Self { skip: 0, limit: Self::DEFAULT_LIMIT } }
}

// ─── Outcomes ────────────────────────────────────────────────────────────────

/// Result of inserting a relationship row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
  Inserted,
  /// The storage-level uniqueness constraint on the pair rejected the row.
  Duplicate,
}

/// Why a rule function failed: a domain rule, or the backend itself.
#[derive(Debug)]
pub enum Failure<E> {
  Rule(Error),
  Records(E),
}

impl<E> From<Error> for Failure<E> {
  fn from(e: Error) -> Self { Self::Rule(e) }
}

/// Return type of every rule function over the records `R`.
pub type Outcome<T, R> = Result<T, Failure<<R as Records>::Error>>;

// ─── Traits ──────────────────────────────────────────────────────────────────

/// Carries the backend error type shared by all record traits.
pub trait Records {
  type Error;
}

pub trait StudentRecords: Records {
  fn student(&mut self, id: i64) -> Result<Option<Student>, Self::Error>;

  /// The id of the student holding `number`, active or not.
  fn student_number_holder(
    &mut self,
    number: &str,
  ) -> Result<Option<i64>, Self::Error>;

  /// The id of the student holding `email`, active or not.
  fn email_holder(&mut self, email: &str) -> Result<Option<i64>, Self::Error>;

  /// Persist a new student, assigning its id and both timestamps.
  fn insert_student(
    &mut self,
    new: NewStudent,
    at: DateTime<Utc>,
  ) -> Result<Student, Self::Error>;

  /// Overwrite every mutable column of an existing student.
  fn save_student(&mut self, student: &Student) -> Result<(), Self::Error>;

  fn students(&mut self, page: Page) -> Result<Vec<Student>, Self::Error>;
}

pub trait CourseRecords: Records {
  fn course(&mut self, id: i64) -> Result<Option<Course>, Self::Error>;

  fn course_code_holder(
    &mut self,
    code: &str,
  ) -> Result<Option<i64>, Self::Error>;

  fn insert_course(
    &mut self,
    new: NewCourse,
    at: DateTime<Utc>,
  ) -> Result<Course, Self::Error>;

  fn save_course(&mut self, course: &Course) -> Result<(), Self::Error>;

  fn courses(&mut self, page: Page) -> Result<Vec<Course>, Self::Error>;
}

pub trait EnrollmentRecords: Records {
  fn enrollment_exists(
    &mut self,
    student_id: i64,
    course_id: i64,
  ) -> Result<bool, Self::Error>;

  /// Number of relationship rows for `course_id` with `is_active` set.
  fn count_active_for_course(
    &mut self,
    course_id: i64,
  ) -> Result<i64, Self::Error>;

  fn insert_enrollment(
    &mut self,
    enrollment: &Enrollment,
  ) -> Result<Insertion, Self::Error>;

  /// Remove the row for the pair; `false` if there was none.
  fn delete_enrollment(
    &mut self,
    student_id: i64,
    course_id: i64,
  ) -> Result<bool, Self::Error>;

  /// Rows for `student_id` in relationship insertion order.
  fn enrollments_for_student(
    &mut self,
    student_id: i64,
  ) -> Result<Vec<Enrollment>, Self::Error>;

  /// Rows for `course_id` in relationship insertion order.
  fn enrollments_for_course(
    &mut self,
    course_id: i64,
  ) -> Result<Vec<Enrollment>, Self::Error>;
}
