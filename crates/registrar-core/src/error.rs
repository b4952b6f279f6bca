//! Error types for `registrar-core`.

use thiserror::Error;

/// A violated domain rule. Every variant is either a missing (or unusable)
/// entity or a conflict with existing state; see [`Error::class`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("student not found: {0}")]
  StudentNotFound(i64),

  #[error("student not found or inactive: {0}")]
  StudentUnavailable(i64),

  #[error("course not found: {0}")]
  CourseNotFound(i64),

  #[error("course not found or inactive: {0}")]
  CourseUnavailable(i64),

  #[error("student id already registered: {0}")]
  StudentNumberTaken(String),

  #[error("email already registered: {0}")]
  EmailTaken(String),

  #[error("course code already exists: {0}")]
  CourseCodeTaken(String),

  #[error("student {student_id} is already enrolled in course {course_id}")]
  AlreadyEnrolled { student_id: i64, course_id: i64 },

  #[error("course full: {course_id} (capacity {capacity})")]
  CourseFull { course_id: i64, capacity: i64 },

  #[error("student {student_id} is not enrolled in course {course_id}")]
  NotEnrolled { student_id: i64, course_id: i64 },
}

/// How a caller should surface an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
  /// The referenced entity is absent, or inactive where activity is required.
  NotFound,
  /// The request collides with existing state.
  Conflict,
}

impl Error {
  pub fn class(&self) -> ErrorClass {
    match self {
      Self::StudentNotFound(_)
      | Self::StudentUnavailable(_)
      | Self::CourseNotFound(_)
      | Self::CourseUnavailable(_) => ErrorClass::NotFound,
      Self::StudentNumberTaken(_)
      | Self::EmailTaken(_)
      | Self::CourseCodeTaken(_)
      | Self::AlreadyEnrolled { .. }
      | Self::CourseFull { .. }
      | Self::NotEnrolled { .. } => ErrorClass::Conflict,
    }
  }
}

/// Implemented by backend error types so that callers can recover the domain
/// failure wrapped inside them, if any.
pub trait DomainError {
  fn domain(&self) -> Option<&Error>;
}

impl DomainError for Error {
  fn domain(&self) -> Option<&Error> { Some(self) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
