//! The student–course relationship row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One relationship row, unique per `(student_id, course_id)`.
///
/// `is_active` is always `true` today: removing an enrollment deletes the
/// row rather than flagging it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
  pub student_id:      i64,
  pub course_id:       i64,
  /// Set once at creation.
  pub enrollment_date: DateTime<Utc>,
  pub is_active:       bool,
}

/// Acknowledgment returned by [`crate::ledger::delete_enrollment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
  pub status:  String,
  pub message: String,
}

impl Withdrawal {
  pub fn success() -> Self {
    Self {
      status:  "success".to_owned(),
      message: "enrollment cancelled".to_owned(),
    }
  }
}
