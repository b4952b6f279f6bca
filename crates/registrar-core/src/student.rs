//! Student records owned by the Student Directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::patch::{default_true, present};

/// A registered student.
///
/// `id` is the surrogate key used everywhere else in the system. The
/// user-assigned student number travels as `student_id` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
  pub id:             i64,
  #[serde(rename = "student_id")]
  pub student_number: String,
  pub name:           String,
  pub email:          String,
  pub phone:          Option<String>,
  pub is_active:      bool,
  pub created_at:     DateTime<Utc>,
  /// Refreshed on every mutation, including deactivation.
  pub updated_at:     DateTime<Utc>,
}

/// Input to [`crate::directory::register`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewStudent {
  #[serde(rename = "student_id")]
  pub student_number: String,
  pub name:           String,
  pub email:          String,
  #[serde(default)]
  pub phone:          Option<String>,
  #[serde(default = "default_true")]
  pub is_active:      bool,
}

impl NewStudent {
  /// Convenience constructor for an active student without a phone number.
  pub fn new(
    student_number: impl Into<String>,
    name: impl Into<String>,
    email: impl Into<String>,
  ) -> Self {
    Self {
      student_number: student_number.into(),
      name:           name.into(),
      email:          email.into(),
      phone:          None,
      is_active:      true,
    }
  }
}

/// A partial update: only fields that are `Some` are applied.
///
/// `phone` is nullable, so it carries two levels of option: `Some(None)`
/// clears the stored number.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentPatch {
  #[serde(default, rename = "student_id")]
  pub student_number: Option<String>,
  #[serde(default)]
  pub name:           Option<String>,
  #[serde(default)]
  pub email:          Option<String>,
  #[serde(default, deserialize_with = "present")]
  pub phone:          Option<Option<String>>,
  #[serde(default)]
  pub is_active:      Option<bool>,
}

impl StudentPatch {
  /// Apply the present fields to `student` and stamp `updated_at`.
  pub fn apply(self, student: &mut Student, now: DateTime<Utc>) {
    if let Some(number) = self.student_number {
      student.student_number = number;
    }
    if let Some(name) = self.name {
      student.name = name;
    }
    if let Some(email) = self.email {
      student.email = email;
    }
    if let Some(phone) = self.phone {
      student.phone = phone;
    }
    if let Some(active) = self.is_active {
      student.is_active = active;
    }
    student.updated_at = now;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn patch_distinguishes_absent_from_null() {
    let absent: StudentPatch = serde_json::from_str(r#"{"name":"Bo"}"#).unwrap();
    assert_eq!(absent.phone, None);

    let cleared: StudentPatch =
      serde_json::from_str(r#"{"phone":null}"#).unwrap();
    assert_eq!(cleared.phone, Some(None));
  }

  #[test]
  fn new_student_defaults_to_active() {
    let body = r#"{"student_id":"S001","name":"Ann","email":"ann@example.com"}"#;
    let new: NewStudent = serde_json::from_str(body).unwrap();
    assert!(new.is_active);
    assert_eq!(new.student_number, "S001");
    assert_eq!(new.phone, None);
  }
}
