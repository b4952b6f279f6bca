//! Course records owned by the Course Catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::patch::{default_true, present};

/// A course in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
  pub id:           i64,
  pub course_code:  String,
  pub title:        String,
  pub description:  Option<String>,
  pub credits:      i64,
  /// Maximum number of active enrollments.
  pub max_students: i64,
  pub is_active:    bool,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   DateTime<Utc>,
}

/// Input to [`crate::catalog::register`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewCourse {
  pub course_code:  String,
  pub title:        String,
  #[serde(default)]
  pub description:  Option<String>,
  pub credits:      i64,
  pub max_students: i64,
  #[serde(default = "default_true")]
  pub is_active:    bool,
}

impl NewCourse {
  /// Convenience constructor for an active course without a description.
  pub fn new(
    course_code: impl Into<String>,
    title: impl Into<String>,
    credits: i64,
    max_students: i64,
  ) -> Self {
    Self {
      course_code: course_code.into(),
      title: title.into(),
      description: None,
      credits,
      max_students,
      is_active: true,
    }
  }
}

/// A partial update: only fields that are `Some` are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoursePatch {
  #[serde(default)]
  pub course_code:  Option<String>,
  #[serde(default)]
  pub title:        Option<String>,
  #[serde(default, deserialize_with = "present")]
  pub description:  Option<Option<String>>,
  #[serde(default)]
  pub credits:      Option<i64>,
  #[serde(default)]
  pub max_students: Option<i64>,
  #[serde(default)]
  pub is_active:    Option<bool>,
}

impl CoursePatch {
  /// Apply the present fields to `course` and stamp `updated_at`.
  pub fn apply(self, course: &mut Course, now: DateTime<Utc>) {
    if let Some(code) = self.course_code {
      course.course_code = code;
    }
    if let Some(title) = self.title {
      course.title = title;
    }
    if let Some(description) = self.description {
      course.description = description;
    }
    if let Some(credits) = self.credits {
      course.credits = credits;
    }
    if let Some(max) = self.max_students {
      course.max_students = max;
    }
    if let Some(active) = self.is_active {
      course.is_active = active;
    }
    course.updated_at = now;
  }
}
