//! Course Catalog rules. Mirrors the Student Directory, keyed on the course
//! code.

use chrono::{DateTime, Utc};

use crate::{
  course::{Course, CoursePatch, NewCourse},
  records::{CourseRecords, Failure, Outcome, Page},
  Error,
};

pub fn register<R: CourseRecords>(
  records: &mut R,
  new: NewCourse,
  now: DateTime<Utc>,
) -> Outcome<Course, R> {
  ensure_unique(records, &new.course_code, None)?;
  records.insert_course(new, now).map_err(Failure::Records)
}

pub fn find<R: CourseRecords>(records: &mut R, id: i64) -> Outcome<Course, R> {
  records
    .course(id)
    .map_err(Failure::Records)?
    .ok_or(Failure::Rule(Error::CourseNotFound(id)))
}

pub fn list<R: CourseRecords>(
  records: &mut R,
  page: Page,
) -> Outcome<Vec<Course>, R> {
  records.courses(page).map_err(Failure::Records)
}

pub fn revise<R: CourseRecords>(
  records: &mut R,
  id: i64,
  patch: CoursePatch,
  now: DateTime<Utc>,
) -> Outcome<Course, R> {
  let mut course = find(records, id)?;
  if let Some(code) = patch.course_code.as_deref() {
    ensure_unique(records, code, Some(id))?;
  }
  patch.apply(&mut course, now);
  records.save_course(&course).map_err(Failure::Records)?;
  Ok(course)
}

pub fn deactivate<R: CourseRecords>(
  records: &mut R,
  id: i64,
  now: DateTime<Utc>,
) -> Outcome<Course, R> {
  let mut course = find(records, id)?;
  course.is_active = false;
  course.updated_at = now;
  records.save_course(&course).map_err(Failure::Records)?;
  Ok(course)
}

fn ensure_unique<R: CourseRecords>(
  records: &mut R,
  code: &str,
  owner: Option<i64>,
) -> Outcome<(), R> {
  match records.course_code_holder(code).map_err(Failure::Records)? {
    Some(holder) if Some(holder) != owner => {
      Err(Error::CourseCodeTaken(code.to_owned()).into())
    }
    _ => Ok(()),
  }
}
