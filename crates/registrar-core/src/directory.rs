//! Student Directory rules.
//!
//! Uniqueness of the student number and the email is checked across all
//! students regardless of active status. Students are never hard-deleted.

use chrono::{DateTime, Utc};

use crate::{
  records::{Failure, Outcome, Page, StudentRecords},
  student::{NewStudent, Student, StudentPatch},
  Error,
};

/// Register a new student after checking the student number, then the email.
pub fn register<R: StudentRecords>(
  records: &mut R,
  new: NewStudent,
  now: DateTime<Utc>,
) -> Outcome<Student, R> {
  ensure_unique(records, Some(&new.student_number), Some(&new.email), None)?;
  records.insert_student(new, now).map_err(Failure::Records)
}

pub fn find<R: StudentRecords>(records: &mut R, id: i64) -> Outcome<Student, R> {
  records
    .student(id)
    .map_err(Failure::Records)?
    .ok_or(Failure::Rule(Error::StudentNotFound(id)))
}

pub fn list<R: StudentRecords>(
  records: &mut R,
  page: Page,
) -> Outcome<Vec<Student>, R> {
  records.students(page).map_err(Failure::Records)
}

/// Apply a partial update. A changed student number or email is re-checked
/// against every other student.
pub fn revise<R: StudentRecords>(
  records: &mut R,
  id: i64,
  patch: StudentPatch,
  now: DateTime<Utc>,
) -> Outcome<Student, R> {
  let mut student = find(records, id)?;
  ensure_unique(
    records,
    patch.student_number.as_deref(),
    patch.email.as_deref(),
    Some(id),
  )?;
  patch.apply(&mut student, now);
  records.save_student(&student).map_err(Failure::Records)?;
  Ok(student)
}

/// Soft-delete: clear the active flag and keep the record.
pub fn deactivate<R: StudentRecords>(
  records: &mut R,
  id: i64,
  now: DateTime<Utc>,
) -> Outcome<Student, R> {
  let mut student = find(records, id)?;
  student.is_active = false;
  student.updated_at = now;
  records.save_student(&student).map_err(Failure::Records)?;
  Ok(student)
}

fn ensure_unique<R: StudentRecords>(
  records: &mut R,
  number: Option<&str>,
  email: Option<&str>,
  owner: Option<i64>,
) -> Outcome<(), R> {
  let foreign = |holder: Option<i64>| holder.is_some_and(|h| Some(h) != owner);

  if let Some(number) = number
    && foreign(records.student_number_holder(number).map_err(Failure::Records)?)
  {
    return Err(Error::StudentNumberTaken(number.to_owned()).into());
  }
  if let Some(email) = email
    && foreign(records.email_holder(email).map_err(Failure::Records)?)
  {
    return Err(Error::EmailTaken(email.to_owned()).into());
  }
  Ok(())
}
