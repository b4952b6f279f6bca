//! Enrollment Ledger rules: the only code that creates or deletes
//! relationship rows.
//!
//! Checks for [`create_enrollment`] run in a fixed order so that a request
//! failing several of them always reports the same one:
//!
//! 1. student exists and is active
//! 2. course exists and is active
//! 3. the pair is not already enrolled
//! 4. the course has a free seat
//!
//! The duplicate check is backed by the storage uniqueness constraint on the
//! pair; a [`Insertion::Duplicate`] from the records is reported as
//! [`Error::AlreadyEnrolled`]. The capacity check has no such backstop and is
//! only as strong as the isolation of the surrounding transaction.

use chrono::{DateTime, Utc};

use crate::{
  catalog,
  directory,
  enrollment::{Enrollment, Withdrawal},
  records::{
    CourseRecords, EnrollmentRecords, Failure, Insertion, Outcome,
    StudentRecords,
  },
  Error,
};

/// Enrol `student_id` in `course_id`, stamping the row with `now`.
pub fn create_enrollment<R>(
  records: &mut R,
  student_id: i64,
  course_id: i64,
  now: DateTime<Utc>,
) -> Outcome<Enrollment, R>
where
  R: StudentRecords + CourseRecords + EnrollmentRecords,
{
  records
    .student(student_id)
    .map_err(Failure::Records)?
    .filter(|s| s.is_active)
    .ok_or(Error::StudentUnavailable(student_id))?;

  let course = records
    .course(course_id)
    .map_err(Failure::Records)?
    .filter(|c| c.is_active)
    .ok_or(Error::CourseUnavailable(course_id))?;

  let already = Error::AlreadyEnrolled { student_id, course_id };
  if records
    .enrollment_exists(student_id, course_id)
    .map_err(Failure::Records)?
  {
    return Err(already.into());
  }

  let taken = records
    .count_active_for_course(course_id)
    .map_err(Failure::Records)?;
  if taken >= course.max_students {
    return Err(
      Error::CourseFull { course_id, capacity: course.max_students }.into(),
    );
  }

  let enrollment = Enrollment {
    student_id,
    course_id,
    enrollment_date: now,
    is_active: true,
  };
  match records
    .insert_enrollment(&enrollment)
    .map_err(Failure::Records)?
  {
    Insertion::Inserted => Ok(enrollment),
    Insertion::Duplicate => Err(already.into()),
  }
}

/// Every relationship row of a student, active or not. The student itself
/// may be inactive.
pub fn enrollments_for_student<R>(
  records: &mut R,
  student_id: i64,
) -> Outcome<Vec<Enrollment>, R>
where
  R: StudentRecords + EnrollmentRecords,
{
  directory::find(records, student_id)?;
  records
    .enrollments_for_student(student_id)
    .map_err(Failure::Records)
}

/// Every relationship row of a course. The course itself may be inactive.
pub fn enrollments_for_course<R>(
  records: &mut R,
  course_id: i64,
) -> Outcome<Vec<Enrollment>, R>
where
  R: CourseRecords + EnrollmentRecords,
{
  catalog::find(records, course_id)?;
  records
    .enrollments_for_course(course_id)
    .map_err(Failure::Records)
}

/// Remove the relationship row for the pair.
///
/// Both entities must exist (active or not); a missing row is a conflict,
/// not a not-found.
pub fn delete_enrollment<R>(
  records: &mut R,
  student_id: i64,
  course_id: i64,
) -> Outcome<Withdrawal, R>
where
  R: StudentRecords + CourseRecords + EnrollmentRecords,
{
  directory::find(records, student_id)?;
  catalog::find(records, course_id)?;

  if records
    .delete_enrollment(student_id, course_id)
    .map_err(Failure::Records)?
  {
    Ok(Withdrawal::success())
  } else {
    Err(Error::NotEnrolled { student_id, course_id }.into())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    course::NewCourse,
    memory::{MemoryRecords, at},
    student::NewStudent,
  };

  fn rule<T: std::fmt::Debug>(r: Outcome<T, MemoryRecords>) -> Error {
    match r {
      Err(Failure::Rule(e)) => e,
      other => panic!("expected rule failure, got {other:?}"),
    }
  }

  fn student(m: &mut MemoryRecords, n: u32) -> i64 {
    directory::register(
      m,
      NewStudent::new(format!("S{n:03}"), "Student", format!("s{n}@example.com")),
      at(0),
    )
    .unwrap()
    .id
  }

  fn course(m: &mut MemoryRecords, code: &str, capacity: i64) -> i64 {
    catalog::register(m, NewCourse::new(code, "Course", 3, capacity), at(0))
      .unwrap()
      .id
  }

  #[test]
  fn enrol_then_list_yields_one_active_row() {
    let mut m = MemoryRecords::default();
    let s = student(&mut m, 1);
    let c = course(&mut m, "CS101", 30);

    let e = create_enrollment(&mut m, s, c, at(7)).unwrap();
    assert_eq!(e.enrollment_date, at(7));
    assert!(e.is_active);

    let rows = enrollments_for_student(&mut m, s).unwrap();
    assert_eq!(rows, vec![e.clone()]);
    assert_eq!(enrollments_for_course(&mut m, c).unwrap(), vec![e]);
  }

  #[test]
  fn single_seat_scenario() {
    let mut m = MemoryRecords::default();
    let s1 = student(&mut m, 1);
    let s2 = student(&mut m, 2);
    let c = course(&mut m, "CS101", 1);

    let first = create_enrollment(&mut m, s1, c, at(1)).unwrap();
    assert_eq!(
      rule(create_enrollment(&mut m, s1, c, at(2))),
      Error::AlreadyEnrolled { student_id: s1, course_id: c }
    );
    assert_eq!(
      rule(create_enrollment(&mut m, s2, c, at(3))),
      Error::CourseFull { course_id: c, capacity: 1 }
    );
    assert_eq!(enrollments_for_course(&mut m, c).unwrap(), vec![first]);
  }

  #[test]
  fn capacity_admits_exactly_max_students() {
    let mut m = MemoryRecords::default();
    let c = course(&mut m, "CS101", 3);
    let ids: Vec<i64> = (1..=4).map(|n| student(&mut m, n)).collect();

    for &s in &ids[..3] {
      create_enrollment(&mut m, s, c, at(1)).unwrap();
    }
    assert!(matches!(
      rule(create_enrollment(&mut m, ids[3], c, at(1))),
      Error::CourseFull { .. }
    ));
  }

  #[test]
  fn duplicate_is_reported_before_full() {
    let mut m = MemoryRecords::default();
    let s = student(&mut m, 1);
    let c = course(&mut m, "CS101", 1);
    create_enrollment(&mut m, s, c, at(1)).unwrap();

    assert!(matches!(
      rule(create_enrollment(&mut m, s, c, at(2))),
      Error::AlreadyEnrolled { .. }
    ));
  }

  #[test]
  fn inactive_or_missing_entities_are_not_found() {
    let mut m = MemoryRecords::default();
    let s = student(&mut m, 1);
    let c = course(&mut m, "CS101", 5);

    assert_eq!(
      rule(create_enrollment(&mut m, 99, 98, at(1))),
      Error::StudentUnavailable(99)
    );
    assert_eq!(
      rule(create_enrollment(&mut m, s, 98, at(1))),
      Error::CourseUnavailable(98)
    );

    catalog::deactivate(&mut m, c, at(2)).unwrap();
    assert_eq!(
      rule(create_enrollment(&mut m, s, c, at(3))),
      Error::CourseUnavailable(c)
    );

    directory::deactivate(&mut m, s, at(4)).unwrap();
    assert_eq!(
      rule(create_enrollment(&mut m, s, c, at(5))),
      Error::StudentUnavailable(s)
    );
  }

  #[test]
  fn deactivation_keeps_existing_rows_readable() {
    let mut m = MemoryRecords::default();
    let s = student(&mut m, 1);
    let c = course(&mut m, "CS101", 5);
    create_enrollment(&mut m, s, c, at(1)).unwrap();

    directory::deactivate(&mut m, s, at(2)).unwrap();
    catalog::deactivate(&mut m, c, at(2)).unwrap();

    assert_eq!(enrollments_for_student(&mut m, s).unwrap().len(), 1);
    assert_eq!(enrollments_for_course(&mut m, c).unwrap().len(), 1);
  }

  #[test]
  fn storage_duplicate_maps_to_already_enrolled() {
    let mut m = MemoryRecords::default();
    let s = student(&mut m, 1);
    let c = course(&mut m, "CS101", 5);
    m.hide_enrollments = true;
    create_enrollment(&mut m, s, c, at(1)).unwrap();

    assert_eq!(
      rule(create_enrollment(&mut m, s, c, at(2))),
      Error::AlreadyEnrolled { student_id: s, course_id: c }
    );
  }

  #[test]
  fn delete_missing_row_is_conflict() {
    let mut m = MemoryRecords::default();
    let s = student(&mut m, 1);
    let c = course(&mut m, "CS101", 5);

    assert_eq!(
      rule(delete_enrollment(&mut m, s, c)),
      Error::NotEnrolled { student_id: s, course_id: c }
    );
    assert_eq!(rule(delete_enrollment(&mut m, 42, c)), Error::StudentNotFound(42));
    assert_eq!(rule(delete_enrollment(&mut m, s, 42)), Error::CourseNotFound(42));
  }

  #[test]
  fn re_enrol_after_delete() {
    let mut m = MemoryRecords::default();
    let s = student(&mut m, 1);
    let c = course(&mut m, "CS101", 1);

    create_enrollment(&mut m, s, c, at(1)).unwrap();
    assert_eq!(delete_enrollment(&mut m, s, c).unwrap(), Withdrawal::success());
    assert!(enrollments_for_student(&mut m, s).unwrap().is_empty());

    let again = create_enrollment(&mut m, s, c, at(9)).unwrap();
    assert_eq!(again.enrollment_date, at(9));
  }

  #[test]
  fn listing_requires_entity_to_exist() {
    let mut m = MemoryRecords::default();
    assert_eq!(
      rule(enrollments_for_student(&mut m, 3)),
      Error::StudentNotFound(3)
    );
    assert_eq!(
      rule(enrollments_for_course(&mut m, 3)),
      Error::CourseNotFound(3)
    );
  }

  #[test]
  fn rows_come_back_in_insertion_order() {
    let mut m = MemoryRecords::default();
    let s = student(&mut m, 1);
    let c3 = course(&mut m, "C3", 5);
    let c1 = course(&mut m, "C1", 5);
    let c2 = course(&mut m, "C2", 5);

    for c in [c2, c3, c1] {
      create_enrollment(&mut m, s, c, at(1)).unwrap();
    }
    let order: Vec<i64> = enrollments_for_student(&mut m, s)
      .unwrap()
      .into_iter()
      .map(|e| e.course_id)
      .collect();
    assert_eq!(order, vec![c2, c3, c1]);
  }
}
