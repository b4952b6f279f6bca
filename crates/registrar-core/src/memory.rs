//! In-memory record store for exercising the rule functions.

use std::convert::Infallible;

use chrono::{DateTime, TimeZone, Utc};

use crate::{
  course::{Course, NewCourse},
  enrollment::Enrollment,
  records::{
    CourseRecords, EnrollmentRecords, Insertion, Page, Records, StudentRecords,
  },
  student::{NewStudent, Student},
};

/// A fixed instant `secs` seconds after the epoch.
pub fn at(secs: i64) -> DateTime<Utc> {
  Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
}

#[derive(Default)]
pub struct MemoryRecords {
  students:    Vec<Student>,
  courses:     Vec<Course>,
  enrollments: Vec<Enrollment>,
  /// Make `enrollment_exists` always answer `false`, as a concurrent
  /// writer's uncommitted row would look to a racing reader.
  pub hide_enrollments: bool,
}

fn window<T: Clone>(rows: &[T], page: Page) -> Vec<T> {
  rows
    .iter()
    .skip(page.skip as usize)
    .take(page.limit as usize)
    .cloned()
    .collect()
}

impl Records for MemoryRecords {
  type Error = Infallible;
}

impl StudentRecords for MemoryRecords {
  fn student(&mut self, id: i64) -> Result<Option<Student>, Infallible> {
    Ok(self.students.iter().find(|s| s.id == id).cloned())
  }

  fn student_number_holder(&mut self, number: &str) -> Result<Option<i64>, Infallible> {
    Ok(self.students.iter().find(|s| s.student_number == number).map(|s| s.id))
  }

  fn email_holder(&mut self, email: &str) -> Result<Option<i64>, Infallible> {
    Ok(self.students.iter().find(|s| s.email == email).map(|s| s.id))
  }

  fn insert_student(
    &mut self,
    new: NewStudent,
    at: DateTime<Utc>,
  ) -> Result<Student, Infallible> {
    let student = Student {
      id:             self.students.len() as i64 + 1,
      student_number: new.student_number,
      name:           new.name,
      email:          new.email,
      phone:          new.phone,
      is_active:      new.is_active,
      created_at:     at,
      updated_at:     at,
    };
    self.students.push(student.clone());
    Ok(student)
  }

  fn save_student(&mut self, student: &Student) -> Result<(), Infallible> {
    if let Some(slot) = self.students.iter_mut().find(|s| s.id == student.id) {
      *slot = student.clone();
    }
    Ok(())
  }

  fn students(&mut self, page: Page) -> Result<Vec<Student>, Infallible> {
    Ok(window(&self.students, page))
  }
}

impl CourseRecords for MemoryRecords {
  fn course(&mut self, id: i64) -> Result<Option<Course>, Infallible> {
    Ok(self.courses.iter().find(|c| c.id == id).cloned())
  }

  fn course_code_holder(&mut self, code: &str) -> Result<Option<i64>, Infallible> {
    Ok(self.courses.iter().find(|c| c.course_code == code).map(|c| c.id))
  }

  fn insert_course(
    &mut self,
    new: NewCourse,
    at: DateTime<Utc>,
  ) -> Result<Course, Infallible> {
    let course = Course {
      id:           self.courses.len() as i64 + 1,
      course_code:  new.course_code,
      title:        new.title,
      description:  new.description,
      credits:      new.credits,
      max_students: new.max_students,
      is_active:    new.is_active,
      created_at:   at,
      updated_at:   at,
    };
    self.courses.push(course.clone());
    Ok(course)
  }

  fn save_course(&mut self, course: &Course) -> Result<(), Infallible> {
    if let Some(slot) = self.courses.iter_mut().find(|c| c.id == course.id) {
      *slot = course.clone();
    }
    Ok(())
  }

  fn courses(&mut self, page: Page) -> Result<Vec<Course>, Infallible> {
    Ok(window(&self.courses, page))
  }
}

impl EnrollmentRecords for MemoryRecords {
  fn enrollment_exists(&mut self, student_id: i64, course_id: i64) -> Result<bool, Infallible> {
    Ok(
      !self.hide_enrollments
        && self
          .enrollments
          .iter()
          .any(|e| e.student_id == student_id && e.course_id == course_id),
    )
  }

  fn count_active_for_course(&mut self, course_id: i64) -> Result<i64, Infallible> {
    Ok(
      self
        .enrollments
        .iter()
        .filter(|e| e.course_id == course_id && e.is_active)
        .count() as i64,
    )
  }

  fn insert_enrollment(&mut self, enrollment: &Enrollment) -> Result<Insertion, Infallible> {
    let taken = self.enrollments.iter().any(|e| {
      e.student_id == enrollment.student_id && e.course_id == enrollment.course_id
    });
    if taken {
      return Ok(Insertion::Duplicate);
    }
    self.enrollments.push(enrollment.clone());
    Ok(Insertion::Inserted)
  }

  fn delete_enrollment(&mut self, student_id: i64, course_id: i64) -> Result<bool, Infallible> {
    let before = self.enrollments.len();
    self
      .enrollments
      .retain(|e| !(e.student_id == student_id && e.course_id == course_id));
    Ok(self.enrollments.len() != before)
  }

  fn enrollments_for_student(&mut self, student_id: i64) -> Result<Vec<Enrollment>, Infallible> {
    Ok(
      self
        .enrollments
        .iter()
        .filter(|e| e.student_id == student_id)
        .cloned()
        .collect(),
    )
  }

  fn enrollments_for_course(&mut self, course_id: i64) -> Result<Vec<Enrollment>, Infallible> {
    Ok(
      self
        .enrollments
        .iter()
        .filter(|e| e.course_id == course_id)
        .cloned()
        .collect(),
    )
  }
}
