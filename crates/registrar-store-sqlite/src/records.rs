//! [`SqlRecords`]: the record traits over one open transaction.

use chrono::{DateTime, Utc};
use registrar_core::{
  course::{Course, NewCourse},
  enrollment::Enrollment,
  records::{
    CourseRecords, EnrollmentRecords, Insertion, Page, Records, StudentRecords,
  },
  student::{NewStudent, Student},
};
use rusqlite::{Connection, OptionalExtension as _, params};

use crate::encode::{
  COURSE_COLUMNS, ENROLLMENT_COLUMNS, STUDENT_COLUMNS, course_from_row,
  encode_dt, enrollment_from_row, is_unique_violation, student_from_row,
};

/// Borrowed view over a connection that is inside a transaction.
pub struct SqlRecords<'a> {
  conn: &'a Connection,
}

impl<'a> SqlRecords<'a> {
  pub fn new(conn: &'a Connection) -> Self { Self { conn } }

  fn holder(&self, sql: &str, key: &str) -> rusqlite::Result<Option<i64>> {
    self.conn.query_row(sql, params![key], |r| r.get(0)).optional()
  }
}

impl Records for SqlRecords<'_> {
  type Error = rusqlite::Error;
}

// ─── Students ────────────────────────────────────────────────────────────────

impl StudentRecords for SqlRecords<'_> {
  fn student(&mut self, id: i64) -> rusqlite::Result<Option<Student>> {
    self
      .conn
      .query_row(
        &format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?1"),
        params![id],
        student_from_row,
      )
      .optional()
  }

  fn student_number_holder(&mut self, number: &str) -> rusqlite::Result<Option<i64>> {
    self.holder("SELECT id FROM students WHERE student_number = ?1", number)
  }

  fn email_holder(&mut self, email: &str) -> rusqlite::Result<Option<i64>> {
    self.holder("SELECT id FROM students WHERE email = ?1", email)
  }

  fn insert_student(
    &mut self,
    new: NewStudent,
    at: DateTime<Utc>,
  ) -> rusqlite::Result<Student> {
    let at_str = encode_dt(at);
    self.conn.execute(
      "INSERT INTO students (
         student_number, name, email, phone, is_active, created_at, updated_at
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
      params![
        new.student_number,
        new.name,
        new.email,
        new.phone,
        new.is_active,
        at_str,
      ],
    )?;

    Ok(Student {
      id:             self.conn.last_insert_rowid(),
      student_number: new.student_number,
      name:           new.name,
      email:          new.email,
      phone:          new.phone,
      is_active:      new.is_active,
      created_at:     at,
      updated_at:     at,
    })
  }

  fn save_student(&mut self, s: &Student) -> rusqlite::Result<()> {
    self.conn.execute(
      "UPDATE students
          SET student_number = ?2, name = ?3, email = ?4, phone = ?5,
              is_active = ?6, updated_at = ?7
        WHERE id = ?1",
      params![
        s.id,
        s.student_number,
        s.name,
        s.email,
        s.phone,
        s.is_active,
        encode_dt(s.updated_at),
      ],
    )?;
    Ok(())
  }

  fn students(&mut self, page: Page) -> rusqlite::Result<Vec<Student>> {
    let mut stmt = self.conn.prepare(&format!(
      "SELECT {STUDENT_COLUMNS} FROM students ORDER BY id LIMIT ?1 OFFSET ?2"
    ))?;
    let rows = stmt
      .query_map(params![page.limit, page.skip], student_from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
  }
}

// ─── Courses ─────────────────────────────────────────────────────────────────

impl CourseRecords for SqlRecords<'_> {
  fn course(&mut self, id: i64) -> rusqlite::Result<Option<Course>> {
    self
      .conn
      .query_row(
        &format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = ?1"),
        params![id],
        course_from_row,
      )
      .optional()
  }

  fn course_code_holder(&mut self, code: &str) -> rusqlite::Result<Option<i64>> {
    self.holder("SELECT id FROM courses WHERE course_code = ?1", code)
  }

  fn insert_course(
    &mut self,
    new: NewCourse,
    at: DateTime<Utc>,
  ) -> rusqlite::Result<Course> {
    let at_str = encode_dt(at);
    self.conn.execute(
      "INSERT INTO courses (
         course_code, title, description, credits, max_students,
         is_active, created_at, updated_at
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
      params![
        new.course_code,
        new.title,
        new.description,
        new.credits,
        new.max_students,
        new.is_active,
        at_str,
      ],
    )?;

    Ok(Course {
      id:           self.conn.last_insert_rowid(),
      course_code:  new.course_code,
      title:        new.title,
      description:  new.description,
      credits:      new.credits,
      max_students: new.max_students,
      is_active:    new.is_active,
      created_at:   at,
      updated_at:   at,
    })
  }

  fn save_course(&mut self, c: &Course) -> rusqlite::Result<()> {
    self.conn.execute(
      "UPDATE courses
          SET course_code = ?2, title = ?3, description = ?4, credits = ?5,
              max_students = ?6, is_active = ?7, updated_at = ?8
        WHERE id = ?1",
      params![
        c.id,
        c.course_code,
        c.title,
        c.description,
        c.credits,
        c.max_students,
        c.is_active,
        encode_dt(c.updated_at),
      ],
    )?;
    Ok(())
  }

  fn courses(&mut self, page: Page) -> rusqlite::Result<Vec<Course>> {
    let mut stmt = self.conn.prepare(&format!(
      "SELECT {COURSE_COLUMNS} FROM courses ORDER BY id LIMIT ?1 OFFSET ?2"
    ))?;
    let rows = stmt
      .query_map(params![page.limit, page.skip], course_from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
  }
}

// ─── Enrollments ─────────────────────────────────────────────────────────────

impl EnrollmentRecords for SqlRecords<'_> {
  fn enrollment_exists(
    &mut self,
    student_id: i64,
    course_id: i64,
  ) -> rusqlite::Result<bool> {
    Ok(
      self
        .conn
        .query_row(
          "SELECT 1 FROM enrollments WHERE student_id = ?1 AND course_id = ?2",
          params![student_id, course_id],
          |_| Ok(true),
        )
        .optional()?
        .unwrap_or(false),
    )
  }

  fn count_active_for_course(&mut self, course_id: i64) -> rusqlite::Result<i64> {
    self.conn.query_row(
      "SELECT COUNT(*) FROM enrollments WHERE course_id = ?1 AND is_active = 1",
      params![course_id],
      |r| r.get(0),
    )
  }

  fn insert_enrollment(&mut self, e: &Enrollment) -> rusqlite::Result<Insertion> {
    let inserted = self.conn.execute(
      "INSERT INTO enrollments (student_id, course_id, enrollment_date, is_active)
       VALUES (?1, ?2, ?3, ?4)",
      params![e.student_id, e.course_id, encode_dt(e.enrollment_date), e.is_active],
    );
    match inserted {
      Ok(_) => Ok(Insertion::Inserted),
      Err(err) if is_unique_violation(&err) => Ok(Insertion::Duplicate),
      Err(err) => Err(err),
    }
  }

  fn delete_enrollment(
    &mut self,
    student_id: i64,
    course_id: i64,
  ) -> rusqlite::Result<bool> {
    let removed = self.conn.execute(
      "DELETE FROM enrollments WHERE student_id = ?1 AND course_id = ?2",
      params![student_id, course_id],
    )?;
    Ok(removed > 0)
  }

  fn enrollments_for_student(
    &mut self,
    student_id: i64,
  ) -> rusqlite::Result<Vec<Enrollment>> {
    let mut stmt = self.conn.prepare(&format!(
      "SELECT {ENROLLMENT_COLUMNS} FROM enrollments
        WHERE student_id = ?1 ORDER BY rowid"
    ))?;
    let rows = stmt
      .query_map(params![student_id], enrollment_from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
  }

  fn enrollments_for_course(
    &mut self,
    course_id: i64,
  ) -> rusqlite::Result<Vec<Enrollment>> {
    let mut stmt = self.conn.prepare(&format!(
      "SELECT {ENROLLMENT_COLUMNS} FROM enrollments
        WHERE course_id = ?1 ORDER BY rowid"
    ))?;
    let rows = stmt
      .query_map(params![course_id], enrollment_from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
  }
}
