//! The `RegistrarStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `registrar-store-sqlite`). Each method runs one Directory, Catalog or
//! Ledger operation as a single atomic unit. Higher layers
//! (`registrar-api`) depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::{
  DomainError,
  course::{Course, CoursePatch, NewCourse},
  enrollment::{Enrollment, Withdrawal},
  records::Page,
  student::{NewStudent, Student, StudentPatch},
};

/// Abstraction over a registrar backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RegistrarStore: Send + Sync {
  type Error: std::error::Error + DomainError + Send + Sync + 'static;

  // ── Student Directory ─────────────────────────────────────────────────

  fn create_student(
    &self,
    new: NewStudent,
  ) -> impl Future<Output = Result<Student, Self::Error>> + Send + '_;

  fn student(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Student, Self::Error>> + Send + '_;

  /// Students in id order, active or not.
  fn list_students(
    &self,
    page: Page,
  ) -> impl Future<Output = Result<Vec<Student>, Self::Error>> + Send + '_;

  fn update_student(
    &self,
    id: i64,
    patch: StudentPatch,
  ) -> impl Future<Output = Result<Student, Self::Error>> + Send + '_;

  fn deactivate_student(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Student, Self::Error>> + Send + '_;

  // ── Course Catalog ────────────────────────────────────────────────────

  fn create_course(
    &self,
    new: NewCourse,
  ) -> impl Future<Output = Result<Course, Self::Error>> + Send + '_;

  fn course(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Course, Self::Error>> + Send + '_;

  fn list_courses(
    &self,
    page: Page,
  ) -> impl Future<Output = Result<Vec<Course>, Self::Error>> + Send + '_;

  fn update_course(
    &self,
    id: i64,
    patch: CoursePatch,
  ) -> impl Future<Output = Result<Course, Self::Error>> + Send + '_;

  fn deactivate_course(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Course, Self::Error>> + Send + '_;

  // ── Enrollment Ledger ─────────────────────────────────────────────────

  /// See [`crate::ledger::create_enrollment`] for the check order.
  fn create_enrollment(
    &self,
    student_id: i64,
    course_id: i64,
  ) -> impl Future<Output = Result<Enrollment, Self::Error>> + Send + '_;

  fn enrollments_for_student(
    &self,
    student_id: i64,
  ) -> impl Future<Output = Result<Vec<Enrollment>, Self::Error>> + Send + '_;

  fn enrollments_for_course(
    &self,
    course_id: i64,
  ) -> impl Future<Output = Result<Vec<Enrollment>, Self::Error>> + Send + '_;

  fn delete_enrollment(
    &self,
    student_id: i64,
    course_id: i64,
  ) -> impl Future<Output = Result<Withdrawal, Self::Error>> + Send + '_;
}
