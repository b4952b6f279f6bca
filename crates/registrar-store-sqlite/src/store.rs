//! [`SqliteStore`]: the SQLite implementation of [`RegistrarStore`].

use std::{path::Path, time::Duration};

use chrono::Utc;
use registrar_core::{
  catalog,
  course::{Course, CoursePatch, NewCourse},
  directory,
  enrollment::{Enrollment, Withdrawal},
  ledger,
  records::{Failure, Page},
  store::RegistrarStore,
  student::{NewStudent, Student, StudentPatch},
};
use rusqlite::TransactionBehavior;

use crate::{Result, records::SqlRecords, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// How long a writer waits for another connection's write lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// A registrar store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. Every call
/// runs on the connection's single background thread, so transactions from
/// different clones never interleave.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let conn = tokio_rusqlite::Connection::open(&path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened sqlite store");
    Ok(store)
  }

  /// Open an in-memory store, mainly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `op` inside one transaction.
  ///
  /// The transaction commits only if `op` succeeds; a rule failure or a
  /// database error rolls it back. Writers use `BEGIN IMMEDIATE` so the
  /// write lock is held from the first read, which makes the ledger's
  /// count-then-insert safe against other connections to the same file.
  async fn transact<T, F>(&self, behavior: TransactionBehavior, op: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&mut SqlRecords<'_>) -> Result<T, Failure<rusqlite::Error>>
      + Send
      + 'static,
  {
    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(behavior)?;
        let result = op(&mut SqlRecords::new(&tx));
        match result {
          Ok(value) => {
            tx.commit()?;
            Ok(Ok(value))
          }
          Err(Failure::Rule(e)) => Ok(Err(e)),
          Err(Failure::Records(e)) => Err(e.into()),
        }
      })
      .await?;
    Ok(outcome?)
  }

  async fn write<T, F>(&self, op: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&mut SqlRecords<'_>) -> Result<T, Failure<rusqlite::Error>>
      + Send
      + 'static,
  {
    self.transact(TransactionBehavior::Immediate, op).await
  }

  async fn read<T, F>(&self, op: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&mut SqlRecords<'_>) -> Result<T, Failure<rusqlite::Error>>
      + Send
      + 'static,
  {
    self.transact(TransactionBehavior::Deferred, op).await
  }
}

// ─── RegistrarStore impl ─────────────────────────────────────────────────────

impl RegistrarStore for SqliteStore {
  type Error = crate::Error;

  // ── Student Directory ─────────────────────────────────────────────────────

  async fn create_student(&self, new: NewStudent) -> Result<Student> {
    self
      .write(move |r| directory::register(r, new, Utc::now()))
      .await
  }

  async fn student(&self, id: i64) -> Result<Student> {
    self.read(move |r| directory::find(r, id)).await
  }

  async fn list_students(&self, page: Page) -> Result<Vec<Student>> {
    self.read(move |r| directory::list(r, page)).await
  }

  async fn update_student(&self, id: i64, patch: StudentPatch) -> Result<Student> {
    self
      .write(move |r| directory::revise(r, id, patch, Utc::now()))
      .await
  }

  async fn deactivate_student(&self, id: i64) -> Result<Student> {
    self
      .write(move |r| directory::deactivate(r, id, Utc::now()))
      .await
  }

  // ── Course Catalog ────────────────────────────────────────────────────────

  async fn create_course(&self, new: NewCourse) -> Result<Course> {
    self
      .write(move |r| catalog::register(r, new, Utc::now()))
      .await
  }

  async fn course(&self, id: i64) -> Result<Course> {
    self.read(move |r| catalog::find(r, id)).await
  }

  async fn list_courses(&self, page: Page) -> Result<Vec<Course>> {
    self.read(move |r| catalog::list(r, page)).await
  }

  async fn update_course(&self, id: i64, patch: CoursePatch) -> Result<Course> {
    self
      .write(move |r| catalog::revise(r, id, patch, Utc::now()))
      .await
  }

  async fn deactivate_course(&self, id: i64) -> Result<Course> {
    self
      .write(move |r| catalog::deactivate(r, id, Utc::now()))
      .await
  }

  // ── Enrollment Ledger ─────────────────────────────────────────────────────

  async fn create_enrollment(
    &self,
    student_id: i64,
    course_id: i64,
  ) -> Result<Enrollment> {
    self
      .write(move |r| {
        ledger::create_enrollment(r, student_id, course_id, Utc::now())
      })
      .await
  }

  async fn enrollments_for_student(&self, student_id: i64) -> Result<Vec<Enrollment>> {
    self
      .read(move |r| ledger::enrollments_for_student(r, student_id))
      .await
  }

  async fn enrollments_for_course(&self, course_id: i64) -> Result<Vec<Enrollment>> {
    self
      .read(move |r| ledger::enrollments_for_course(r, course_id))
      .await
  }

  async fn delete_enrollment(
    &self,
    student_id: i64,
    course_id: i64,
  ) -> Result<Withdrawal> {
    self
      .write(move |r| ledger::delete_enrollment(r, student_id, course_id))
      .await
  }
}
