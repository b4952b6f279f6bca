//! Handlers for `/enrollments` endpoints (Enrollment Ledger).
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/enrollments` | Body: `{"student_id":1,"course_id":10}`; 201 + enrollment |
//! | `DELETE` | `/enrollments` | Same body; 200 + acknowledgment |
//! | `GET`    | `/enrollments/students/{student_id}/courses` | Rows for one student |
//! | `GET`    | `/enrollments/courses/{course_id}/students` | Rows for one course |
//!
//! A missing or inactive student/course is a 404; an existing enrollment, a
//! full course, or a missing enrollment on delete is a 400.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use registrar_core::{
  enrollment::{Enrollment, Withdrawal},
  store::RegistrarStore,
};
use serde::Deserialize;

use crate::{
  error::ApiError,
  extract::{Json, Path},
};

/// Body of `POST /enrollments` and `DELETE /enrollments`.
#[derive(Debug, Deserialize)]
pub struct PairBody {
  pub student_id: i64,
  pub course_id:  i64,
}

/// `POST /enrollments`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<PairBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RegistrarStore,
{
  let enrollment = store
    .create_enrollment(body.student_id, body.course_id)
    .await
    .map_err(ApiError::from_store)?;
  tracing::info!(
    student_id = body.student_id,
    course_id = body.course_id,
    "enrolled"
  );
  Ok((StatusCode::CREATED, Json(enrollment)))
}

/// `DELETE /enrollments`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<PairBody>,
) -> Result<Json<Withdrawal>, ApiError>
where
  S: RegistrarStore,
{
  let ack = store
    .delete_enrollment(body.student_id, body.course_id)
    .await
    .map_err(ApiError::from_store)?;
  tracing::info!(
    student_id = body.student_id,
    course_id = body.course_id,
    "enrollment cancelled"
  );
  Ok(Json(ack))
}

/// `GET /enrollments/students/{student_id}/courses`
pub async fn for_student<S>(
  State(store): State<Arc<S>>,
  Path(student_id): Path<i64>,
) -> Result<Json<Vec<Enrollment>>, ApiError>
where
  S: RegistrarStore,
{
  let rows = store
    .enrollments_for_student(student_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(rows))
}

/// `GET /enrollments/courses/{course_id}/students`
pub async fn for_course<S>(
  State(store): State<Arc<S>>,
  Path(course_id): Path<i64>,
) -> Result<Json<Vec<Enrollment>>, ApiError>
where
  S: RegistrarStore,
{
  let rows = store
    .enrollments_for_course(course_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(rows))
}
