//! Handlers for `/students` endpoints (Student Directory).
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/students` | `?skip=0&limit=100`, id order, inactive included |
//! | `POST`   | `/students` | Body: [`NewStudent`]; 201, or 400 on a taken student id / email |
//! | `GET`    | `/students/{id}` | 404 if not found |
//! | `PUT`    | `/students/{id}` | Body: [`StudentPatch`]; only present fields change |
//! | `DELETE` | `/students/{id}` | Soft delete; returns the deactivated record |

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use registrar_core::{
  records::Page,
  store::RegistrarStore,
  student::{NewStudent, Student, StudentPatch},
};

use crate::{
  error::ApiError,
  extract::{Json, Path, Query},
};

/// Reject addresses that are not shaped like `local@domain.tld`, or that
/// contain whitespace or control characters.
fn check_email(email: &str) -> Result<(), ApiError> {
  let clean = !email.chars().any(|c| c.is_whitespace() || c.is_control());
  let valid = clean
    && email.split_once('@').is_some_and(|(local, domain)| {
      !local.is_empty()
        && !domain.contains('@')
        && domain
          .split_once('.')
          .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
    });
  if valid {
    Ok(())
  } else {
    Err(ApiError::Unprocessable(format!("invalid email address: {email:?}")))
  }
}

/// `GET /students[?skip=..&limit=..]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(page): Query<Page>,
) -> Result<Json<Vec<Student>>, ApiError>
where
  S: RegistrarStore,
{
  let students = store.list_students(page).await.map_err(ApiError::from_store)?;
  Ok(Json(students))
}

/// `POST /students`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewStudent>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RegistrarStore,
{
  check_email(&body.email)?;
  let student = store.create_student(body).await.map_err(ApiError::from_store)?;
  tracing::info!(id = student.id, number = %student.student_number, "student created");
  Ok((StatusCode::CREATED, Json(student)))
}

/// `GET /students/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Student>, ApiError>
where
  S: RegistrarStore,
{
  let student = store.student(id).await.map_err(ApiError::from_store)?;
  Ok(Json(student))
}

/// `PUT /students/{id}`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(patch): Json<StudentPatch>,
) -> Result<Json<Student>, ApiError>
where
  S: RegistrarStore,
{
  if let Some(email) = &patch.email {
    check_email(email)?;
  }
  let student = store
    .update_student(id, patch)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(student))
}

/// `DELETE /students/{id}`
pub async fn deactivate<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Student>, ApiError>
where
  S: RegistrarStore,
{
  let student = store
    .deactivate_student(id)
    .await
    .map_err(ApiError::from_store)?;
  tracing::info!(id, "student deactivated");
  Ok(Json(student))
}
