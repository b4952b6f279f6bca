//! Handlers for `/courses` endpoints (Course Catalog).
//!
//! Same shape as [`crate::students`], keyed on the course code.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use registrar_core::{
  course::{Course, CoursePatch, NewCourse},
  records::Page,
  store::RegistrarStore,
};

use crate::{
  error::ApiError,
  extract::{Json, Path, Query},
};

/// `GET /courses[?skip=..&limit=..]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(page): Query<Page>,
) -> Result<Json<Vec<Course>>, ApiError>
where
  S: RegistrarStore,
{
  let courses = store.list_courses(page).await.map_err(ApiError::from_store)?;
  Ok(Json(courses))
}

/// `POST /courses`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewCourse>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RegistrarStore,
{
  let course = store.create_course(body).await.map_err(ApiError::from_store)?;
  tracing::info!(id = course.id, code = %course.course_code, "course created");
  Ok((StatusCode::CREATED, Json(course)))
}

/// `GET /courses/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Course>, ApiError>
where
  S: RegistrarStore,
{
  let course = store.course(id).await.map_err(ApiError::from_store)?;
  Ok(Json(course))
}

/// `PUT /courses/{id}`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(patch): Json<CoursePatch>,
) -> Result<Json<Course>, ApiError>
where
  S: RegistrarStore,
{
  let course = store
    .update_course(id, patch)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(course))
}

/// `DELETE /courses/{id}`: soft delete.
pub async fn deactivate<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Course>, ApiError>
where
  S: RegistrarStore,
{
  let course = store
    .deactivate_course(id)
    .await
    .map_err(ApiError::from_store)?;
  tracing::info!(id, "course deactivated");
  Ok(Json(course))
}
