//! JSON REST API for the course registrar.
//!
//! Exposes an axum [`Router`] backed by any
//! [`registrar_core::store::RegistrarStore`]. CORS, tracing, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api/v1", registrar_api::api_router(store.clone()))
//! ```

pub mod courses;
pub mod enrollments;
pub mod error;
pub mod extract;
pub mod students;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use registrar_core::store::RegistrarStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RegistrarStore + 'static,
{
  Router::new()
    // Student Directory
    .route("/students", get(students::list::<S>).post(students::create::<S>))
    .route(
      "/students/{id}",
      get(students::get_one::<S>)
        .put(students::update::<S>)
        .delete(students::deactivate::<S>),
    )
    // Course Catalog
    .route("/courses", get(courses::list::<S>).post(courses::create::<S>))
    .route(
      "/courses/{id}",
      get(courses::get_one::<S>)
        .put(courses::update::<S>)
        .delete(courses::deactivate::<S>),
    )
    // Enrollment Ledger
    .route(
      "/enrollments",
      post(enrollments::create::<S>).delete(enrollments::delete::<S>),
    )
    .route(
      "/enrollments/students/{student_id}/courses",
      get(enrollments::for_student::<S>),
    )
    .route(
      "/enrollments/courses/{course_id}/students",
      get(enrollments::for_course::<S>),
    )
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────
