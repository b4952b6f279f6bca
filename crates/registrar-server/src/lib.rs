//! HTTP server assembly for the course registrar.
//!
//! Mounts [`registrar_api::api_router`] under [`API_PREFIX`], adds the
//! welcome route, request tracing and CORS, and owns the runtime
//! configuration.

pub mod seed;

use std::{path::PathBuf, sync::Arc};

use axum::{Json, Router, routing::get};
use registrar_core::store::RegistrarStore;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub const PROJECT_NAME: &str = "Course Registrar";

/// Prefix under which the JSON API is mounted.
pub const API_PREFIX: &str = "/api/v1";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `REGISTRAR_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl ServerConfig {
  /// Layer the optional TOML file at `path` under `REGISTRAR_*` environment
  /// variables, on top of built-in defaults.
  pub fn load(path: impl Into<PathBuf>) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 8000)?
      .set_default("store_path", "registrar.db")?
      .add_source(config::File::from(path.into()).required(false))
      .add_source(config::Environment::with_prefix("REGISTRAR"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the complete application router for `store`.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: RegistrarStore + 'static,
{
  Router::new()
    .route("/", get(root))
    .nest(API_PREFIX, registrar_api::api_router(store))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::very_permissive())
}

/// `GET /`
async fn root() -> Json<Value> {
  Json(json!({
    "message": format!("Welcome to the {PROJECT_NAME} API"),
    "api_prefix": API_PREFIX,
  }))
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use registrar_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  async fn test_app() -> Router {
    app(Arc::new(SqliteStore::open_in_memory().await.unwrap()))
  }

  #[tokio::test]
  async fn root_returns_welcome() {
    let resp = test_app()
      .await
      .oneshot(Request::get("/").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["message"].as_str().unwrap().contains("Welcome"));
  }

  #[tokio::test]
  async fn api_is_nested_under_prefix() {
    let app = test_app().await;
    let resp = app
      .clone()
      .oneshot(Request::get("/api/v1/students").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
      .oneshot(Request::get("/students").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn cors_echoes_origin() {
    let resp = test_app()
      .await
      .oneshot(
        Request::get("/api/v1/courses")
          .header(header::ORIGIN, "http://frontend.example")
          .body(Body::empty())
          .unwrap(),
      )
      .await
      .unwrap();
    let allowed = resp
      .headers()
      .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
      .unwrap()
      .to_str()
      .unwrap();
    assert_eq!(allowed, "http://frontend.example");
  }

  #[test]
  fn config_defaults_apply_without_file() {
    let cfg = ServerConfig::load("does-not-exist.toml").unwrap();
    assert_eq!(cfg.port, 8000);
    assert_eq!(cfg.store_path, PathBuf::from("registrar.db"));
    assert_eq!(cfg.address(), format!("{}:8000", cfg.host));
  }
}
