//! Error type for `registrar-store-sqlite`.

use registrar_core::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] registrar_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),
}

impl DomainError for Error {
  fn domain(&self) -> Option<&registrar_core::Error> {
    match self {
      Error::Core(e) => Some(e),
      Error::Database(_) => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
