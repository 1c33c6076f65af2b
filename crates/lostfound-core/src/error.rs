//! Error types for `lostfound-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("post not found: {0}")]
  NotFound(Uuid),

  /// A write guard refused the change because the caller does not own it.
  #[error("post {0} belongs to another user")]
  NotOwner(Uuid),

  /// A write guard refused the change because the post has moved on.
  #[error("precondition failed for post {0}")]
  PreconditionFailed(Uuid),

  /// Failure inside a storage backend. Backends must report a write as either
  /// fully applied or not applied at all.
  #[error("backend error: {0}")]
  Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn is_not_found(&self) -> bool { matches!(self, Self::NotFound(_)) }

  pub fn is_validation(&self) -> bool { matches!(self, Self::Validation(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
