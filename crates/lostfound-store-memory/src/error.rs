//! Error type for seeding a `MemoryStore`.
//!
//! Runtime operations report [`lostfound_core::Error`]; this type only covers
//! loading an initial collection.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("duplicate post id in seed: {0}")]
  DuplicateId(Uuid),

  #[error("post {id} has {count} images, at most {max} allowed")]
  TooManyImages { id: Uuid, count: usize, max: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
