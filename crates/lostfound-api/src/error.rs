//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use lostfound_core::validation::ValidationError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error(transparent)]
  Validation(ValidationError),

  #[error("unauthorized: {0}")]
  Unauthorized(String),

  #[error("forbidden: {0}")]
  Forbidden(String),

  #[error("precondition failed")]
  PreconditionFailed,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<lostfound_core::Error> for ApiError {
  fn from(e: lostfound_core::Error) -> Self {
    match e {
      lostfound_core::Error::Validation(v) => ApiError::Validation(v),
      lostfound_core::Error::NotFound(id) => {
        ApiError::NotFound(format!("post {id} not found"))
      }
      lostfound_core::Error::NotOwner(id) => {
        ApiError::Forbidden(format!("post {id} belongs to another user"))
      }
      lostfound_core::Error::PreconditionFailed(_) => {
        ApiError::PreconditionFailed
      }
      lostfound_core::Error::Backend(e) => ApiError::Store(e),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, json!({ "error": m })),
      ApiError::BadRequest(m) => {
        (StatusCode::BAD_REQUEST, json!({ "error": m }))
      }
      ApiError::Validation(v) => (
        StatusCode::UNPROCESSABLE_ENTITY,
        json!({ "error": v.to_string(), "fields": v.fields }),
      ),
      ApiError::Unauthorized(m) => {
        (StatusCode::UNAUTHORIZED, json!({ "error": m }))
      }
      ApiError::Forbidden(m) => (StatusCode::FORBIDDEN, json!({ "error": m })),
      ApiError::PreconditionFailed => (
        StatusCode::PRECONDITION_FAILED,
        json!({ "error": self.to_string() }),
      ),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          json!({ "error": e.to_string() }),
        )
      }
    };
    (status, Json(body)).into_response()
  }
}
