//! Trusted-header identity extractor.
//!
//! The API does not authenticate anyone. A fronting proxy (or a test) is
//! expected to set the acting user's identity on each request:
//!
//! | Header | Required |
//! |--------|----------|
//! | `x-user-id` | yes |
//! | `x-user-name` | yes |
//! | `x-user-email` | no |

use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, request::Parts},
};
use lostfound_core::user::User;

use crate::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_NAME_HEADER: &str = "x-user-name";
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// The user on whose behalf the request is made.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Resolve the acting user from request headers.
pub fn user_from_headers(headers: &HeaderMap) -> Result<User, ApiError> {
  let id = required(headers, USER_ID_HEADER)?;
  let name = required(headers, USER_NAME_HEADER)?;
  let email = optional(headers, USER_EMAIL_HEADER).unwrap_or_default();
  Ok(User::new(id, name, email))
}

fn required(headers: &HeaderMap, name: &str) -> Result<String, ApiError> {
  optional(headers, name)
    .ok_or_else(|| ApiError::Unauthorized(format!("missing {name} header")))
}

fn optional(headers: &HeaderMap, name: &str) -> Option<String> {
  headers
    .get(name)
    .and_then(|v| v.to_str().ok())
    .map(str::trim)
    .filter(|v| !v.is_empty())
    .map(str::to_owned)
}

impl<S> FromRequestParts<S> for CurrentUser
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &S,
  ) -> Result<Self, Self::Rejection> {
    user_from_headers(&parts.headers).map(CurrentUser)
  }
}

#[cfg(test)]
mod tests {
  use axum::http::Request;

  use super::*;

  async fn extract(req: Request<()>) -> Result<CurrentUser, ApiError> {
    let (mut parts, _) = req.into_parts();
    CurrentUser::from_request_parts(&mut parts, &()).await
  }

  #[tokio::test]
  async fn full_identity() {
    let req = Request::builder()
      .header(USER_ID_HEADER, "u1")
      .header(USER_NAME_HEADER, "Alice")
      .header(USER_EMAIL_HEADER, "alice@example.com")
      .body(())
      .unwrap();
    let CurrentUser(user) = extract(req).await.unwrap();
    assert_eq!(user, User::new("u1", "Alice", "alice@example.com"));
  }

  #[tokio::test]
  async fn email_is_optional() {
    let req = Request::builder()
      .header(USER_ID_HEADER, "u1")
      .header(USER_NAME_HEADER, "Alice")
      .body(())
      .unwrap();
    let CurrentUser(user) = extract(req).await.unwrap();
    assert_eq!(user.email, "");
  }

  #[tokio::test]
  async fn missing_id() {
    let req = Request::builder()
      .header(USER_NAME_HEADER, "Alice")
      .body(())
      .unwrap();
    assert!(matches!(extract(req).await, Err(ApiError::Unauthorized(_))));
  }

  #[tokio::test]
  async fn blank_name() {
    let req = Request::builder()
      .header(USER_ID_HEADER, "u1")
      .header(USER_NAME_HEADER, "   ")
      .body(())
      .unwrap();
    assert!(matches!(extract(req).await, Err(ApiError::Unauthorized(_))));
  }
}
