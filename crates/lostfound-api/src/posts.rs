//! Handlers for `/posts` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/posts` | Full collection, newest first |
//! | `POST`   | `/posts` | Body: [`PostDraft`]; returns 201 + stored post |
//! | `GET`    | `/posts/:id` | 404 if not found |
//! | `PUT`    | `/posts/:id` | Body: [`PostDraft`]; author only; honours `If-Match` |
//! | `DELETE` | `/posts/:id` | Author only; honours `If-Match` |
//! | `POST`   | `/posts/:id/resolve` | Author only; honours `If-Match` |
//!
//! Single-post responses carry an `ETag` header.

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
};
use lostfound_core::{
  Error,
  post::{Post, PostDraft},
  store::PostStore,
  user::User,
};
use tracing::info;
use uuid::Uuid;

use crate::{
  error::ApiError,
  etag::{compute_etag, if_match_passes},
  extract::{JsonBody, PathParam},
  identity::CurrentUser,
};

/// A post as JSON with its `ETag` header.
fn tagged(status: StatusCode, post: Post) -> Response {
  let etag = compute_etag(&post);
  (status, [(header::ETAG, etag)], Json(post)).into_response()
}

/// The write guard for a change by `user` under the request's `If-Match`.
///
/// The store runs it against the current post inside the write.
fn change_guard(
  user: User,
  headers: HeaderMap,
) -> impl FnOnce(&Post) -> lostfound_core::Result<()> + Send + 'static {
  move |post| {
    if !post.is_owned_by(&user.id) {
      return Err(Error::NotOwner(post.id));
    }
    if !if_match_passes(&headers, &compute_etag(post)) {
      return Err(Error::PreconditionFailed(post.id));
    }
    Ok(())
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /posts`
pub async fn list<S: PostStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Post>>, ApiError> {
  Ok(Json(store.snapshot().await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /posts`: returns 201 + the stored [`Post`].
pub async fn create<S: PostStore>(
  State(store): State<Arc<S>>,
  CurrentUser(user): CurrentUser,
  JsonBody(draft): JsonBody<PostDraft>,
) -> Result<Response, ApiError> {
  let post = store.create(draft, user).await?;
  info!(post_id = %post.id, author = %post.author_id, "post created");
  Ok(tagged(StatusCode::CREATED, post))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /posts/:id`
pub async fn get_one<S: PostStore>(
  State(store): State<Arc<S>>,
  PathParam(id): PathParam<Uuid>,
) -> Result<Response, ApiError> {
  let post = store
    .get(id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("post {id} not found")))?;
  Ok(tagged(StatusCode::OK, post))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /posts/:id`: body is the full replacement [`PostDraft`].
pub async fn update_one<S: PostStore>(
  State(store): State<Arc<S>>,
  PathParam(id): PathParam<Uuid>,
  CurrentUser(user): CurrentUser,
  headers: HeaderMap,
  JsonBody(draft): JsonBody<PostDraft>,
) -> Result<Response, ApiError> {
  let post = store
    .update_if(id, draft, change_guard(user, headers))
    .await?;
  info!(post_id = %id, "post updated");
  Ok(tagged(StatusCode::OK, post))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /posts/:id`: returns 204.
pub async fn delete_one<S: PostStore>(
  State(store): State<Arc<S>>,
  PathParam(id): PathParam<Uuid>,
  CurrentUser(user): CurrentUser,
  headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
  store.delete_if(id, change_guard(user, headers)).await?;
  info!(post_id = %id, "post deleted");
  Ok(StatusCode::NO_CONTENT)
}

// ─── Resolve ──────────────────────────────────────────────────────────────────

/// `POST /posts/:id/resolve`: marks the item as returned to its owner.
pub async fn resolve_one<S: PostStore>(
  State(store): State<Arc<S>>,
  PathParam(id): PathParam<Uuid>,
  CurrentUser(user): CurrentUser,
  headers: HeaderMap,
) -> Result<Response, ApiError> {
  let post = store
    .mark_resolved_if(id, change_guard(user, headers))
    .await?;
  info!(post_id = %id, "post resolved");
  Ok(tagged(StatusCode::OK, post))
}
