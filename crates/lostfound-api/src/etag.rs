//! ETag computation and `If-Match` evaluation for post resources.
//!
//! An ETag is a SHA-256 hash over the post's JSON form, so any change to a
//! stored field (including status) produces a new tag.

use axum::http::{HeaderMap, header};
use lostfound_core::post::Post;
use sha2::{Digest, Sha256};

/// Compute a quoted ETag for `post`.
pub fn compute_etag(post: &Post) -> String {
  // Serialising a `Post` cannot fail: every field is a plain value type.
  let bytes = serde_json::to_vec(post).unwrap_or_default();
  let hash = Sha256::digest(&bytes);
  format!("\"{}\"", hex::encode(hash))
}

/// Whether the request's `If-Match` header (if any) admits `current`.
///
/// A missing header always passes. `*` matches any existing resource. Tags
/// are compared with or without their surrounding quotes, since some clients
/// send them bare.
pub fn if_match_passes(headers: &HeaderMap, current: &str) -> bool {
  let Some(value) = headers.get(header::IF_MATCH) else {
    return true;
  };
  let Ok(value) = value.to_str() else {
    return false;
  };
  let current = strip_etag_quotes(current);
  value.split(',').map(str::trim).any(|candidate| {
    candidate == "*" || strip_etag_quotes(candidate) == current
  })
}

fn strip_etag_quotes(s: &str) -> &str { s.trim_matches('"') }
