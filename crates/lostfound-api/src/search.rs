//! Handler for `GET /search`.
//!
//! Query params map to [`FilterSpec`] fields. `category` and `type` accept
//! `all` (or nothing) for "no restriction".
//!
//! The response wraps the matches with an `unfiltered` flag so a client can
//! tell "nothing posted yet" apart from "nothing matched".

use std::sync::Arc;

use axum::{Json, extract::State};
use lostfound_core::{
  post::Post,
  query::{ALL, FilterSpec},
  store::PostStore,
};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extract::QueryParams};

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
  /// Free text matched against title, description and location.
  pub text:      Option<String>,
  pub category:  Option<String>,
  #[serde(rename = "type")]
  pub post_type: Option<String>,
}

impl SearchParams {
  pub fn into_spec(self) -> Result<FilterSpec, ApiError> {
    FilterSpec::parse(
      self.text.unwrap_or_default(),
      self.category.as_deref().unwrap_or(ALL),
      self.post_type.as_deref().unwrap_or(ALL),
    )
    .map_err(ApiError::Validation)
  }
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
  /// Matches in newest-first order.
  pub posts:      Vec<Post>,
  /// Whether the query selected every post.
  pub unfiltered: bool,
}

/// `GET /search[?text=...][&category=...][&type=...]`
pub async fn handler<S: PostStore>(
  State(store): State<Arc<S>>,
  QueryParams(params): QueryParams<SearchParams>,
) -> Result<Json<SearchResults>, ApiError> {
  let spec = params.into_spec()?;
  let posts = store.search(&spec).await?;
  Ok(Json(SearchResults {
    posts,
    unfiltered: spec.is_unfiltered(),
  }))
}
