//! JSON REST API for the Lost & Found board.
//!
//! Exposes an axum [`Router`] backed by any [`lostfound_core::store::PostStore`].
//! Identity arrives in trusted headers (see [`identity`]); TLS and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", lostfound_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod etag;
pub mod extract;
pub mod identity;
pub mod posts;
pub mod search;

use std::sync::Arc;

use axum::{
  Json, Router,
  routing::{get, post},
};
use lostfound_core::store::PostStore;
use serde_json::{Value, json};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: PostStore + 'static,
{
  Router::new()
    // Posts
    .route("/posts", get(posts::list::<S>).post(posts::create::<S>))
    .route(
      "/posts/{id}",
      get(posts::get_one::<S>)
        .put(posts::update_one::<S>)
        .delete(posts::delete_one::<S>),
    )
    .route("/posts/{id}/resolve", post(posts::resolve_one::<S>))
    // Search
    .route("/search", get(search::handler::<S>))
    .route("/health", get(health))
    .with_state(store)
}

/// `GET /health`
async fn health() -> Json<Value> {
  Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use chrono::{TimeZone, Utc};
  use lostfound_core::{clock::FixedClock, post::Post};
  use lostfound_store_memory::MemoryStore;
  use serde_json::Value;
  use tower::ServiceExt as _;

  use super::*;
  use crate::identity::{USER_EMAIL_HEADER, USER_ID_HEADER, USER_NAME_HEADER};

  type Store = MemoryStore<FixedClock>;

  fn store() -> Arc<Store> {
    Arc::new(MemoryStore::with_clock(FixedClock(
      Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap(),
    )))
  }

  async fn send(
    store: Arc<Store>,
    method: &str,
    uri: &str,
    user: Option<(&str, &str)>,
    extra: Vec<(header::HeaderName, &str)>,
    body: Option<Value>,
  ) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((id, name)) = user {
      builder = builder
        .header(USER_ID_HEADER, id)
        .header(USER_NAME_HEADER, name)
        .header(USER_EMAIL_HEADER, format!("{id}@example.com"));
    }
    for (k, v) in extra {
      builder = builder.header(k, v);
    }
    let req = match body {
      Some(json) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    api_router(store).oneshot(req).await.unwrap()
  }

  async fn json_body(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  fn draft(title: &str, category: &str, post_type: &str) -> Value {
    json!({
      "type": post_type,
      "category": category,
      "title": title,
      "description": format!("{title} description"),
      "location": "Library",
      "date": "2024-06-01",
      "images": []
    })
  }

  const ALICE: Option<(&str, &str)> = Some(("u1", "Alice"));
  const BOB: Option<(&str, &str)> = Some(("u2", "Bob"));

  async fn create(store: &Arc<Store>, title: &str) -> Post {
    let resp = send(
      store.clone(),
      "POST",
      "/posts",
      ALICE,
      vec![],
      Some(draft(title, "card", "lost")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    serde_json::from_value(json_body(resp).await).unwrap()
  }

  // ── Create ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_returns_201_with_etag_and_author() {
    let s = store();
    let resp = send(
      s.clone(),
      "POST",
      "/posts",
      ALICE,
      vec![],
      Some(draft("Blue Wallet", "card", "lost")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert!(resp.headers().contains_key(header::ETAG));

    let body = json_body(resp).await;
    assert_eq!(body["authorId"], "u1");
    assert_eq!(body["authorName"], "Alice");
    assert_eq!(body["status"], "active");
    assert_eq!(s.len().await, 1);
  }

  #[tokio::test]
  async fn create_without_identity_returns_401() {
    let s = store();
    let resp = send(
      s.clone(),
      "POST",
      "/posts",
      None,
      vec![],
      Some(draft("Blue Wallet", "card", "lost")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(s.is_empty().await);
  }

  #[tokio::test]
  async fn create_invalid_draft_returns_422_with_fields() {
    let s = store();
    let mut body = draft("", "shoes", "lost");
    body["date"] = json!("2099-01-01");
    let resp = send(s.clone(), "POST", "/posts", ALICE, vec![], Some(body)).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(resp).await;
    let fields: Vec<&str> = body["fields"]
      .as_array()
      .unwrap()
      .iter()
      .map(|f| f["field"].as_str().unwrap())
      .collect();
    assert_eq!(fields, ["category", "title", "date"]);
    assert!(s.is_empty().await);
  }

  // ── Read ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_is_newest_first() {
    let s = store();
    create(&s, "First").await;
    create(&s, "Second").await;

    let resp = send(s, "GET", "/posts", None, vec![], None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body[0]["title"], "Second");
    assert_eq!(body[1]["title"], "First");
  }

  #[tokio::test]
  async fn get_missing_returns_404() {
    let uri = format!("/posts/{}", uuid::Uuid::new_v4());
    let resp = send(store(), "GET", &uri, None, vec![], None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Update ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn author_can_update() {
    let s = store();
    let post = create(&s, "Blue Wallet").await;
    let resp = send(
      s,
      "PUT",
      &format!("/posts/{}", post.id),
      ALICE,
      vec![],
      Some(draft("Green Wallet", "card", "found")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["title"], "Green Wallet");
    assert_eq!(body["type"], "found");
    assert_eq!(body["id"], post.id.to_string());
  }

  #[tokio::test]
  async fn other_user_cannot_update() {
    let s = store();
    let post = create(&s, "Blue Wallet").await;
    let resp = send(
      s.clone(),
      "PUT",
      &format!("/posts/{}", post.id),
      BOB,
      vec![],
      Some(draft("Mine now", "card", "found")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(s.get(post.id).await.unwrap().unwrap().title, "Blue Wallet");
  }

  #[tokio::test]
  async fn update_with_stale_if_match_returns_412() {
    let s = store();
    let post = create(&s, "Blue Wallet").await;
    let resp = send(
      s,
      "PUT",
      &format!("/posts/{}", post.id),
      ALICE,
      vec![(header::IF_MATCH, "\"stale\"")],
      Some(draft("Green Wallet", "card", "found")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::PRECONDITION_FAILED);
  }

  #[tokio::test]
  async fn update_with_current_if_match_succeeds() {
    let s = store();
    let post = create(&s, "Blue Wallet").await;
    let etag = etag::compute_etag(&post);
    let resp = send(
      s,
      "PUT",
      &format!("/posts/{}", post.id),
      ALICE,
      vec![(header::IF_MATCH, etag.as_str())],
      Some(draft("Green Wallet", "card", "found")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let new_etag = resp.headers().get(header::ETAG).unwrap().to_str().unwrap();
    assert_ne!(new_etag, etag);
  }

  #[tokio::test]
  async fn concurrent_updates_with_one_etag_let_only_one_through() {
    let s = store();
    let post = create(&s, "Blue Wallet").await;
    let etag = etag::compute_etag(&post);
    let uri = format!("/posts/{}", post.id);

    let (first, second) = tokio::join!(
      send(
        s.clone(),
        "PUT",
        &uri,
        ALICE,
        vec![(header::IF_MATCH, etag.as_str())],
        Some(draft("Green Wallet", "card", "lost")),
      ),
      send(
        s.clone(),
        "PUT",
        &uri,
        ALICE,
        vec![(header::IF_MATCH, etag.as_str())],
        Some(draft("Red Wallet", "card", "lost")),
      ),
    );

    let mut statuses = [first.status(), second.status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::PRECONDITION_FAILED]);

    let winner = if first.status() == StatusCode::OK { first } else { second };
    let title = json_body(winner).await["title"].clone();
    assert_eq!(s.get(post.id).await.unwrap().unwrap().title, title);
  }

  #[tokio::test]
  async fn stale_if_match_on_delete_and_resolve_returns_412() {
    let s = store();
    let post = create(&s, "Blue Wallet").await;
    let stale = vec![(header::IF_MATCH, "\"stale\"")];

    let uri = format!("/posts/{}/resolve", post.id);
    let resp = send(s.clone(), "POST", &uri, ALICE, stale.clone(), None).await;
    assert_eq!(resp.status(), StatusCode::PRECONDITION_FAILED);

    let uri = format!("/posts/{}", post.id);
    let resp = send(s.clone(), "DELETE", &uri, ALICE, stale, None).await;
    assert_eq!(resp.status(), StatusCode::PRECONDITION_FAILED);
    assert_eq!(s.get(post.id).await.unwrap(), Some(post));
  }

  // ── Malformed requests ──────────────────────────────────────────────────────

  #[tokio::test]
  async fn non_uuid_id_returns_400_json() {
    let resp = send(store(), "GET", "/posts/abc", None, vec![], None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(resp).await["error"].is_string());
  }

  #[tokio::test]
  async fn malformed_body_returns_400_json() {
    let s = store();
    let req = Request::builder()
      .method("POST")
      .uri("/posts")
      .header(USER_ID_HEADER, "u1")
      .header(USER_NAME_HEADER, "Alice")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{\"title\": "))
      .unwrap();
    let resp = api_router(s.clone()).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(resp).await["error"].is_string());
    assert!(s.is_empty().await);
  }

  #[tokio::test]
  async fn body_without_json_content_type_returns_400_json() {
    let req = Request::builder()
      .method("POST")
      .uri("/posts")
      .header(USER_ID_HEADER, "u1")
      .header(USER_NAME_HEADER, "Alice")
      .body(Body::from(draft("Blue Wallet", "card", "lost").to_string()))
      .unwrap();
    let resp = api_router(store()).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(resp).await["error"].is_string());
  }

  // ── Delete ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_then_get_returns_404() {
    let s = store();
    let post = create(&s, "Blue Wallet").await;
    let uri = format!("/posts/{}", post.id);

    let resp = send(s.clone(), "DELETE", &uri, ALICE, vec![], None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(s.clone(), "GET", &uri, None, vec![], None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(s, "DELETE", &uri, ALICE, vec![], None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn other_user_cannot_delete() {
    let s = store();
    let post = create(&s, "Blue Wallet").await;
    let resp = send(
      s.clone(),
      "DELETE",
      &format!("/posts/{}", post.id),
      BOB,
      vec![],
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(s.len().await, 1);
  }

  // ── Resolve ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn author_can_resolve() {
    let s = store();
    let post = create(&s, "Blue Wallet").await;
    let resp = send(
      s,
      "POST",
      &format!("/posts/{}/resolve", post.id),
      ALICE,
      vec![],
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["status"], "resolved");
  }

  // ── Search ──────────────────────────────────────────────────────────────────

  async fn seed_search(s: &Arc<Store>) {
    for (title, category, post_type) in [
      ("Blue Wallet", "card", "lost"),
      ("Laptop Charger", "it", "found"),
    ] {
      let resp = send(
        s.clone(),
        "POST",
        "/posts",
        ALICE,
        vec![],
        Some(draft(title, category, post_type)),
      )
      .await;
      assert_eq!(resp.status(), StatusCode::CREATED);
    }
  }

  async fn search_titles(s: &Arc<Store>, query: &str) -> Vec<String> {
    let resp =
      send(s.clone(), "GET", &format!("/search{query}"), None, vec![], None)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    json_body(resp).await["posts"]
      .as_array()
      .unwrap()
      .iter()
      .map(|p| p["title"].as_str().unwrap().to_owned())
      .collect()
  }

  #[tokio::test]
  async fn search_params_drive_the_filter() {
    let s = store();
    seed_search(&s).await;

    assert_eq!(search_titles(&s, "?text=WALLET").await, ["Blue Wallet"]);
    assert_eq!(search_titles(&s, "?category=it").await, ["Laptop Charger"]);
    assert_eq!(
      search_titles(&s, "?type=found&category=all").await,
      ["Laptop Charger"]
    );
    assert_eq!(search_titles(&s, "").await, ["Laptop Charger", "Blue Wallet"]);
    assert!(search_titles(&s, "?text=wallet&type=found").await.is_empty());
  }

  #[tokio::test]
  async fn search_reports_whether_the_query_was_unfiltered() {
    let s = store();
    let resp = send(s.clone(), "GET", "/search", None, vec![], None).await;
    let body = json_body(resp).await;
    assert_eq!(body["unfiltered"], true);
    assert!(body["posts"].as_array().unwrap().is_empty());

    seed_search(&s).await;
    let resp =
      send(s, "GET", "/search?text=umbrella&category=all", None, vec![], None)
        .await;
    let body = json_body(resp).await;
    assert_eq!(body["unfiltered"], false);
    assert!(body["posts"].as_array().unwrap().is_empty());
  }

  #[tokio::test]
  async fn search_with_unknown_category_returns_422() {
    let resp =
      send(store(), "GET", "/search?category=shoes", None, vec![], None).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
  }

  #[tokio::test]
  async fn health_is_ok() {
    let resp = send(store(), "GET", "/health", None, vec![], None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["status"], "ok");
  }
}
