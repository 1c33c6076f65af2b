//! The `PostStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `lostfound-store-memory`). Higher layers (`lostfound-api`) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  Result,
  post::{Post, PostDraft},
  query::{FilterSpec, filter},
  user::User,
};

/// Abstraction over the authoritative, newest-first post collection.
///
/// Every mutator is all-or-nothing: when it returns an error the collection
/// is exactly as it was before the call. Successful writes are visible to
/// the next [`snapshot`](PostStore::snapshot) immediately.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait PostStore: Send + Sync {
  /// Validate `draft` and insert a new active post at the front.
  ///
  /// `id` and `created_at` are assigned by the store; the author fields are
  /// copied from `author`.
  fn create(
    &self,
    draft: PostDraft,
    author: User,
  ) -> impl Future<Output = Result<Post>> + Send + '_;

  /// Replace the editable fields of post `id` with a validated `draft`.
  ///
  /// Identity, author, `created_at`, status and position are preserved.
  fn update(
    &self,
    id: Uuid,
    draft: PostDraft,
  ) -> impl Future<Output = Result<Post>> + Send + '_ {
    self.update_if(id, draft, accept)
  }

  /// Remove post `id` permanently.
  fn delete(&self, id: Uuid) -> impl Future<Output = Result<()>> + Send + '_ {
    self.delete_if(id, accept)
  }

  /// Mark post `id` as resolved. Resolving a resolved post is a no-op.
  fn mark_resolved(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Post>> + Send + '_ {
    self.mark_resolved_if(id, accept)
  }

  // ── Guarded mutators ──────────────────────────────────────────────────────
  //
  // `guard` sees the current post and runs in the same critical section as
  // the write, after the lookup and before validation. An `Err` from the
  // guard is returned unchanged and nothing is written.

  /// [`update`](PostStore::update) behind `guard`.
  fn update_if<G>(
    &self,
    id: Uuid,
    draft: PostDraft,
    guard: G,
  ) -> impl Future<Output = Result<Post>> + Send + '_
  where
    G: FnOnce(&Post) -> Result<()> + Send + 'static;

  /// [`delete`](PostStore::delete) behind `guard`.
  fn delete_if<G>(
    &self,
    id: Uuid,
    guard: G,
  ) -> impl Future<Output = Result<()>> + Send + '_
  where
    G: FnOnce(&Post) -> Result<()> + Send + 'static;

  /// [`mark_resolved`](PostStore::mark_resolved) behind `guard`.
  fn mark_resolved_if<G>(
    &self,
    id: Uuid,
    guard: G,
  ) -> impl Future<Output = Result<Post>> + Send + '_
  where
    G: FnOnce(&Post) -> Result<()> + Send + 'static;

  /// Retrieve a post by id. Returns `None` if not found.
  fn get(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Post>>> + Send + '_;

  /// The full collection, newest first.
  fn snapshot(&self) -> impl Future<Output = Result<Vec<Post>>> + Send + '_;

  /// The posts matching `spec`, in snapshot order.
  fn search<'a>(
    &'a self,
    spec: &'a FilterSpec,
  ) -> impl Future<Output = Result<Vec<Post>>> + Send + 'a {
    async move {
      let posts = self.snapshot().await?;
      Ok(filter(&posts, spec).cloned().collect())
    }
  }
}

/// A write guard that lets every change through.
fn accept(_: &Post) -> Result<()> { Ok(()) }
