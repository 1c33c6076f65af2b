//! [`MemoryStore`]: the in-memory implementation of [`PostStore`].

use std::{collections::HashSet, sync::Arc};

use lostfound_core::{
  clock::{Clock, SystemClock},
  post::{MAX_IMAGES, Post, PostDraft, PostStatus},
  store::PostStore,
  user::User,
};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A post store held entirely in process memory.
///
/// Cloning is cheap: clones share the same collection.
pub struct MemoryStore<C = SystemClock> {
  posts: Arc<RwLock<Vec<Post>>>,
  clock: Arc<C>,
}

impl<C> Clone for MemoryStore<C> {
  fn clone(&self) -> Self {
    Self {
      posts: Arc::clone(&self.posts),
      clock: Arc::clone(&self.clock),
    }
  }
}

impl MemoryStore {
  /// An empty store on the system clock.
  pub fn new() -> Self { Self::with_clock(SystemClock) }
}

impl Default for MemoryStore {
  fn default() -> Self { Self::new() }
}

impl<C: Clock> MemoryStore<C> {
  /// An empty store on the given clock.
  pub fn with_clock(clock: C) -> Self {
    Self {
      posts: Arc::new(RwLock::new(Vec::new())),
      clock: Arc::new(clock),
    }
  }

  /// A store pre-populated with `posts`.
  ///
  /// The seed is ordered newest first by `created_at`; posts sharing a
  /// timestamp keep their given order. Duplicate ids and oversized image
  /// lists are rejected.
  pub fn with_posts(clock: C, mut posts: Vec<Post>) -> Result<Self> {
    let mut seen = HashSet::with_capacity(posts.len());
    for post in &posts {
      if !seen.insert(post.id) {
        return Err(Error::DuplicateId(post.id));
      }
      if post.images.len() > MAX_IMAGES {
        return Err(Error::TooManyImages {
          id:    post.id,
          count: post.images.len(),
          max:   MAX_IMAGES,
        });
      }
    }
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    debug!(count = posts.len(), "seeded post store");
    Ok(Self {
      posts: Arc::new(RwLock::new(posts)),
      clock: Arc::new(clock),
    })
  }

  /// A store pre-populated from a JSON array of posts.
  pub fn from_json(clock: C, json: &str) -> Result<Self> {
    let posts: Vec<Post> = serde_json::from_str(json)?;
    Self::with_posts(clock, posts)
  }

  pub async fn len(&self) -> usize { self.posts.read().await.len() }

  pub async fn is_empty(&self) -> bool { self.posts.read().await.is_empty() }
}

// ─── PostStore impl ──────────────────────────────────────────────────────────

impl<C: Clock + 'static> PostStore for MemoryStore<C> {
  async fn create(
    &self,
    draft: PostDraft,
    author: User,
  ) -> lostfound_core::Result<Post> {
    // The clock is read under the write lock so that insertion order and
    // `created_at` order agree.
    let mut posts = self.posts.write().await;
    let fields = draft.validate(self.clock.today())?;
    let post = Post::new(Uuid::new_v4(), fields, &author, self.clock.now());

    posts.insert(0, post.clone());
    debug!(post_id = %post.id, total = posts.len(), "post created");
    Ok(post)
  }

  async fn update_if<G>(
    &self,
    id: Uuid,
    draft: PostDraft,
    guard: G,
  ) -> lostfound_core::Result<Post>
  where
    G: FnOnce(&Post) -> lostfound_core::Result<()> + Send + 'static,
  {
    let mut posts = self.posts.write().await;
    let post = posts
      .iter_mut()
      .find(|p| p.id == id)
      .ok_or(lostfound_core::Error::NotFound(id))?;
    guard(post)?;

    let fields = draft.validate(self.clock.today())?;
    post.apply(fields);
    debug!(post_id = %id, "post updated");
    Ok(post.clone())
  }

  async fn delete_if<G>(&self, id: Uuid, guard: G) -> lostfound_core::Result<()>
  where
    G: FnOnce(&Post) -> lostfound_core::Result<()> + Send + 'static,
  {
    let mut posts = self.posts.write().await;
    let index = posts
      .iter()
      .position(|p| p.id == id)
      .ok_or(lostfound_core::Error::NotFound(id))?;
    guard(&posts[index])?;

    posts.remove(index);
    debug!(post_id = %id, total = posts.len(), "post deleted");
    Ok(())
  }

  async fn mark_resolved_if<G>(
    &self,
    id: Uuid,
    guard: G,
  ) -> lostfound_core::Result<Post>
  where
    G: FnOnce(&Post) -> lostfound_core::Result<()> + Send + 'static,
  {
    let mut posts = self.posts.write().await;
    let post = posts
      .iter_mut()
      .find(|p| p.id == id)
      .ok_or(lostfound_core::Error::NotFound(id))?;
    guard(post)?;

    if post.status.is_active() {
      post.status = PostStatus::Resolved;
      debug!(post_id = %id, "post resolved");
    }
    Ok(post.clone())
  }

  async fn get(&self, id: Uuid) -> lostfound_core::Result<Option<Post>> {
    let posts = self.posts.read().await;
    Ok(posts.iter().find(|p| p.id == id).cloned())
  }

  async fn snapshot(&self) -> lostfound_core::Result<Vec<Post>> {
    Ok(self.posts.read().await.clone())
  }
}
