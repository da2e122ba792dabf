//! In-memory post repository - used as fallback when no database is configured.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use prensa_core::domain::{NewPost, Post};
use prensa_core::error::RepoError;
use prensa_core::ports::PostRepository;

/// In-memory post store using a BTreeMap behind an async RwLock.
///
/// The BTreeMap keeps enumeration in ascending-id order, matching the
/// Postgres repository. The id counter is monotonic, so ids are never
/// reused after a delete. Note: data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<BTreeMap<i64, Post>>,
    next_id: AtomicI64,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, draft: NewPost) -> Result<Post, RepoError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let post = Post {
            id,
            title: draft.into_title(),
            created_at: now,
            updated_at: now,
        };

        let mut store = self.store.write().await;
        store.insert(id, post.clone());

        Ok(post)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().cloned().collect())
    }

    async fn update(&self, id: i64, draft: NewPost) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let post = store.get_mut(&id).ok_or(RepoError::NotFound)?;

        post.title = draft.into_title();
        post.updated_at = Utc::now();

        Ok(post.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}
