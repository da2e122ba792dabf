use async_trait::async_trait;

use crate::domain::{NewPost, Post};
use crate::error::RepoError;

/// Post repository - the relational store collaborator.
///
/// The store owns id assignment and timestamp maintenance: `insert` allocates
/// a fresh id and stamps both timestamps, `update` bumps `updated_at`.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a new post and return it with its store-assigned id.
    async fn insert(&self, draft: NewPost) -> Result<Post, RepoError>;

    /// Find a post by its unique id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError>;

    /// Enumerate all posts in insertion order (ascending id).
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Retitle an existing post. Fails with `RepoError::NotFound` if the id
    /// is absent.
    async fn update(&self, id: i64, draft: NewPost) -> Result<Post, RepoError>;

    /// Remove a post. Fails with `RepoError::NotFound` if the id is absent.
    async fn delete(&self, id: i64) -> Result<(), RepoError>;
}
