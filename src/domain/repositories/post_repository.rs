use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryResult;
use crate::domain::post::Post;

/// Repository trait for community Posts and their likes
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: &Post) -> RepositoryResult<()>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Post>>;

    /// Whole feed, newest first
    async fn find_all(&self) -> RepositoryResult<Vec<Post>>;

    /// Persist edited content and image
    async fn update(&self, post: &Post) -> RepositoryResult<()>;

    /// Remove a post together with its likes
    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;

    /// Like the post as `user_id`, or unlike if already liked
    ///
    /// Returns the resulting likes in the order they were given.
    async fn toggle_like(&self, post_id: Uuid, user_id: Uuid) -> RepositoryResult<Vec<Uuid>>;
}
