use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryResult;
use crate::domain::comment::Comment;

/// Repository trait for Comments on posts
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: &Comment) -> RepositoryResult<()>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Comment>>;

    /// Comments on one post, newest first
    async fn find_by_post(&self, post_id: Uuid) -> RepositoryResult<Vec<Comment>>;

    /// Comment count per post; posts without comments are absent
    async fn count_by_posts(&self, post_ids: &[Uuid]) -> RepositoryResult<HashMap<Uuid, u64>>;

    async fn update(&self, comment: &Comment) -> RepositoryResult<()>;

    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;

    /// Remove every comment on a post, returning how many were removed
    async fn delete_by_post(&self, post_id: Uuid) -> RepositoryResult<u64>;
}
