use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryResult;
use crate::domain::user::{Email, ProfileUpdate, User};

/// Repository trait for User accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user; `Conflict` if the email is taken
    async fn create(&self, user: &User) -> RepositoryResult<()>;

    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>>;

    /// Find a user by email address
    async fn find_by_email(&self, email: &Email) -> RepositoryResult<Option<User>>;

    /// Find every user whose ID is in `ids`
    async fn find_by_ids(&self, ids: &[Uuid]) -> RepositoryResult<Vec<User>>;

    /// Apply only the fields present in `changes` and return the stored user
    ///
    /// `Conflict` if the new email is taken, `NotFound` if the user is gone.
    async fn update_profile(&self, id: Uuid, changes: &ProfileUpdate) -> RepositoryResult<User>;
}
