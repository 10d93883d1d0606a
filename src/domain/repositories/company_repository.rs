use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryResult;
use crate::domain::company::Company;

/// Repository trait for Company profiles
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Create a company; `Conflict` if the name is taken
    async fn create(&self, company: &Company) -> RepositoryResult<()>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Company>>;

    /// All companies, newest first
    async fn find_all(&self) -> RepositoryResult<Vec<Company>>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> RepositoryResult<Vec<Company>>;
}
