use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::RepositoryResult;
use crate::domain::job::{Job, JobFilter};

/// Repository trait for Job postings
///
/// Every listing is ordered newest first.
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &Job) -> RepositoryResult<()>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Job>>;

    /// Jobs matching every predicate set on `filter`
    async fn search(&self, filter: &JobFilter) -> RepositoryResult<Vec<Job>>;

    /// Jobs posted by one employer
    async fn find_by_creator(&self, user_id: Uuid) -> RepositoryResult<Vec<Job>>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> RepositoryResult<Vec<Job>>;

    /// Number of jobs, optionally only those created at or after `since`
    async fn count(&self, since: Option<DateTime<Utc>>) -> RepositoryResult<u64>;
}
