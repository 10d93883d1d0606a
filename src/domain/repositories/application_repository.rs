use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryResult;
use crate::domain::application::{Application, ApplicationStatus};

/// Repository trait for job Applications
///
/// Listings are ordered newest first.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Insert an application
    ///
    /// Returns `Conflict` when the applicant already applied to the job.
    /// The check and insert are atomic.
    async fn create(&self, application: &Application) -> RepositoryResult<()>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Application>>;

    async fn find_by_job(&self, job_id: Uuid) -> RepositoryResult<Vec<Application>>;

    async fn find_by_applicant(&self, applicant_id: Uuid) -> RepositoryResult<Vec<Application>>;

    /// Applications to any of the given jobs
    async fn find_by_jobs(&self, job_ids: &[Uuid]) -> RepositoryResult<Vec<Application>>;

    /// Set the status and return the updated application
    async fn update_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> RepositoryResult<Application>;
}
