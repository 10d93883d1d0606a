// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod in_memory;
pub mod postgres_application_repository;
pub mod postgres_comment_repository;
pub mod postgres_company_repository;
pub mod postgres_job_repository;
pub mod postgres_post_repository;
pub mod postgres_user_repository;

pub use in_memory::{
    InMemoryApplicationRepository, InMemoryCommentRepository, InMemoryCompanyRepository,
    InMemoryJobRepository, InMemoryPostRepository, InMemoryUserRepository,
};
pub use postgres_application_repository::PostgresApplicationRepository;
pub use postgres_comment_repository::PostgresCommentRepository;
pub use postgres_company_repository::PostgresCompanyRepository;
pub use postgres_job_repository::PostgresJobRepository;
pub use postgres_post_repository::PostgresPostRepository;
pub use postgres_user_repository::PostgresUserRepository;

use uuid::Uuid;

use crate::domain::repositories::RepositoryError;

/// Maps a unique-constraint violation to `Conflict`, anything else to `Database`
pub(crate) fn conflict_or_database(err: sqlx::Error, message: &str) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            RepositoryError::Conflict(message.to_string())
        }
        _ => RepositoryError::from(err),
    }
}

/// Maps a foreign-key violation to `NotFound` for the referenced parent row
pub(crate) fn missing_parent_or_database(
    err: sqlx::Error,
    entity: &'static str,
    id: Uuid,
) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            RepositoryError::not_found(entity, id)
        }
        _ => RepositoryError::from(err),
    }
}
