use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::conflict_or_database;
use crate::domain::application::{Application, ApplicationStatus};
use crate::domain::repositories::{ApplicationRepository, RepositoryError, RepositoryResult};

const APPLICATION_COLUMNS: &str = "id, job_id, applicant_id, status, cover_letter, resume_link, \
     created_at, updated_at";

#[derive(sqlx::FromRow)]
struct ApplicationRow {
    id: Uuid,
    job_id: Uuid,
    applicant_id: Uuid,
    status: ApplicationStatus,
    cover_letter: String,
    resume_link: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ApplicationRow> for Application {
    fn from(r: ApplicationRow) -> Self {
        Application {
            id: r.id,
            job: r.job_id,
            applicant: r.applicant_id,
            status: r.status,
            cover_letter: r.cover_letter,
            resume_link: r.resume_link,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// PostgreSQL implementation of ApplicationRepository
///
/// Duplicate applications are rejected by the
/// `applications_job_applicant_key` unique constraint.
pub struct PostgresApplicationRepository {
    pool: PgPool,
}

impl PostgresApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_where(&self, clause: &str, id: Uuid) -> RepositoryResult<Vec<Application>> {
        let sql = format!(
            "SELECT {} FROM applications WHERE {} = $1 ORDER BY created_at DESC",
            APPLICATION_COLUMNS, clause
        );
        let rows = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Application::from).collect())
    }
}

#[async_trait]
impl ApplicationRepository for PostgresApplicationRepository {
    async fn create(&self, application: &Application) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO applications (
                id, job_id, applicant_id, status, cover_letter, resume_link, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(application.id)
        .bind(application.job)
        .bind(application.applicant)
        .bind(application.status)
        .bind(&application.cover_letter)
        .bind(&application.resume_link)
        .bind(application.created_at)
        .bind(application.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_or_database(e, Application::DUPLICATE_MESSAGE))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Application>> {
        let sql = format!("SELECT {} FROM applications WHERE id = $1", APPLICATION_COLUMNS);
        let row = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Application::from))
    }

    async fn find_by_job(&self, job_id: Uuid) -> RepositoryResult<Vec<Application>> {
        self.fetch_where("job_id", job_id).await
    }

    async fn find_by_applicant(&self, applicant_id: Uuid) -> RepositoryResult<Vec<Application>> {
        self.fetch_where("applicant_id", applicant_id).await
    }

    async fn find_by_jobs(&self, job_ids: &[Uuid]) -> RepositoryResult<Vec<Application>> {
        if job_ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {} FROM applications WHERE job_id = ANY($1) ORDER BY created_at DESC",
            APPLICATION_COLUMNS
        );
        let rows = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(job_ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Application::from).collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> RepositoryResult<Application> {
        let sql = format!(
            "UPDATE applications SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            APPLICATION_COLUMNS
        );
        let row = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Application::from)
            .ok_or_else(|| RepositoryError::not_found("Application", id))
    }
}
