use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::job::{Job, JobFilter, JobType};
use crate::domain::repositories::{JobRepository, RepositoryResult};

const JOB_COLUMNS: &str = "id, title, description, salary, location, job_type, company_name, \
     created_by, company_id, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct JobRow {
    id: Uuid,
    title: String,
    description: String,
    salary: String,
    location: String,
    job_type: JobType,
    company_name: String,
    created_by: Uuid,
    company_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<JobRow> for Job {
    fn from(r: JobRow) -> Self {
        Job::from_persistence(
            r.id,
            r.title,
            r.description,
            r.salary,
            r.location,
            r.job_type,
            r.company_name,
            r.created_by,
            r.company_id,
            r.created_at,
            r.updated_at,
        )
    }
}

/// PostgreSQL implementation of JobRepository
///
/// Search predicates are assembled with `QueryBuilder` so only the filters
/// actually supplied reach the query.
pub struct PostgresJobRepository {
    pool: PgPool,
}

impl PostgresJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PostgresJobRepository {
    async fn create(&self, job: &Job) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO jobs (
                id, title, description, salary, location, job_type, company_name,
                created_by, company_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(job.id())
        .bind(job.title())
        .bind(job.description())
        .bind(job.salary())
        .bind(job.location())
        .bind(job.job_type())
        .bind(job.company_name())
        .bind(job.created_by())
        .bind(job.company())
        .bind(job.created_at())
        .bind(job.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Job>> {
        let sql = format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS);
        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Job::from))
    }

    async fn search(&self, filter: &JobFilter) -> RepositoryResult<Vec<Job>> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM jobs WHERE TRUE", JOB_COLUMNS));

        if let Some(keyword) = &filter.keyword {
            query
                .push(" AND (strpos(lower(title), lower(")
                .push_bind(keyword.clone())
                .push(")) > 0 OR strpos(lower(description), lower(")
                .push_bind(keyword.clone())
                .push(")) > 0)");
        }

        if let Some(location) = &filter.location {
            query
                .push(" AND strpos(lower(location), lower(")
                .push_bind(location.clone())
                .push(")) > 0");
        }

        if let Some(job_type) = filter.job_type {
            query.push(" AND job_type = ").push_bind(job_type);
        }

        if let Some(company) = filter.company {
            query.push(" AND company_id = ").push_bind(company);
        }

        query.push(" ORDER BY created_at DESC");

        let rows = query
            .build_query_as::<JobRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Job::from).collect())
    }

    async fn find_by_creator(&self, user_id: Uuid) -> RepositoryResult<Vec<Job>> {
        let sql = format!(
            "SELECT {} FROM jobs WHERE created_by = $1 ORDER BY created_at DESC",
            JOB_COLUMNS
        );
        let rows = sqlx::query_as::<_, JobRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Job::from).collect())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> RepositoryResult<Vec<Job>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!("SELECT {} FROM jobs WHERE id = ANY($1)", JOB_COLUMNS);
        let rows = sqlx::query_as::<_, JobRow>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Job::from).collect())
    }

    async fn count(&self, since: Option<DateTime<Utc>>) -> RepositoryResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM jobs WHERE $1::timestamptz IS NULL OR created_at >= $1",
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.max(0) as u64)
    }
}
