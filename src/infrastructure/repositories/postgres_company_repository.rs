use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::conflict_or_database;
use crate::domain::company::Company;
use crate::domain::repositories::{CompanyRepository, RepositoryResult};

const COMPANY_COLUMNS: &str =
    "id, name, description, website, location, logo, user_id, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct CompanyRow {
    id: Uuid,
    name: String,
    description: String,
    website: String,
    location: String,
    logo: String,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CompanyRow> for Company {
    fn from(r: CompanyRow) -> Self {
        Company {
            id: r.id,
            name: r.name,
            description: r.description,
            website: r.website,
            location: r.location,
            logo: r.logo,
            user_id: r.user_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// PostgreSQL implementation of CompanyRepository
pub struct PostgresCompanyRepository {
    pool: PgPool,
}

impl PostgresCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyRepository for PostgresCompanyRepository {
    async fn create(&self, company: &Company) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO companies (
                id, name, description, website, location, logo, user_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(company.id)
        .bind(&company.name)
        .bind(&company.description)
        .bind(&company.website)
        .bind(&company.location)
        .bind(&company.logo)
        .bind(company.user_id)
        .bind(company.created_at)
        .bind(company.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_or_database(e, "Company already exists"))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Company>> {
        let sql = format!("SELECT {} FROM companies WHERE id = $1", COMPANY_COLUMNS);
        let row = sqlx::query_as::<_, CompanyRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Company::from))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Company>> {
        let sql = format!(
            "SELECT {} FROM companies ORDER BY created_at DESC",
            COMPANY_COLUMNS
        );
        let rows = sqlx::query_as::<_, CompanyRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Company::from).collect())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> RepositoryResult<Vec<Company>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!("SELECT {} FROM companies WHERE id = ANY($1)", COMPANY_COLUMNS);
        let rows = sqlx::query_as::<_, CompanyRow>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Company::from).collect())
    }
}
