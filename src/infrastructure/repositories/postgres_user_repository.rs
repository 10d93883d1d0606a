use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::conflict_or_database;
use crate::domain::repositories::{RepositoryError, RepositoryResult, UserRepository};
use crate::domain::user::{Email, ProfileUpdate, Role, User};

const USER_COLUMNS: &str = "id, name, email, password_hash, role, profile_pic, bio, resume, \
     skills, company_name, company_website, created_at, updated_at";

const EMAIL_TAKEN: &str = "User already exists";

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    role: Role,
    profile_pic: String,
    bio: String,
    resume: String,
    skills: Vec<String>,
    company_name: String,
    company_website: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        let email = Email::new(&r.email)
            .map_err(|e| RepositoryError::Database(format!("Invalid email from database: {}", e)))?;

        Ok(User {
            id: r.id,
            name: r.name,
            email,
            password_hash: r.password_hash,
            role: r.role,
            profile_pic: r.profile_pic,
            bio: r.bio,
            resume: r.resume,
            skills: r.skills,
            company_name: r.company_name,
            company_website: r.company_website,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new PostgresUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &User) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, name, email, password_hash, role, profile_pic, bio, resume,
                skills, company_name, company_website, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(&user.profile_pic)
        .bind(&user.bio)
        .bind(&user.resume)
        .bind(&user.skills)
        .bind(&user.company_name)
        .bind(&user.company_website)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_or_database(e, EMAIL_TAKEN))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> RepositoryResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> RepositoryResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!("SELECT {} FROM users WHERE id = ANY($1)", USER_COLUMNS);
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn update_profile(&self, id: Uuid, changes: &ProfileUpdate) -> RepositoryResult<User> {
        // Each column keeps its stored value unless the change carries one
        let sql = format!(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                bio = COALESCE($5, bio),
                resume = COALESCE($6, resume),
                skills = COALESCE($7, skills),
                profile_pic = COALESCE($8, profile_pic),
                company_name = CASE WHEN role = 'employer'
                    THEN COALESCE($9, company_name) ELSE company_name END,
                company_website = COALESCE($10, company_website),
                updated_at = $11
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .bind(changes.name.as_deref())
            .bind(changes.email.as_ref().map(Email::as_str))
            .bind(changes.password_hash.as_deref())
            .bind(changes.bio.as_deref())
            .bind(changes.resume.as_deref())
            .bind(changes.skills.as_deref())
            .bind(changes.profile_pic.as_deref())
            .bind(changes.company_name.as_deref())
            .bind(changes.company_website.as_deref())
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| conflict_or_database(e, EMAIL_TAKEN))?
            .ok_or_else(|| RepositoryError::not_found("User", id))?;

        User::try_from(row)
    }
}
