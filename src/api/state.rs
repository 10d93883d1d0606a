use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::domain::repositories::{
    ApplicationRepository, CommentRepository, CompanyRepository, JobRepository, PostRepository,
    UserRepository,
};
use crate::infrastructure::repositories::{
    InMemoryApplicationRepository, InMemoryCommentRepository, InMemoryCompanyRepository,
    InMemoryJobRepository, InMemoryPostRepository, InMemoryUserRepository,
    PostgresApplicationRepository, PostgresCommentRepository, PostgresCompanyRepository,
    PostgresJobRepository, PostgresPostRepository, PostgresUserRepository,
};

/// Shared handler state: one repository per entity plus configuration
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub companies: Arc<dyn CompanyRepository>,
    pub jobs: Arc<dyn JobRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub config: Arc<Config>,
}

impl AppState {
    /// State backed by PostgreSQL repositories sharing one pool
    pub fn postgres(pool: PgPool, config: Config) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            companies: Arc::new(PostgresCompanyRepository::new(pool.clone())),
            jobs: Arc::new(PostgresJobRepository::new(pool.clone())),
            applications: Arc::new(PostgresApplicationRepository::new(pool.clone())),
            posts: Arc::new(PostgresPostRepository::new(pool.clone())),
            comments: Arc::new(PostgresCommentRepository::new(pool)),
            config: Arc::new(config),
        }
    }

    /// State backed by process-local maps; data is lost on restart
    pub fn in_memory(config: Config) -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            companies: Arc::new(InMemoryCompanyRepository::new()),
            jobs: Arc::new(InMemoryJobRepository::new()),
            applications: Arc::new(InMemoryApplicationRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            config: Arc::new(config),
        }
    }
}
