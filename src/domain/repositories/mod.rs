// Repository ports
// Storage adapters in `infrastructure` implement these traits

pub mod application_repository;
pub mod comment_repository;
pub mod company_repository;
pub mod errors;
pub mod job_repository;
pub mod post_repository;
pub mod user_repository;

pub use application_repository::ApplicationRepository;
pub use comment_repository::CommentRepository;
pub use company_repository::CompanyRepository;
pub use errors::{RepositoryError, RepositoryResult};
pub use job_repository::JobRepository;
pub use post_repository::PostRepository;
pub use user_repository::UserRepository;
