pub mod applications;
pub mod auth;
pub mod comments;
pub mod companies;
pub mod health;
pub mod jobs;
pub mod posts;

use uuid::Uuid;

use crate::api::errors::{ApiError, ApiResult};

/// Parses a path id; anything that is not a UUID cannot name a record
pub(crate) fn parse_id(raw: &str, entity: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found(format!("{} not found", entity)))
}
