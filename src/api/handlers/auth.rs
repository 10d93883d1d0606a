use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::api::errors::{ApiError, ApiResult};
use crate::api::middleware::{AuthUser, ValidatedJson};
use crate::api::state::AppState;
use crate::api::views::UserResponse;
use crate::auth::jwt::create_token;
use crate::auth::password::{hash_password, verify_password};
use crate::domain::user::{normalize_name, Email, ProfileUpdate, Role, User};

const MIN_PASSWORD_LEN: usize = 8;
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Request body for user registration
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please add all fields"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Please add all fields"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Please add all fields"))]
    pub password: String,
    pub role: Option<String>,
    pub company_name: Option<String>,
    pub profile_pic: Option<String>,
}

/// Response from successful registration
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Request body for user login
///
/// `role` names the portal the user is signing in through; it must match
/// the registered role when present.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please provide email and password"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Please provide email and password"))]
    pub password: String,
    pub role: Option<String>,
}

/// Response from successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub profile_completion: u8,
    pub next_steps: Vec<&'static str>,
}

/// Partial profile update; absent fields are left untouched
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub bio: Option<String>,
    pub resume: Option<String>,
    pub skills: Option<Vec<String>>,
    pub profile_pic: Option<String>,
    pub company_name: Option<String>,
    pub company_website: Option<String>,
}

fn validate_password(password: &str) -> ApiResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// Hashes off the async executor; bcrypt is deliberately slow
async fn hash_on_blocking_pool(password: String, cost: u32) -> ApiResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(ApiError::internal)?
        .map_err(|e| ApiError::internal(format!("Failed to hash password: {}", e)))
}

async fn verify_on_blocking_pool(password: String, hash: String) -> ApiResult<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(ApiError::internal)?
        .map_err(|e| ApiError::internal(format!("Password verification failed: {}", e)))
}

fn issue_token(state: &AppState, user_id: Uuid) -> ApiResult<String> {
    create_token(user_id, &state.config.jwt_secret, state.config.token_ttl())
        .map_err(|e| ApiError::internal(format!("Failed to create token: {}", e)))
}

/// Register a new user
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let email = Email::new(&req.email).map_err(|_| ApiError::bad_request("Please add a valid email"))?;
    validate_password(&req.password)?;

    let name = normalize_name(&req.name).map_err(ApiError::bad_request)?;
    let role = match req.role.as_deref().filter(|r| !r.is_empty()) {
        Some(role) => role.parse::<Role>().map_err(ApiError::bad_request)?,
        None => Role::default(),
    };

    let password_hash = hash_on_blocking_pool(req.password, state.config.bcrypt_cost).await?;

    let user = User::register(
        name,
        email,
        password_hash,
        role,
        req.company_name,
        req.profile_pic,
    )
    .map_err(ApiError::bad_request)?;

    // Unique email index decides concurrent registrations
    state.users.create(&user).await?;
    tracing::info!(user_id = %user.id, role = %user.role, "user registered");

    let token = issue_token(&state, user.id)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            token,
            user: UserResponse::from(&user),
        }),
    ))
}

/// Login with email and password
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let requested_role = match req.role.as_deref().filter(|r| !r.is_empty()) {
        Some(role) => Some(role.parse::<Role>().map_err(ApiError::bad_request)?),
        None => None,
    };

    let email = Email::new(&req.email).map_err(|_| ApiError::unauthorized(INVALID_CREDENTIALS))?;

    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::unauthorized(INVALID_CREDENTIALS))?;

    if !verify_on_blocking_pool(req.password, user.password_hash.clone()).await? {
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    if let Some(requested) = requested_role {
        if requested != user.role {
            return Err(ApiError::unauthorized(format!(
                "Access denied. You are registered as a {}, but trying to login as a {}.",
                user.role, requested
            )));
        }
    }

    let token = issue_token(&state, user.id)?;

    Ok(Json(LoginResponse {
        id: user.id,
        name: user.name,
        email: user.email.to_string(),
        role: user.role,
        token,
    }))
}

/// Current user's profile with a completion score
///
/// GET /api/auth/profile
pub async fn get_profile(auth: AuthUser) -> Json<ProfileResponse> {
    let completion = auth.user.profile_completion();

    Json(ProfileResponse {
        user: UserResponse::from(&auth.user),
        profile_completion: completion.percent,
        next_steps: completion.next_steps,
    })
}

/// Update the current user's profile
///
/// PUT /api/auth/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let mut changes = ProfileUpdate {
        name: non_blank(req.name),
        bio: req.bio,
        resume: req.resume,
        profile_pic: req.profile_pic,
        company_website: req.company_website,
        ..Default::default()
    };

    if let Some(email) = non_blank(req.email) {
        changes.email =
            Some(Email::new(email).map_err(|_| ApiError::bad_request("Please add a valid email"))?);
    }

    if let Some(password) = req.password.filter(|p| !p.is_empty()) {
        validate_password(&password)?;
        changes.password_hash = Some(hash_on_blocking_pool(password, state.config.bcrypt_cost).await?);
    }

    changes.skills = req.skills.map(|skills| {
        skills
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    });

    if auth.user.is_employer() {
        changes.company_name = req.company_name.map(|c| c.trim().to_string());
    }

    let user = state.users.update_profile(auth.id(), &changes).await?;

    Ok(Json(UserResponse::from(&user)))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_password_rejected() {
        let err = validate_password("short").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(validate_password("long enough").is_ok());
    }

    #[test]
    fn non_blank_trims_and_drops_empty() {
        assert_eq!(non_blank(Some("  Ada ".to_string())), Some("Ada".to_string()));
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(None), None);
    }
}
