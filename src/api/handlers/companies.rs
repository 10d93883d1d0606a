use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::parse_id;
use crate::api::errors::{ApiError, ApiResult};
use crate::api::middleware::{AuthUser, ValidatedJson};
use crate::api::state::AppState;
use crate::api::views::{users_by_id, UserRef};
use crate::domain::company::Company;

/// Request body for registering a company
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub website: String,
    pub location: String,
    pub logo: String,
    pub owner: Option<UserRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CompanyResponse {
    fn new(company: Company, owner: Option<UserRef>) -> Self {
        Self {
            id: company.id,
            name: company.name,
            description: company.description,
            website: company.website,
            location: company.location,
            logo: company.logo,
            owner,
            created_at: company.created_at,
            updated_at: company.updated_at,
        }
    }
}

async fn with_owners(state: &AppState, companies: Vec<Company>) -> ApiResult<Vec<CompanyResponse>> {
    let owners = users_by_id(state, companies.iter().map(|c| c.user_id)).await?;

    Ok(companies
        .into_iter()
        .map(|company| {
            let owner = owners.get(&company.user_id).map(UserRef::new);
            CompanyResponse::new(company, owner)
        })
        .collect())
}

/// Register a company owned by the requesting employer
///
/// POST /api/companies
pub async fn register_company(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateCompanyRequest>,
) -> ApiResult<(StatusCode, Json<CompanyResponse>)> {
    auth.require_employer("Only employers can register companies")?;

    let company = Company::new(
        req.name,
        req.description,
        req.website,
        req.location,
        req.logo,
        auth.id(),
    )
    .map_err(ApiError::bad_request)?;

    state.companies.create(&company).await?;
    tracing::info!(company_id = %company.id, owner = %auth.id(), "company registered");

    Ok((
        StatusCode::CREATED,
        Json(CompanyResponse::new(company, Some(UserRef::new(&auth.user)))),
    ))
}

/// All companies, newest first
///
/// GET /api/companies
pub async fn list_companies(State(state): State<AppState>) -> ApiResult<Json<Vec<CompanyResponse>>> {
    let companies = state.companies.find_all().await?;
    Ok(Json(with_owners(&state, companies).await?))
}

/// GET /api/companies/:id
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CompanyResponse>> {
    let id = parse_id(&id, "Company")?;
    let company = state
        .companies
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Company not found"))?;

    let owner = state.users.find_by_id(company.user_id).await?;

    Ok(Json(CompanyResponse::new(
        company,
        owner.as_ref().map(UserRef::new),
    )))
}
