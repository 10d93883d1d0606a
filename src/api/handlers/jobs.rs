use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use super::parse_id;
use crate::api::errors::{ApiError, ApiResult};
use crate::api::middleware::{AuthUser, ValidatedJson};
use crate::api::state::AppState;
use crate::api::views::{companies_by_id, users_by_id, CompanySummary, UserRef};
use crate::domain::company::Company;
use crate::domain::job::{Job, JobFilter, JobType, NewJob};
use crate::domain::user::User;

/// Query string for the job board
#[derive(Debug, Default, Deserialize)]
pub struct JobQuery {
    pub keyword: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub company: Option<String>,
}

impl JobQuery {
    /// Blank parameters are ignored; malformed ones are a 400
    fn into_filter(self) -> ApiResult<JobFilter> {
        let job_type = match present(self.job_type) {
            Some(raw) => Some(raw.parse::<JobType>().map_err(ApiError::bad_request)?),
            None => None,
        };

        let company = match present(self.company) {
            Some(raw) => Some(
                Uuid::parse_str(&raw)
                    .map_err(|_| ApiError::bad_request("Invalid company id"))?,
            ),
            None => None,
        };

        Ok(JobFilter {
            keyword: present(self.keyword),
            location: present(self.location),
            job_type,
            company,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CountQuery {
    pub days: Option<String>,
}

/// Request body for posting a job
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    #[serde(default)]
    pub company_name: String,
    /// Id of a registered company owned by the requester
    pub company: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub salary: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub company_name: String,
    pub created_by: Option<UserRef>,
    pub company: Option<CompanySummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobResponse {
    fn new(job: &Job, created_by: Option<UserRef>, company: Option<&Company>) -> Self {
        Self {
            id: job.id(),
            title: job.title().to_string(),
            description: job.description().to_string(),
            salary: job.salary().to_string(),
            location: job.location().to_string(),
            job_type: job.job_type(),
            company_name: job.company_name().to_string(),
            created_by,
            company: company.map(CompanySummary::from),
            created_at: job.created_at(),
            updated_at: job.updated_at(),
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Attaches creators and linked companies to a batch of jobs
async fn populate(state: &AppState, jobs: Vec<Job>) -> ApiResult<Vec<JobResponse>> {
    let creators = users_by_id(state, jobs.iter().map(Job::created_by)).await?;
    let companies = companies_by_id(state, jobs.iter().filter_map(Job::company)).await?;

    Ok(jobs
        .iter()
        .map(|job| {
            JobResponse::new(
                job,
                creators.get(&job.created_by()).map(UserRef::new),
                job.company().and_then(|id| companies.get(&id)),
            )
        })
        .collect())
}

/// List jobs matching the query, newest first
///
/// GET /api/jobs
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobQuery>,
) -> ApiResult<Json<Vec<JobResponse>>> {
    let filter = query.into_filter()?;
    let jobs = state.jobs.search(&filter).await?;

    Ok(Json(populate(&state, jobs).await?))
}

/// Number of jobs, optionally only those posted in the last `days` days
///
/// GET /api/jobs/count
pub async fn count_jobs(
    State(state): State<AppState>,
    Query(query): Query<CountQuery>,
) -> ApiResult<Json<Value>> {
    let since = match present(query.days) {
        Some(raw) => {
            let days: u32 = raw
                .parse()
                .map_err(|_| ApiError::bad_request("days must be a non-negative integer"))?;
            // Windows reaching past the calendar's start count every job
            Utc::now().checked_sub_signed(Duration::days(i64::from(days)))
        }
        None => None,
    };

    let count = state.jobs.count(since).await?;

    Ok(Json(json!({ "count": count })))
}

/// Get a single job
///
/// GET /api/jobs/:id
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<JobResponse>> {
    let id = parse_id(&id, "Job")?;
    let job = state
        .jobs
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;

    let mut populated = populate(&state, vec![job]).await?;
    populated
        .pop()
        .map(Json)
        .ok_or_else(|| ApiError::internal("populate dropped a job"))
}

/// Post a new job
///
/// POST /api/jobs
pub async fn create_job(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateJobRequest>,
) -> ApiResult<(StatusCode, Json<JobResponse>)> {
    auth.require_employer("Only employers can post jobs")?;

    let job_type = match present(req.job_type) {
        Some(raw) => raw.parse::<JobType>().map_err(ApiError::bad_request)?,
        None => JobType::default(),
    };

    let company = match present(req.company) {
        Some(raw) => Some(owned_company(&state, &auth.user, &raw).await?),
        None => None,
    };

    let company_name = match &company {
        Some(company) if req.company_name.trim().is_empty() => company.name.clone(),
        _ => req.company_name,
    };

    let job = Job::new(
        NewJob {
            title: req.title,
            description: req.description,
            salary: req.salary,
            location: req.location,
            job_type,
            company_name,
            company: company.as_ref().map(|c| c.id),
        },
        auth.id(),
    )
    .map_err(ApiError::bad_request)?;

    state.jobs.create(&job).await?;
    tracing::info!(job_id = %job.id(), created_by = %auth.id(), "job posted");

    Ok((
        StatusCode::CREATED,
        Json(JobResponse::new(
            &job,
            Some(UserRef::with_email(&auth.user)),
            company.as_ref(),
        )),
    ))
}

/// Resolves a company the employer wants to post under
async fn owned_company(state: &AppState, user: &User, raw_id: &str) -> ApiResult<Company> {
    let id = parse_id(raw_id, "Company")?;
    let company = state
        .companies
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Company not found"))?;

    if !company.is_owned_by(user.id) {
        return Err(ApiError::forbidden(
            "Not authorized to post jobs for this company",
        ));
    }

    Ok(company)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_params_are_ignored() {
        let filter = JobQuery {
            keyword: Some("  ".to_string()),
            location: Some(String::new()),
            job_type: Some(String::new()),
            company: None,
        }
        .into_filter()
        .unwrap();

        assert!(filter.keyword.is_none());
        assert!(filter.location.is_none());
        assert!(filter.job_type.is_none());
    }

    #[test]
    fn unknown_type_is_bad_request() {
        let err = JobQuery {
            job_type: Some("Freelance".to_string()),
            ..Default::default()
        }
        .into_filter()
        .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn malformed_company_is_bad_request() {
        let err = JobQuery {
            company: Some("not-a-uuid".to_string()),
            ..Default::default()
        }
        .into_filter()
        .unwrap_err();

        assert_eq!(err.message, "Invalid company id");
    }
}
