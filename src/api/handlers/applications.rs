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
use crate::api::views::{companies_by_id, jobs_by_id, users_by_id, JobSummary, UserSummary};
use crate::domain::application::{Application, ApplicationStatus};
use crate::domain::job::Job;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub resume_link: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: String,
}

/// Application with `job` and `applicant` either as ids or populated
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse<J, A> {
    pub id: Uuid,
    pub job: J,
    pub applicant: A,
    pub status: ApplicationStatus,
    pub cover_letter: String,
    pub resume_link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<J, A> ApplicationResponse<J, A> {
    fn new(application: Application, job: J, applicant: A) -> Self {
        Self {
            id: application.id,
            job,
            applicant,
            status: application.status,
            cover_letter: application.cover_letter,
            resume_link: application.resume_link,
            created_at: application.created_at,
            updated_at: application.updated_at,
        }
    }
}

impl From<Application> for ApplicationResponse<Uuid, Uuid> {
    fn from(application: Application) -> Self {
        let (job, applicant) = (application.job, application.applicant);
        Self::new(application, job, applicant)
    }
}

async fn find_job(state: &AppState, id: Uuid) -> ApiResult<Job> {
    state
        .jobs
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))
}

/// Apply for a job
///
/// POST /api/applications/:jobId
pub async fn apply(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(job_id): Path<String>,
    ValidatedJson(req): ValidatedJson<ApplyRequest>,
) -> ApiResult<(StatusCode, Json<ApplicationResponse<Uuid, Uuid>>)> {
    let job_id = parse_id(&job_id, "Job")?;
    let application = Application::new(job_id, auth.id(), req.cover_letter, req.resume_link)
        .map_err(ApiError::bad_request)?;

    find_job(&state, job_id).await?;

    // Unique (job, applicant) index rejects the second of two racing requests
    state.applications.create(&application).await?;
    tracing::info!(application_id = %application.id, job_id = %job_id, "application submitted");

    Ok((StatusCode::CREATED, Json(application.into())))
}

/// Applicants for one job, visible to its creator only
///
/// GET /api/applications/job/:jobId
pub async fn list_for_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(job_id): Path<String>,
) -> ApiResult<Json<Vec<ApplicationResponse<Uuid, Option<UserSummary>>>>> {
    let job = find_job(&state, parse_id(&job_id, "Job")?).await?;

    if !job.is_created_by(auth.id()) {
        return Err(ApiError::forbidden(
            "Not authorized to view applicants for this job",
        ));
    }

    let applications = state.applications.find_by_job(job.id()).await?;
    let applicants = users_by_id(&state, applications.iter().map(|a| a.applicant)).await?;

    Ok(Json(
        applications
            .into_iter()
            .map(|application| {
                let applicant = applicants.get(&application.applicant).map(UserSummary::with_email);
                let job = application.job;
                ApplicationResponse::new(application, job, applicant)
            })
            .collect(),
    ))
}

/// The requester's own applications, newest first
///
/// GET /api/applications
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ApplicationResponse<Option<JobSummary>, Uuid>>>> {
    let applications = state.applications.find_by_applicant(auth.id()).await?;
    let jobs = jobs_by_id(&state, applications.iter().map(|a| a.job)).await?;
    let companies = companies_by_id(&state, jobs.values().filter_map(Job::company)).await?;

    Ok(Json(
        applications
            .into_iter()
            .map(|application| {
                let job = jobs.get(&application.job).map(|job| {
                    JobSummary::detailed(job, job.company().and_then(|id| companies.get(&id)))
                });
                let applicant = application.applicant;
                ApplicationResponse::new(application, job, applicant)
            })
            .collect(),
    ))
}

/// Applications across every job the requester posted
///
/// GET /api/applications/employer/applicants
pub async fn list_for_employer(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ApplicationResponse<Option<JobSummary>, Option<UserSummary>>>>> {
    let jobs = state.jobs.find_by_creator(auth.id()).await?;
    if jobs.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let job_ids: Vec<Uuid> = jobs.iter().map(Job::id).collect();
    let applications = state.applications.find_by_jobs(&job_ids).await?;
    let applicants = users_by_id(&state, applications.iter().map(|a| a.applicant)).await?;

    Ok(Json(
        applications
            .into_iter()
            .map(|application| {
                let job = jobs
                    .iter()
                    .find(|job| job.id() == application.job)
                    .map(JobSummary::title_only);
                let applicant = applicants.get(&application.applicant).map(UserSummary::with_skills);
                ApplicationResponse::new(application, job, applicant)
            })
            .collect(),
    ))
}

/// Move an application through the hiring pipeline
///
/// PUT /api/applications/:id/status
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateStatusRequest>,
) -> ApiResult<Json<ApplicationResponse<Uuid, Uuid>>> {
    let id = parse_id(&id, "Application")?;
    let application = state
        .applications
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Application not found"))?;

    let job = find_job(&state, application.job).await?;
    if !job.is_created_by(auth.id()) {
        return Err(ApiError::forbidden(
            "Not authorized to update this application",
        ));
    }

    let status: ApplicationStatus = req.status.trim().parse().map_err(ApiError::bad_request)?;
    let updated = state.applications.update_status(id, status).await?;
    tracing::info!(application_id = %id, status = %status, "application status updated");

    Ok(Json(updated.into()))
}
