// Response shapes shared by several handlers
// Related records are embedded as summaries, never with secrets

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::api::errors::ApiResult;
use crate::api::state::AppState;
use crate::domain::company::Company;
use crate::domain::job::{Job, JobType};
use crate::domain::user::{Role, User};

/// Full account view returned to the account owner
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub profile_pic: String,
    pub bio: String,
    pub resume: String,
    pub skills: Vec<String>,
    pub company_name: String,
    pub company_website: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.to_string(),
            role: user.role,
            profile_pic: user.profile_pic.clone(),
            bio: user.bio.clone(),
            resume: user.resume.clone(),
            skills: user.skills.clone(),
            company_name: user.company_name.clone(),
            company_website: user.company_website.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Another user as embedded in jobs, posts, comments and applications
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub profile_pic: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
}

impl UserSummary {
    /// Name, picture and role only
    pub fn public(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            profile_pic: user.profile_pic.clone(),
            role: user.role,
            email: None,
            skills: None,
        }
    }

    /// Adds the email, for employers reviewing applicants
    pub fn with_email(user: &User) -> Self {
        Self {
            email: Some(user.email.to_string()),
            ..Self::public(user)
        }
    }

    /// Adds email and skills
    pub fn with_skills(user: &User) -> Self {
        Self {
            skills: Some(user.skills.clone()),
            ..Self::with_email(user)
        }
    }
}

/// Bare reference to a user: id and name, plus email where the owner may see it
#[derive(Debug, Clone, Serialize)]
pub struct UserRef {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserRef {
    pub fn new(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: None,
        }
    }

    pub fn with_email(user: &User) -> Self {
        Self {
            email: Some(user.email.to_string()),
            ..Self::new(user)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanySummary {
    pub id: Uuid,
    pub name: String,
    pub logo: String,
    pub location: String,
}

impl From<&Company> for CompanySummary {
    fn from(company: &Company) -> Self {
        Self {
            id: company.id,
            name: company.name.clone(),
            logo: company.logo.clone(),
            location: company.location.clone(),
        }
    }
}

/// Job as embedded in a candidate's application list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanySummary>,
}

impl JobSummary {
    pub fn title_only(job: &Job) -> Self {
        Self {
            id: job.id(),
            title: job.title().to_string(),
            description: None,
            salary: None,
            location: None,
            job_type: None,
            company_name: None,
            company: None,
        }
    }

    pub fn detailed(job: &Job, company: Option<&Company>) -> Self {
        Self {
            description: Some(job.description().to_string()),
            salary: Some(job.salary().to_string()),
            location: Some(job.location().to_string()),
            job_type: Some(job.job_type()),
            company_name: Some(job.company_name().to_string()),
            company: company.map(CompanySummary::from),
            ..Self::title_only(job)
        }
    }
}

fn unique(ids: impl IntoIterator<Item = Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

/// Loads the referenced users in one batch, keyed by id
pub async fn users_by_id(
    state: &AppState,
    ids: impl IntoIterator<Item = Uuid>,
) -> ApiResult<HashMap<Uuid, User>> {
    let users = state.users.find_by_ids(&unique(ids)).await?;
    Ok(users.into_iter().map(|u| (u.id, u)).collect())
}

/// Loads the referenced companies in one batch, keyed by id
pub async fn companies_by_id(
    state: &AppState,
    ids: impl IntoIterator<Item = Uuid>,
) -> ApiResult<HashMap<Uuid, Company>> {
    let companies = state.companies.find_by_ids(&unique(ids)).await?;
    Ok(companies.into_iter().map(|c| (c.id, c)).collect())
}

/// Loads the referenced jobs in one batch, keyed by id
pub async fn jobs_by_id(
    state: &AppState,
    ids: impl IntoIterator<Item = Uuid>,
) -> ApiResult<HashMap<Uuid, Job>> {
    let jobs = state.jobs.find_by_ids(&unique(ids)).await?;
    Ok(jobs.into_iter().map(|j| (j.id(), j)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Email;

    fn user() -> User {
        let mut user = User::register(
            "Linus".to_string(),
            Email::new("linus@example.com").unwrap(),
            "$2b$04$secret".to_string(),
            Role::Candidate,
            None,
            None,
        )
        .unwrap();
        user.skills = vec!["c".to_string()];
        user
    }

    #[test]
    fn user_response_never_contains_password_hash() {
        let json = serde_json::to_value(UserResponse::from(&user())).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(!json.to_string().contains("$2b$04$secret"));
        assert_eq!(json["profilePic"], "");
    }

    #[test]
    fn public_summary_hides_email() {
        let json = serde_json::to_value(UserSummary::public(&user())).unwrap();
        assert!(json.get("email").is_none());
        assert!(json.get("skills").is_none());
        assert_eq!(json["role"], "candidate");
    }

    #[test]
    fn summary_with_skills_includes_email() {
        let json = serde_json::to_value(UserSummary::with_skills(&user())).unwrap();
        assert_eq!(json["email"], "linus@example.com");
        assert_eq!(json["skills"][0], "c");
    }

    #[test]
    fn unique_keeps_first_occurrence_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(unique([a, b, a, b]), vec![a, b]);
    }
}
