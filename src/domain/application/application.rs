use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::value_objects::ApplicationStatus;

/// A candidate's submission for one job
///
/// At most one application exists per (job, applicant) pair; storage
/// enforces this with a unique constraint.
#[derive(Debug, Clone)]
pub struct Application {
    pub id: Uuid,
    pub job: Uuid,
    pub applicant: Uuid,
    pub status: ApplicationStatus,
    pub cover_letter: String,
    pub resume_link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Message used when the applicant already applied to the job
    pub const DUPLICATE_MESSAGE: &'static str = "You have already applied for this job";

    /// Starts a new application in the `applied` stage
    ///
    /// # Returns
    /// * `Err(String)` - If the resume link is blank
    pub fn new(
        job: Uuid,
        applicant: Uuid,
        cover_letter: Option<String>,
        resume_link: String,
    ) -> Result<Self, String> {
        let resume_link = resume_link.trim().to_string();
        if resume_link.is_empty() {
            return Err("Resume link is required".to_string());
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            job,
            applicant,
            status: ApplicationStatus::Applied,
            cover_letter: cover_letter.unwrap_or_default(),
            resume_link,
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_application_starts_applied() {
        let app = Application::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            None,
            "https://cv.example.com/me.pdf".to_string(),
        )
        .unwrap();

        assert_eq!(app.status, ApplicationStatus::Applied);
        assert_eq!(app.cover_letter, "");
    }

    #[test]
    fn resume_link_is_required() {
        let err = Application::new(Uuid::new_v4(), Uuid::new_v4(), None, " ".to_string())
            .unwrap_err();
        assert_eq!(err, "Resume link is required");
    }
}
