use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::value_objects::JobType;

/// Fields an employer supplies when posting a job
#[derive(Debug, Clone, Default)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub salary: String,
    pub location: String,
    pub job_type: JobType,
    pub company_name: String,
    pub company: Option<Uuid>,
}

/// Job posting aggregate
///
/// # Invariants
/// - Title, description, salary, location and company name are not blank
/// - The creator never changes
/// - `company` is only set when the creator owns that company (checked by
///   the caller before construction)
///
/// # Example
/// ```
/// use jobportal_api::domain::job::{Job, NewJob};
/// use uuid::Uuid;
///
/// let job = Job::new(
///     NewJob {
///         title: "Rust Engineer".to_string(),
///         description: "Build services".to_string(),
///         salary: "100k".to_string(),
///         location: "Remote".to_string(),
///         company_name: "Ferris Inc".to_string(),
///         ..Default::default()
///     },
///     Uuid::new_v4(),
/// ).expect("valid job");
///
/// assert_eq!(job.title(), "Rust Engineer");
/// ```
#[derive(Debug, Clone)]
pub struct Job {
    id: Uuid,
    title: String,
    description: String,
    salary: String,
    location: String,
    job_type: JobType,
    company_name: String,
    created_by: Uuid,
    company: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Job {
    /// Message returned when any required field is blank
    pub const REQUIRED_FIELDS_MESSAGE: &'static str =
        "Please fill all required fields: title, description, salary, location, and company name";

    /// Creates a new job posted by `created_by`
    ///
    /// # Returns
    /// * `Ok(Job)` - The new job
    /// * `Err(String)` - If a required field is blank
    pub fn new(fields: NewJob, created_by: Uuid) -> Result<Self, String> {
        let NewJob {
            title,
            description,
            salary,
            location,
            job_type,
            company_name,
            company,
        } = fields;

        let required = [&title, &description, &salary, &location, &company_name];
        if required.iter().any(|value| value.trim().is_empty()) {
            return Err(Self::REQUIRED_FIELDS_MESSAGE.to_string());
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            salary: salary.trim().to_string(),
            location: location.trim().to_string(),
            job_type,
            company_name: company_name.trim().to_string(),
            created_by,
            company,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstructs a job from storage without re-validating
    #[allow(clippy::too_many_arguments)]
    pub fn from_persistence(
        id: Uuid,
        title: String,
        description: String,
        salary: String,
        location: String,
        job_type: JobType,
        company_name: String,
        created_by: Uuid,
        company: Option<Uuid>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            salary,
            location,
            job_type,
            company_name,
            created_by,
            company,
            created_at,
            updated_at,
        }
    }

    /// Whether `user_id` posted this job
    pub fn is_created_by(&self, user_id: Uuid) -> bool {
        self.created_by == user_id
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn salary(&self) -> &str {
        &self.salary
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn job_type(&self) -> JobType {
        self.job_type
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn created_by(&self) -> Uuid {
        self.created_by
    }

    pub fn company(&self) -> Option<Uuid> {
        self.company
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Search predicates for the public job listing
///
/// Keyword matches title or description, location is a substring match;
/// both ignore case. Type and company must match exactly.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub keyword: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub company: Option<Uuid>,
}

impl JobFilter {
    /// Evaluates the filter against a job in memory
    pub fn matches(&self, job: &Job) -> bool {
        if let Some(keyword) = self.keyword.as_deref() {
            if !contains_ignore_case(&job.title, keyword)
                && !contains_ignore_case(&job.description, keyword)
            {
                return false;
            }
        }

        if let Some(location) = self.location.as_deref() {
            if !contains_ignore_case(&job.location, location) {
                return false;
            }
        }

        if let Some(job_type) = self.job_type {
            if job.job_type != job_type {
                return false;
            }
        }

        if let Some(company) = self.company {
            if job.company != Some(company) {
                return false;
            }
        }

        true
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> NewJob {
        NewJob {
            title: "Backend Developer".to_string(),
            description: "Work on the Rust API".to_string(),
            salary: "90k-120k".to_string(),
            location: "Berlin, Germany".to_string(),
            job_type: JobType::FullTime,
            company_name: "Acme".to_string(),
            company: None,
        }
    }

    #[test]
    fn new_job_with_valid_fields() {
        let creator = Uuid::new_v4();
        let job = Job::new(fields(), creator).expect("valid job");

        assert_eq!(job.title(), "Backend Developer");
        assert_eq!(job.job_type(), JobType::FullTime);
        assert!(job.is_created_by(creator));
        assert!(!job.is_created_by(Uuid::new_v4()));
        assert_eq!(job.company(), None);
    }

    #[test]
    fn new_job_rejects_blank_required_field() {
        let mut f = fields();
        f.salary = "   ".to_string();

        let err = Job::new(f, Uuid::new_v4()).unwrap_err();
        assert_eq!(err, Job::REQUIRED_FIELDS_MESSAGE);
    }

    #[test]
    fn new_job_rejects_missing_company_name() {
        let mut f = fields();
        f.company_name = String::new();

        assert!(Job::new(f, Uuid::new_v4()).is_err());
    }

    #[test]
    fn new_job_trims_fields() {
        let mut f = fields();
        f.title = "  Backend Developer  ".to_string();

        let job = Job::new(f, Uuid::new_v4()).unwrap();
        assert_eq!(job.title(), "Backend Developer");
    }

    #[test]
    fn empty_filter_matches_everything() {
        let job = Job::new(fields(), Uuid::new_v4()).unwrap();
        assert!(JobFilter::default().matches(&job));
    }

    #[test]
    fn keyword_matches_title_or_description_ignoring_case() {
        let job = Job::new(fields(), Uuid::new_v4()).unwrap();

        let by_title = JobFilter {
            keyword: Some("backend".to_string()),
            ..Default::default()
        };
        let by_description = JobFilter {
            keyword: Some("RUST".to_string()),
            ..Default::default()
        };
        let miss = JobFilter {
            keyword: Some("frontend".to_string()),
            ..Default::default()
        };

        assert!(by_title.matches(&job));
        assert!(by_description.matches(&job));
        assert!(!miss.matches(&job));
    }

    #[test]
    fn location_is_substring_match() {
        let job = Job::new(fields(), Uuid::new_v4()).unwrap();
        let filter = JobFilter {
            location: Some("berlin".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&job));
    }

    #[test]
    fn type_and_company_must_match_exactly() {
        let company = Uuid::new_v4();
        let mut f = fields();
        f.company = Some(company);
        let job = Job::new(f, Uuid::new_v4()).unwrap();

        let remote = JobFilter {
            job_type: Some(JobType::Remote),
            ..Default::default()
        };
        let same_company = JobFilter {
            company: Some(company),
            ..Default::default()
        };
        let other_company = JobFilter {
            company: Some(Uuid::new_v4()),
            ..Default::default()
        };

        assert!(!remote.matches(&job));
        assert!(same_company.matches(&job));
        assert!(!other_company.matches(&job));
    }
}
