use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Employment type of a job posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_type")]
pub enum JobType {
    #[default]
    #[serde(rename = "Full-time")]
    #[sqlx(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    #[sqlx(rename = "Part-time")]
    PartTime,
    #[serde(rename = "Contract")]
    #[sqlx(rename = "Contract")]
    Contract,
    #[serde(rename = "Remote")]
    #[sqlx(rename = "Remote")]
    Remote,
}

impl JobType {
    pub const ALL: [JobType; 4] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Contract,
        JobType::Remote,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Remote => "Remote",
        }
    }
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = String;

    /// Parses the display name of a job type
    ///
    /// # Example
    /// ```
    /// use jobportal_api::domain::job::JobType;
    ///
    /// assert_eq!("Part-time".parse::<JobType>().unwrap(), JobType::PartTime);
    /// assert!("Gig".parse::<JobType>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = JobType::ALL.iter().map(JobType::as_str).collect();
                format!("Invalid job type. Must be one of: {}", names.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_display_name() {
        for job_type in JobType::ALL {
            assert_eq!(job_type.as_str().parse::<JobType>().unwrap(), job_type);
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!("full-time".parse::<JobType>().is_err());
    }

    #[test]
    fn invalid_type_lists_choices() {
        let err = "Freelance".parse::<JobType>().unwrap_err();
        assert_eq!(
            err,
            "Invalid job type. Must be one of: Full-time, Part-time, Contract, Remote"
        );
    }

    #[test]
    fn default_is_full_time() {
        assert_eq!(JobType::default(), JobType::FullTime);
    }

    #[test]
    fn serializes_with_display_name() {
        assert_eq!(serde_json::to_string(&JobType::PartTime).unwrap(), "\"Part-time\"");
    }
}
