use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Hiring stage of a job application
///
/// Employers may move an application to any stage; there is no enforced
/// ordering between stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Shortlisted,
    Interview,
    Hired,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Hired => "hired",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "applied" => Ok(ApplicationStatus::Applied),
            "shortlisted" => Ok(ApplicationStatus::Shortlisted),
            "interview" => Ok(ApplicationStatus::Interview),
            "hired" => Ok(ApplicationStatus::Hired),
            "rejected" => Ok(ApplicationStatus::Rejected),
            _ => Err("Invalid status".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_statuses() {
        for status in ["applied", "shortlisted", "interview", "hired", "rejected"] {
            let parsed: ApplicationStatus = status.parse().unwrap();
            assert_eq!(parsed.as_str(), status);
        }
    }

    #[test]
    fn rejects_unknown_status() {
        assert_eq!("accepted".parse::<ApplicationStatus>().unwrap_err(), "Invalid status");
        assert!("Hired".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn default_is_applied() {
        assert_eq!(ApplicationStatus::default(), ApplicationStatus::Applied);
    }
}
