use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::value_objects::{Email, Role};

/// Registered account, either a candidate or an employer
///
/// # Invariants
/// - Name is not blank
/// - Role never changes after registration
/// - `company_name` is only kept for employers
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: Email,
    pub password_hash: String,
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

/// Weighted profile-completion report returned with the profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileCompletion {
    /// Percentage in 0..=100
    pub percent: u8,
    pub next_steps: Vec<&'static str>,
}

const MAX_COMPLETION_SCORE: u32 = 90;

/// A profile edit as a set of field changes
///
/// `None` leaves the stored value alone, so concurrent edits to different
/// fields do not overwrite each other.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub password_hash: Option<String>,
    pub bio: Option<String>,
    pub resume: Option<String>,
    pub skills: Option<Vec<String>>,
    pub profile_pic: Option<String>,
    pub company_name: Option<String>,
    pub company_website: Option<String>,
}

impl ProfileUpdate {
    /// Writes the present fields onto `user` and bumps `updated_at`
    pub fn apply_to(&self, user: &mut User) {
        fn set<T: Clone>(slot: &mut T, value: &Option<T>) {
            if let Some(value) = value {
                *slot = value.clone();
            }
        }

        set(&mut user.name, &self.name);
        set(&mut user.email, &self.email);
        set(&mut user.password_hash, &self.password_hash);
        set(&mut user.bio, &self.bio);
        set(&mut user.resume, &self.resume);
        set(&mut user.skills, &self.skills);
        set(&mut user.profile_pic, &self.profile_pic);
        set(&mut user.company_website, &self.company_website);
        if user.is_employer() {
            set(&mut user.company_name, &self.company_name);
        }
        user.updated_at = Utc::now();
    }
}

/// Trims a display name, rejecting blank ones
pub fn normalize_name(name: &str) -> Result<String, String> {
    let name = name.trim();
    if name.is_empty() {
        Err("Name is required".to_string())
    } else {
        Ok(name.to_string())
    }
}

impl User {
    /// Creates a freshly registered user
    ///
    /// The company name is dropped unless the role is employer.
    ///
    /// # Example
    /// ```
    /// use jobportal_api::domain::user::{User, Email, Role};
    ///
    /// let user = User::register(
    ///     "Ada".to_string(),
    ///     Email::new("ada@example.com").unwrap(),
    ///     "hash".to_string(),
    ///     Role::Candidate,
    ///     Some("Ignored Ltd".to_string()),
    ///     None,
    /// ).expect("valid user");
    ///
    /// assert!(user.company_name.is_empty());
    /// ```
    pub fn register(
        name: String,
        email: Email,
        password_hash: String,
        role: Role,
        company_name: Option<String>,
        profile_pic: Option<String>,
    ) -> Result<Self, String> {
        let name = normalize_name(&name)?;

        let company_name = match role {
            Role::Employer => company_name.unwrap_or_default().trim().to_string(),
            Role::Candidate => String::new(),
        };

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            role,
            profile_pic: profile_pic.unwrap_or_default(),
            bio: String::new(),
            resume: String::new(),
            skills: Vec::new(),
            company_name,
            company_website: String::new(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_employer(&self) -> bool {
        self.role == Role::Employer
    }

    /// Scores how complete the profile is for the user's role
    ///
    /// Name, email, picture and bio weigh 10 each. Candidates earn 30 for a
    /// resume and 20 for skills; employers earn 30 for a company name and 20
    /// for a company website. The total is normalised against 90.
    pub fn profile_completion(&self) -> ProfileCompletion {
        let mut score = 0u32;
        let mut next_steps = Vec::new();

        if !self.name.is_empty() {
            score += 10;
        }
        if !self.email.as_str().is_empty() {
            score += 10;
        }
        if !self.profile_pic.is_empty() {
            score += 10;
        } else {
            next_steps.push("Add a profile picture");
        }

        match self.role {
            Role::Candidate => {
                if !self.resume.is_empty() {
                    score += 30;
                } else {
                    next_steps.push("Upload resume");
                }
                if !self.skills.is_empty() {
                    score += 20;
                } else {
                    next_steps.push("Add skills");
                }
            }
            Role::Employer => {
                if !self.company_name.is_empty() {
                    score += 30;
                } else {
                    next_steps.push("Complete company profile");
                }
                if !self.company_website.is_empty() {
                    score += 20;
                } else {
                    next_steps.push("Add company website");
                }
            }
        }

        if !self.bio.is_empty() {
            score += 10;
        } else {
            next_steps.push("Complete bio");
        }

        let percent = ((score * 100 + MAX_COMPLETION_SCORE / 2) / MAX_COMPLETION_SCORE).min(100) as u8;
        ProfileCompletion { percent, next_steps }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User::register(
            "Grace".to_string(),
            Email::new("grace@example.com").unwrap(),
            "hash".to_string(),
            role,
            Some("Navy".to_string()),
            None,
        )
        .unwrap()
    }

    #[test]
    fn register_rejects_blank_name() {
        let result = User::register(
            "   ".to_string(),
            Email::new("x@y.z").unwrap(),
            "hash".to_string(),
            Role::Candidate,
            None,
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn profile_update_touches_only_present_fields() {
        let mut u = user(Role::Candidate);
        u.bio = "Old bio".to_string();
        let hash = u.password_hash.clone();

        ProfileUpdate {
            resume: Some("https://cv.example.com".to_string()),
            company_name: Some("Ignored".to_string()),
            ..Default::default()
        }
        .apply_to(&mut u);

        assert_eq!(u.resume, "https://cv.example.com");
        assert_eq!(u.bio, "Old bio");
        assert_eq!(u.password_hash, hash);
        assert_eq!(u.company_name, "");
    }

    #[test]
    fn normalize_name_trims() {
        assert_eq!(normalize_name("  Ada ").unwrap(), "Ada");
        assert!(normalize_name(" \t ").is_err());
    }

    #[test]
    fn company_name_kept_only_for_employers() {
        assert_eq!(user(Role::Employer).company_name, "Navy");
        assert_eq!(user(Role::Candidate).company_name, "");
    }

    #[test]
    fn fresh_candidate_scores_name_and_email_only() {
        let completion = user(Role::Candidate).profile_completion();
        assert_eq!(completion.percent, 22);
        assert_eq!(
            completion.next_steps,
            vec!["Add a profile picture", "Upload resume", "Add skills", "Complete bio"]
        );
    }

    #[test]
    fn complete_candidate_scores_hundred() {
        let mut u = user(Role::Candidate);
        u.profile_pic = "pic.png".to_string();
        u.resume = "https://cv.example.com".to_string();
        u.skills = vec!["rust".to_string()];
        u.bio = "hello".to_string();

        let completion = u.profile_completion();
        assert_eq!(completion.percent, 100);
        assert!(completion.next_steps.is_empty());
    }

    #[test]
    fn employer_with_company_name_counts_it() {
        let completion = user(Role::Employer).profile_completion();
        // name + email + company name = 50 of 90
        assert_eq!(completion.percent, 56);
        assert!(!completion.next_steps.contains(&"Complete company profile"));
        assert!(completion.next_steps.contains(&"Add company website"));
    }
}
