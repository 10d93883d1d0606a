use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Company profile registered by an employer
///
/// Names are unique across the portal.
#[derive(Debug, Clone)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub website: String,
    pub location: String,
    /// Logo image URL
    pub logo: String,
    /// Owning employer
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    pub fn new(
        name: String,
        description: Option<String>,
        website: Option<String>,
        location: Option<String>,
        logo: Option<String>,
        user_id: Uuid,
    ) -> Result<Self, String> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err("Please add a company name".to_string());
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            description: description.unwrap_or_default(),
            website: website.unwrap_or_default(),
            location: location.unwrap_or_default(),
            logo: logo.unwrap_or_default(),
            user_id,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}
