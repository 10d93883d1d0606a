use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Community feed post
///
/// # Invariants
/// - Content is not blank
/// - `likes` holds each user id at most once
#[derive(Debug, Clone)]
pub struct Post {
    pub id: Uuid,
    pub content: String,
    /// Optional image URL, empty when absent
    pub image: String,
    pub author: Uuid,
    pub likes: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(content: String, image: Option<String>, author: Uuid) -> Result<Self, String> {
        let content = validate_content(content)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            content,
            image: image.unwrap_or_default(),
            author,
            likes: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author == user_id
    }

    /// Replaces the content and/or image
    pub fn edit(&mut self, content: Option<String>, image: Option<String>) -> Result<(), String> {
        if let Some(content) = content {
            self.content = validate_content(content)?;
        }
        if let Some(image) = image {
            self.image = image;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Adds the user's like, or removes it if already present
    ///
    /// Returns true when the post is liked after the call.
    pub fn toggle_like(&mut self, user_id: Uuid) -> bool {
        if let Some(pos) = self.likes.iter().position(|id| *id == user_id) {
            self.likes.remove(pos);
            false
        } else {
            self.likes.push(user_id);
            true
        }
    }
}

fn validate_content(content: String) -> Result<String, String> {
    let content = content.trim().to_string();
    if content.is_empty() {
        Err("Please add post content".to_string())
    } else {
        Ok(content)
    }
}
