use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Comment on a community post
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub post: Uuid,
    pub author: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(text: String, post: Uuid, author: Uuid) -> Result<Self, String> {
        let text = text.trim().to_string();
        if text.is_empty() {
            return Err("Please add a comment".to_string());
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            text,
            post,
            author,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author == user_id
    }

    /// Replaces the text; blank input keeps the current text
    pub fn edit(&mut self, text: Option<String>) {
        if let Some(text) = text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
            self.text = text;
            self.updated_at = Utc::now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_comment_requires_text() {
        assert!(Comment::new(" ".to_string(), Uuid::new_v4(), Uuid::new_v4()).is_err());
    }

    #[test]
    fn blank_edit_keeps_text() {
        let mut comment = Comment::new("first".to_string(), Uuid::new_v4(), Uuid::new_v4()).unwrap();

        comment.edit(Some("".to_string()));
        assert_eq!(comment.text, "first");

        comment.edit(None);
        assert_eq!(comment.text, "first");

        comment.edit(Some("second".to_string()));
        assert_eq!(comment.text, "second");
    }
}
