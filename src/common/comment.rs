use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CommentId = Uuid;

/// Maximum comment length, counted in Unicode scalar values.
pub const MAX_CONTENT_CHARS: usize = 800;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub parent_id: Option<CommentId>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(parent_id: Option<CommentId>, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            parent_id,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Validate comment content before it reaches persistence.
///
/// Content must be non-empty after trimming and at most
/// [`MAX_CONTENT_CHARS`] characters long. The content itself is stored as
/// submitted; trimming only applies to the emptiness check.
pub fn validate_content(content: &str) -> Result<(), String> {
    if content.trim().is_empty() {
        return Err("Comment content cannot be empty".to_string());
    }
    let length = content.chars().count();
    if length > MAX_CONTENT_CHARS {
        return Err(format!(
            "Comment content is too long: {} characters (max {})",
            length, MAX_CONTENT_CHARS
        ));
    }
    Ok(())
}
