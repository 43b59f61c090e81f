//! Post comments.
//!
//! Comments are stored as an ordered JSONB array on the post row. Each
//! comment snapshots the author's name, username and avatar at write time;
//! later profile edits do not rewrite existing comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One comment on a post, with a denormalized author snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment id, unique within the system
    pub id: Uuid,
    /// Id of the commenting user
    pub author_id: Uuid,
    /// Author display name at write time
    pub author_name: String,
    /// Author username at write time
    pub author_username: String,
    /// Author avatar URL at write time
    pub author_avatar: Option<String>,
    /// Comment body, trimmed and non-empty
    pub text: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Build a new comment with a fresh id and the given author snapshot.
    ///
    /// The caller is responsible for rejecting empty text; this constructor
    /// only trims it.
    pub fn new(
        author_id: Uuid,
        author_name: impl Into<String>,
        author_username: impl Into<String>,
        author_avatar: Option<String>,
        text: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            author_name: author_name.into(),
            author_username: author_username.into(),
            author_avatar,
            text: text.trim().to_string(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_text() {
        let comment = Comment::new(Uuid::new_v4(), "Alice", "alice", None, "  hello  ");
        assert_eq!(comment.text, "hello");
    }

    #[test]
    fn test_fresh_ids() {
        let author = Uuid::new_v4();
        let a = Comment::new(author, "Alice", "alice", None, "one");
        let b = Comment::new(author, "Alice", "alice", None, "two");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_serialization_shape() {
        let comment = Comment::new(Uuid::new_v4(), "Alice", "alice", None, "hi");
        let json = serde_json::to_value(&comment).unwrap();
        assert!(json.get("author_name").is_some());
        assert!(json.get("created_at").is_some());
        assert_eq!(json["text"], "hi");
    }
}
