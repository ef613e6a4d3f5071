use std::fmt;

use chrono::Utc;
use uuid::Uuid;

use crate::{ArticleId, Time, UserId};

#[derive(
    Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct CommentId(pub String);

impl CommentId {
    pub fn new(id: impl Into<String>) -> CommentId {
        CommentId(id.into())
    }

    pub fn generate() -> CommentId {
        CommentId(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub article_id: ArticleId,
    pub author_id: UserId,
    pub content: String,

    /// None for a top-level comment
    pub parent_id: Option<CommentId>,

    pub timestamp: Time,

    /// Users who liked this comment, in the order they did
    pub like_user_ids: Vec<UserId>,
}

impl Comment {
    pub fn now(
        article_id: ArticleId,
        author_id: UserId,
        content: String,
        parent_id: Option<CommentId>,
    ) -> Comment {
        Comment {
            id: CommentId::generate(),
            article_id,
            author_id,
            content,
            parent_id,
            timestamp: Utc::now(),
            like_user_ids: Vec::new(),
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_liked_by(&self, user: &UserId) -> bool {
        self.like_user_ids.contains(user)
    }

    /// Returns whether `user` now likes this comment
    pub fn toggle_like(&mut self, user: &UserId) -> bool {
        match self.like_user_ids.iter().position(|u| u == user) {
            Some(idx) => {
                self.like_user_ids.remove(idx);
                false
            }
            None => {
                self.like_user_ids.push(user.clone());
                true
            }
        }
    }
}
