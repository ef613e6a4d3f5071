use anyhow::{anyhow, Context};
use serde_json::json;

use crate::{ArticleId, CommentId};

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Permission denied")]
    PermissionDenied,

    #[error("Comment content is empty")]
    EmptyContent,

    #[error("Unknown parent comment {0}")]
    UnknownParent(CommentId),

    #[error("Parent comment {parent} does not belong to article {article}")]
    ParentInOtherArticle {
        parent: CommentId,
        article: ArticleId,
    },
}

impl Error {
    pub fn contents(&self) -> Vec<u8> {
        serde_json::to_vec(&match self {
            Error::PermissionDenied => json!({
                "message": "permission denied",
                "type": "permission-denied",
            }),
            Error::EmptyContent => json!({
                "message": "comment content is empty",
                "type": "empty-content",
            }),
            Error::UnknownParent(p) => json!({
                "message": "unknown parent comment",
                "type": "unknown-parent",
                "parent": p,
            }),
            Error::ParentInOtherArticle { parent, article } => json!({
                "message": "parent comment belongs to another article",
                "type": "parent-in-other-article",
                "parent": parent,
                "article": article,
            }),
        })
        .expect("serializing error contents")
    }

    pub fn parse(body: &[u8]) -> anyhow::Result<Error> {
        let data: serde_json::Value =
            serde_json::from_slice(body).context("parsing error contents")?;
        let string_field = |name: &str| {
            data.get(name)
                .and_then(|v| v.as_str())
                .map(String::from)
                .ok_or_else(|| anyhow!("error contents is missing string field {name:?}"))
        };
        Ok(
            match data
                .get("type")
                .and_then(|t| t.as_str())
                .ok_or_else(|| anyhow!("error type is not a string"))?
            {
                "permission-denied" => Error::PermissionDenied,
                "empty-content" => Error::EmptyContent,
                "unknown-parent" => Error::UnknownParent(CommentId(string_field("parent")?)),
                "parent-in-other-article" => Error::ParentInOtherArticle {
                    parent: CommentId(string_field("parent")?),
                    article: ArticleId(string_field("article")?),
                },
                _ => return Err(anyhow!("error contents has unknown type")),
            },
        )
    }
}
