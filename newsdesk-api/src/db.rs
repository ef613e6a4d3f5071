use std::collections::HashSet;

use crate::{Article, ArticleId, UserId, UserProfile};

/// Process-local key-value medium, with atomicity for single keys only
pub trait Storage {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

pub trait UserDirectory {
    /// Unknown ids are left out of the result
    fn resolve_users(&self, ids: &HashSet<UserId>) -> Vec<UserProfile>;

    fn user(&self, id: &UserId) -> Option<UserProfile> {
        let mut ids = HashSet::new();
        ids.insert(id.clone());
        self.resolve_users(&ids).into_iter().next()
    }
}

pub trait ContentCatalog {
    fn list_articles(&self) -> anyhow::Result<Vec<Article>>;

    fn first_article(&self) -> anyhow::Result<Option<ArticleId>> {
        Ok(self.list_articles()?.into_iter().next().map(|a| a.id))
    }
}
