use anyhow::Context;
use chrono::{Duration, Utc};

use crate::{
    api::{
        ArticleId, Comment, CommentId, ContentCatalog, Error as ApiError, Storage, UserDirectory,
        UserId,
    },
    ChildIndex, Error, Result, StoreConfig,
};

/// Comments of every article, kept as one flat list under a single storage key
///
/// Nothing is cached: each operation reads the whole list back from storage, so
/// writes made through another handle on the same medium are seen by the next call.
pub struct CommentStore<S, C, D> {
    storage: S,
    catalog: C,
    directory: D,
    config: StoreConfig,
}

impl<S, C, D> CommentStore<S, C, D>
where
    S: Storage,
    C: ContentCatalog,
    D: UserDirectory,
{
    pub fn new(storage: S, catalog: C, directory: D, config: StoreConfig) -> Self {
        CommentStore {
            storage,
            catalog,
            directory,
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    fn load(&self) -> Result<Vec<Comment>> {
        let key = &self.config.storage_key;
        let parsed: anyhow::Result<Vec<Comment>> =
            self.storage.get(key).and_then(|raw| match raw {
                None => Ok(Vec::new()),
                Some(raw) => serde_json::from_str(&raw).context("parsing stored comments"),
            });
        parsed.map_err(|source| {
            tracing::error!(?source, %key, "failed loading comments");
            Error::StorageRead {
                key: key.clone(),
                source,
            }
        })
    }

    fn save(&mut self, comments: &[Comment]) -> Result<()> {
        let key = &self.config.storage_key;
        let written = serde_json::to_string(comments)
            .context("serializing comments")
            .and_then(|raw| self.storage.set(key, &raw));
        written.map_err(|source| {
            tracing::error!(
                ?source,
                %key,
                num_comments = comments.len(),
                "failed saving comments"
            );
            Error::StorageWrite {
                key: key.clone(),
                source,
            }
        })
    }

    /// Puts the demo thread on the catalog's first article, if it has no comment yet
    ///
    /// This runs again whenever that article ends up empty, e.g. after its
    /// comments were all deleted. Returns whether anything was added. Does not save.
    fn seed(&self, article: &ArticleId, comments: &mut Vec<Comment>) -> bool {
        let seed = &self.config.seed;
        if !seed.enabled || comments.iter().any(|c| c.article_id == *article) {
            return false;
        }
        match self.catalog.first_article() {
            Ok(Some(first)) if first == *article => (),
            Ok(_) => return false,
            Err(err) => {
                tracing::warn!(?err, %article, "could not list articles, not seeding comments");
                return false;
            }
        }
        if self.directory.user(&seed.author).is_none()
            || self.directory.user(&seed.replier).is_none()
        {
            tracing::debug!(
                author = %seed.author,
                replier = %seed.replier,
                "seed users are unknown, not seeding comments"
            );
            return false;
        }

        let now = Utc::now();
        let top = Comment {
            id: CommentId::generate(),
            article_id: article.clone(),
            author_id: seed.author.clone(),
            content: seed.comment.clone(),
            parent_id: None,
            timestamp: now - Duration::minutes(15),
            like_user_ids: vec![seed.replier.clone()],
        };
        let reply = Comment {
            id: CommentId::generate(),
            article_id: article.clone(),
            author_id: seed.replier.clone(),
            content: seed.reply.clone(),
            parent_id: Some(top.id.clone()),
            timestamp: now - Duration::minutes(5),
            like_user_ids: Vec::new(),
        };
        tracing::info!(%article, "seeding demo comments");
        comments.push(top);
        comments.push(reply);
        true
    }

    /// Loads everything, seeding `article` first when it is eligible
    fn load_for(&mut self, article: &ArticleId) -> Result<Vec<Comment>> {
        let mut comments = self.load()?;
        if self.seed(article, &mut comments) {
            self.save(&comments)?;
        }
        Ok(comments)
    }

    /// All comments of `article`, at every depth, in storage order
    pub fn list_for_article(&mut self, article: &ArticleId) -> Result<Vec<Comment>> {
        let mut comments = self.load_for(article)?;
        comments.retain(|c| c.article_id == *article);
        Ok(comments)
    }

    pub fn count_for_article(&mut self, article: &ArticleId) -> Result<usize> {
        Ok(self.list_for_article(article)?.len())
    }

    pub fn get(&self, id: &CommentId) -> Result<Option<Comment>> {
        Ok(self.load()?.into_iter().find(|c| c.id == *id))
    }

    pub fn add(
        &mut self,
        article: &ArticleId,
        author: &UserId,
        content: &str,
        parent: Option<&CommentId>,
    ) -> Result<Comment> {
        let content = content.trim();
        if content.is_empty() {
            return Err(Error::empty_content());
        }
        let mut comments = self.load_for(article)?;
        if let Some(parent) = parent {
            match comments.iter().find(|c| c.id == *parent) {
                None => return Err(ApiError::UnknownParent(parent.clone()).into()),
                Some(p) if p.article_id != *article => {
                    return Err(ApiError::ParentInOtherArticle {
                        parent: parent.clone(),
                        article: article.clone(),
                    }
                    .into())
                }
                Some(_) => (),
            }
        }
        let comment = Comment::now(
            article.clone(),
            author.clone(),
            content.to_string(),
            parent.cloned(),
        );
        comments.push(comment.clone());
        self.save(&comments)?;
        tracing::debug!(comment = %comment.id, %article, %author, "added comment");
        Ok(comment)
    }

    /// Replaces the content of a comment. Only its author may do so.
    pub fn update(&mut self, actor: &UserId, id: &CommentId, new_content: &str) -> Result<()> {
        let mut comments = self.load()?;
        let comment = match comments.iter_mut().find(|c| c.id == *id) {
            Some(c) => c,
            None => {
                tracing::debug!(comment = %id, "ignoring update of unknown comment");
                return Ok(());
            }
        };
        if comment.author_id != *actor {
            return Err(Error::permission_denied());
        }
        let new_content = new_content.trim();
        if new_content.is_empty() {
            return Err(Error::empty_content());
        }
        comment.content = new_content.to_string();
        self.save(&comments)
    }

    /// Removes a comment along with all its replies. Only its author may do so.
    pub fn delete(&mut self, actor: &UserId, id: &CommentId) -> Result<()> {
        let mut comments = self.load()?;
        match comments.iter().find(|c| c.id == *id) {
            None => {
                tracing::debug!(comment = %id, "ignoring deletion of unknown comment");
                return Ok(());
            }
            Some(c) if c.author_id != *actor => return Err(Error::permission_denied()),
            Some(_) => (),
        }
        let doomed = ChildIndex::build(comments.iter()).descendants(id);
        comments.retain(|c| !doomed.contains(&c.id));
        tracing::debug!(comment = %id, num_removed = doomed.len(), "deleted comment");
        self.save(&comments)
    }

    pub fn toggle_like(&mut self, id: &CommentId, user: &UserId) -> Result<()> {
        let mut comments = self.load()?;
        match comments.iter_mut().find(|c| c.id == *id) {
            Some(c) => {
                c.toggle_like(user);
            }
            None => {
                tracing::debug!(comment = %id, "ignoring like of unknown comment");
                return Ok(());
            }
        }
        self.save(&comments)
    }
}
