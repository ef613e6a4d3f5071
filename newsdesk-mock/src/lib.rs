use std::collections::{BTreeMap, HashMap, HashSet};

use anyhow::anyhow;
use newsdesk_api::{Article, ArticleId, ContentCatalog, Storage, UserDirectory, UserId, UserProfile};

/// In-memory storage medium whose reads and writes can be made to fail
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> MemoryStorage {
        MemoryStorage::default()
    }

    /// Bypasses failure injection, for setting up corrupted or foreign data
    pub fn insert_raw(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(|v| v as &str)
    }

    /// Number of successful writes so far
    pub fn test_num_writes(&self) -> usize {
        self.writes
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        if self.fail_reads {
            return Err(anyhow!("medium unavailable while reading {key:?}"));
        }
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        if self.fail_writes {
            return Err(anyhow!("quota exceeded while writing {key:?}"));
        }
        self.items.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MockDirectory(HashMap<UserId, UserProfile>);

impl MockDirectory {
    pub fn new() -> MockDirectory {
        MockDirectory::default()
    }

    /// user_1, user_2 and user_3
    pub fn demo() -> MockDirectory {
        let mut res = MockDirectory::new();
        for (id, name) in [("user_1", "rahim"), ("user_2", "karim"), ("user_3", "nadia")] {
            res.add_user(id, name);
        }
        res
    }

    pub fn add_user(&mut self, id: &str, username: &str) -> UserId {
        let id = UserId::new(id);
        self.0.insert(
            id.clone(),
            UserProfile {
                id: id.clone(),
                username: username.to_string(),
                profile_picture: format!("https://i.pravatar.cc/150?u={id}"),
            },
        );
        id
    }
}

impl UserDirectory for MockDirectory {
    fn resolve_users(&self, ids: &HashSet<UserId>) -> Vec<UserProfile> {
        ids.iter().filter_map(|id| self.0.get(id)).cloned().collect()
    }
}

#[derive(Debug, Default)]
pub struct MockCatalog {
    pub articles: Vec<Article>,
    pub unavailable: bool,
}

impl MockCatalog {
    pub fn new(articles: Vec<Article>) -> MockCatalog {
        MockCatalog {
            articles,
            unavailable: false,
        }
    }

    /// Three articles, article-1 first
    pub fn demo() -> MockCatalog {
        MockCatalog::new(
            (1..=3)
                .map(|i| Article {
                    id: ArticleId(format!("article-{i}")),
                    title: format!("Headline number {i}"),
                })
                .collect(),
        )
    }
}

impl ContentCatalog for MockCatalog {
    fn list_articles(&self) -> anyhow::Result<Vec<Article>> {
        if self.unavailable {
            return Err(anyhow!("content generation service unavailable"));
        }
        Ok(self.articles.clone())
    }
}
