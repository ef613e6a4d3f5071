use anyhow::Context;

use crate::api::UserId;

pub const DEFAULT_STORAGE_KEY: &str = "newsComments";

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Key holding every article's comments
    pub storage_key: String,

    pub seed: SeedConfig,
}

/// Demo thread put on the first article of the catalog
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct SeedConfig {
    pub enabled: bool,

    /// Writes the top-level comment
    pub author: UserId,

    /// Likes the top-level comment and replies to it
    pub replier: UserId,

    pub comment: String,
    pub reply: String,
}

impl Default for StoreConfig {
    fn default() -> StoreConfig {
        StoreConfig {
            storage_key: String::from(DEFAULT_STORAGE_KEY),
            seed: SeedConfig::default(),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> SeedConfig {
        SeedConfig {
            enabled: true,
            author: UserId::new("user_1"),
            replier: UserId::new("user_2"),
            comment: String::from(
                "A very informative report. I liked the author's analytical style of writing.",
            ),
            reply: String::from(
                "I agree with you. The last paragraph in particular is very important.",
            ),
        }
    }
}

impl StoreConfig {
    pub fn from_json(s: &str) -> anyhow::Result<StoreConfig> {
        serde_json::from_str(s).context("parsing comment store configuration")
    }

    pub fn without_seed() -> StoreConfig {
        let mut res = StoreConfig::default();
        res.seed.enabled = false;
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg = StoreConfig::from_json(r#"{"seed": {"enabled": false}}"#).unwrap();
        assert_eq!(cfg.storage_key, DEFAULT_STORAGE_KEY);
        assert!(!cfg.seed.enabled);
        assert_eq!(cfg.seed.author, UserId::new("user_1"));

        let cfg = StoreConfig::from_json(r#"{"storage_key": "comments-v2"}"#).unwrap();
        assert_eq!(cfg.storage_key, "comments-v2");
        assert!(cfg.seed.enabled);
    }

    #[test]
    fn rejects_malformed() {
        assert!(StoreConfig::from_json("{").is_err());
        assert!(StoreConfig::from_json(r#"{"seed": {"enabled": "yes"}}"#).is_err());
    }
}
