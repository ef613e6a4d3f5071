use std::{
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::api::Storage;

/// All keys live in one JSON object file, replaced atomically on each write
#[derive(Clone, Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> JsonFileStorage {
        JsonFileStorage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> anyhow::Result<BTreeMap<String, String>> {
        match std::fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("parsing storage file {:?}", self.path)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e).with_context(|| format!("reading storage file {:?}", self.path)),
        }
    }
}

impl Storage for JsonFileStorage {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("creating temporary file in {dir:?}"))?;
        serde_json::to_writer(&mut tmp, &items).context("serializing storage file")?;
        tmp.persist(&self.path)
            .with_context(|| format!("replacing storage file {:?}", self.path))?;
        Ok(())
    }
}

/// The browser's local storage
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(target_arch = "wasm32")]
impl Storage for BrowserStorage {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        use gloo_storage::Storage as _;
        gloo_storage::LocalStorage::raw()
            .get_item(key)
            .map_err(|e| anyhow::anyhow!("local storage refused reading {key:?}: {e:?}"))
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        use gloo_storage::Storage as _;
        gloo_storage::LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| anyhow::anyhow!("local storage refused writing {key:?}: {e:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("creating tempdir");
        let storage = JsonFileStorage::new(dir.path().join("storage.json"));
        assert_eq!(storage.get("newsComments").unwrap(), None);
    }

    #[test]
    fn values_survive_reopening() {
        let dir = tempfile::tempdir().expect("creating tempdir");
        let path = dir.path().join("storage.json");
        {
            let mut storage = JsonFileStorage::new(&path);
            storage.set("newsComments", "[]").unwrap();
            storage.set("theme", "dark").unwrap();
            storage.set("newsComments", "[1]").unwrap();
        }
        let storage = JsonFileStorage::new(&path);
        assert_eq!(storage.get("newsComments").unwrap().as_deref(), Some("[1]"));
        assert_eq!(storage.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn corrupted_file_is_an_error() {
        let dir = tempfile::tempdir().expect("creating tempdir");
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{not json").unwrap();
        let mut storage = JsonFileStorage::new(&path);
        assert!(storage.get("newsComments").is_err());
        assert!(storage.set("newsComments", "[]").is_err());
    }
}
