use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Durable string key-value storage used to persist the current session.
pub trait SessionStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct StoreData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// Flat TOML table on disk. Every write is flushed immediately.
pub struct FileSessionStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            entries: HashMap::new(),
        }
    }

    /// Open the store and read whatever is already on disk.
    pub fn open(path: PathBuf) -> Result<Self> {
        let mut store = Self::new(path);
        store.load()?;
        Ok(store)
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let data: StoreData = toml::from_str(&content)?;
            self.entries = data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = StoreData {
            data: self.entries.clone(),
        };
        let content = toml::to_string_pretty(&data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.save()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    entries: HashMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
