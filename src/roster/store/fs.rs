use super::KeyValueStore;
use crate::error::{Result, RosterError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File-backed origin storage: one JSON object of string pairs.
///
/// The file is read on every access and never cached, so two processes
/// pointed at the same origin behave like two tabs sharing `localStorage`.
pub struct FsStorage {
    path: PathBuf,
}

impl FsStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(RosterError::Io)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let items: BTreeMap<String, String> =
            serde_json::from_str(&content).map_err(RosterError::Serialization)?;
        Ok(items)
    }

    fn save(&self, items: &BTreeMap<String, String>) -> Result<()> {
        let dir = self
            .path
            .parent()
            .ok_or_else(|| RosterError::Storage(format!("Invalid path: {}", self.path.display())))?;
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir).map_err(RosterError::Io)?;
        }

        let content = serde_json::to_string_pretty(items).map_err(RosterError::Serialization)?;

        // Write to a sibling temp file then rename, so readers never see a torn file.
        let tmp_file = dir.join(format!(".storage-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(RosterError::Io)?;
        fs::rename(&tmp_file, &self.path).map_err(RosterError::Io)?;
        Ok(())
    }
}

impl KeyValueStore for FsStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.load()?;
        if items.remove(key).is_some() {
            self.save(&items)?;
        }
        Ok(())
    }
}
