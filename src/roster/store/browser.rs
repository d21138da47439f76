use super::KeyValueStore;
use crate::error::{Result, RosterError};
use web_sys::Storage;

/// The page's `localStorage`, scoped to the document origin by the browser.
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Returns `None` outside a window context or when storage is disabled.
    pub fn from_window() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

fn js_error(op: &str, key: &str) -> RosterError {
    RosterError::Storage(format!("localStorage.{} failed for '{}'", op, key))
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|_| js_error("getItem", key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|_| js_error("setItem", key))
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|_| js_error("removeItem", key))
    }
}
