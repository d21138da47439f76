use super::KeyValueStore;
use crate::error::{Result, RosterError};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// In-memory storage backend.
///
/// Uses `RefCell` for interior mutability since the stores are single-threaded.
#[derive(Default)]
pub struct MemStorage {
    items: RefCell<BTreeMap<String, String>>,
    simulate_read_error: RefCell<bool>,
    simulate_write_error: RefCell<bool>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the backend, as if a previous session had written these keys.
    pub fn with_item(self, key: &str, value: &str) -> Self {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Enable read error simulation for testing error handling.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        *self.simulate_read_error.borrow_mut() = simulate;
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        if *self.simulate_read_error.borrow() {
            return Err(RosterError::Storage("Simulated read error".to_string()));
        }
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(RosterError::Storage("Simulated write error".to_string()));
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(RosterError::Storage("Simulated write error".to_string()));
        }
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
