//! # Storage Layer
//!
//! Persistence is an injected collaborator: a string-keyed, string-valued map
//! scoped to one application origin, the same shape as a browser's
//! `localStorage`. The [`KeyValueStore`] trait is the seam; stores never know
//! which implementation they are talking to.
//!
//! ## Keys
//!
//! | Key | Value | Owner |
//! |-----|-------|-------|
//! | `theme` | `"light"` or `"dark"` | `ThemeStore` |
//! | `users` | JSON array of users | `UserStore` |
//! | `nextId` | decimal integer | `NextIdStore` |
//!
//! Keys are disjoint, so writes from different stores never conflict. There
//! is no transaction spanning keys; the last writer wins.
//!
//! ## Implementations
//!
//! - [`memory::MemStorage`]: in-memory map for tests and headless runs.
//! - [`fs::FsStorage`]: a JSON object file per origin, re-read on every access
//!   so separate processes see each other's writes.
//! - `browser::LocalStorage` (feature `browser`): the page's `localStorage`.

use crate::error::Result;

pub mod fs;
pub mod memory;

#[cfg(feature = "browser")]
pub mod browser;

pub const THEME_KEY: &str = "theme";
pub const USERS_KEY: &str = "users";
pub const NEXT_ID_KEY: &str = "nextId";

/// Abstract interface for origin-scoped key-value persistence.
///
/// All methods take `&self`; implementations use interior mutability since
/// the stores are single-threaded and share one backend.
pub trait KeyValueStore {
    /// Returns `Ok(None)` when the key has never been written or was removed.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}
