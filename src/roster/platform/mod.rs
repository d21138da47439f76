//! # Platform Collaborators
//!
//! Everything a store needs from its surroundings is injected through a
//! [`Platform`] instead of being sniffed from the environment:
//!
//! - **storage**: origin-scoped key-value persistence ([`KeyValueStore`])
//! - **color scheme**: the OS-level dark-mode preference and its change
//!   notifications ([`ColorSchemeSource`])
//! - **display**: the document that consumes the `data-theme` attribute
//!   ([`Display`])
//!
//! Each capability is optional. A [`Platform::headless`] value has none of
//! them, which is how non-interactive contexts are modeled: the stores fall
//! back to their defaults and skip every side effect.
//!
//! The platform also carries the shared [`Diagnostics`] sink. Storage reads
//! and writes go through [`Platform::read_item`] and [`Platform::write_item`],
//! which swallow failures into that sink so stores never see an error.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::store::KeyValueStore;
use std::rc::Rc;

pub mod document;
pub mod scheme;

#[cfg(feature = "browser")]
pub mod browser;

pub type SchemeListener = Box<dyn Fn(bool)>;

/// Read-only view of the OS "prefers dark" setting.
pub trait ColorSchemeSource {
    fn prefers_dark(&self) -> bool;

    /// Register a listener called with the new value whenever the preference
    /// changes. Listeners are never removed.
    fn watch(&self, listener: SchemeListener);
}

/// A document-level attribute sink consumed by styling.
pub trait Display {
    fn set_attribute(&self, name: &str, value: &str);
}

#[derive(Clone, Default)]
pub struct Platform {
    storage: Option<Rc<dyn KeyValueStore>>,
    color_scheme: Option<Rc<dyn ColorSchemeSource>>,
    display: Option<Rc<dyn Display>>,
    diagnostics: Diagnostics,
}

impl Platform {
    /// No storage, no OS preference, no display.
    pub fn headless() -> Self {
        Self::default()
    }

    pub fn with_storage(mut self, storage: Rc<dyn KeyValueStore>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_color_scheme(mut self, source: Rc<dyn ColorSchemeSource>) -> Self {
        self.color_scheme = Some(source);
        self
    }

    pub fn with_display(mut self, display: Rc<dyn Display>) -> Self {
        self.display = Some(display);
        self
    }

    /// Wire every capability the current browser window offers.
    #[cfg(feature = "browser")]
    pub fn browser() -> Self {
        let mut platform = Self::headless();
        if let Some(storage) = crate::store::browser::LocalStorage::from_window() {
            platform = platform.with_storage(Rc::new(storage));
        }
        if let Some(scheme) = browser::MediaQueryScheme::from_window() {
            platform = platform.with_color_scheme(Rc::new(scheme));
        }
        if let Some(root) = browser::DocumentElement::from_window() {
            platform = platform.with_display(Rc::new(root));
        }
        platform
    }

    /// A copy without the color-scheme source, for capture inside that
    /// source's own listeners.
    pub fn detached(&self) -> Self {
        Self {
            color_scheme: None,
            ..self.clone()
        }
    }

    pub fn has_storage(&self) -> bool {
        self.storage.is_some()
    }

    pub fn color_scheme(&self) -> Option<&Rc<dyn ColorSchemeSource>> {
        self.color_scheme.as_ref()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// `None` when storage is absent, the key is missing, or the read failed.
    /// Only the failure is recorded.
    pub fn read_item(&self, key: &str) -> Option<String> {
        let storage = self.storage.as_ref()?;
        match storage.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                self.diagnostics.record(Diagnostic::StorageReadFailed {
                    key: key.to_string(),
                    error: e.to_string(),
                });
                None
            }
        }
    }

    pub fn write_item(&self, key: &str, value: &str) {
        let Some(storage) = self.storage.as_ref() else {
            return;
        };
        if let Err(e) = storage.set_item(key, value) {
            self.diagnostics.record(Diagnostic::StorageWriteFailed {
                key: key.to_string(),
                error: e.to_string(),
            });
        }
    }

    pub fn remove_item(&self, key: &str) {
        let Some(storage) = self.storage.as_ref() else {
            return;
        };
        if let Err(e) = storage.remove_item(key) {
            self.diagnostics.record(Diagnostic::StorageWriteFailed {
                key: key.to_string(),
                error: e.to_string(),
            });
        }
    }

    pub fn set_display_attribute(&self, name: &str, value: &str) {
        if let Some(display) = &self.display {
            display.set_attribute(name, value);
        }
    }
}
