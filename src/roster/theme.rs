//! # Theme Store
//!
//! Holds the light/dark preference.
//!
//! ## Initialization
//!
//! 1. No storage on the platform (non-interactive context): `light`.
//! 2. A persisted `theme` of exactly `"light"` or `"dark"`: that value.
//! 3. Otherwise the OS preference, if the platform has one.
//! 4. Otherwise `light`.
//!
//! ## Write-through
//!
//! Every value the store takes, the initial one included, is written to the
//! display as `data-theme` and persisted under `theme`. Write failures are
//! recorded as diagnostics and otherwise ignored.
//!
//! ## OS Changes
//!
//! The store follows OS preference changes only while storage holds no
//! `theme` key (an empty string counts as none). Any other persisted value,
//! even one that is not a valid theme, counts as an explicit choice.
//! Because initialization persists its result, OS changes are ignored
//! until something removes the key
//! (see [`ThemeStore::clear_preference`]).

use crate::model::Theme;
use crate::platform::Platform;
use crate::reactive::{Subscription, Writable};
use crate::store::THEME_KEY;
use log::debug;

pub const THEME_ATTRIBUTE: &str = "data-theme";

pub struct ThemeStore {
    value: Writable<Theme>,
    platform: Platform,
    _write_through: Subscription,
}

impl ThemeStore {
    pub fn init(platform: &Platform) -> Self {
        let value = Writable::new(load_theme(platform));

        let sink = platform.detached();
        let write_through = value.subscribe(move |theme: &Theme| {
            sink.set_display_attribute(THEME_ATTRIBUTE, theme.as_str());
            sink.write_item(THEME_KEY, theme.as_str());
        });

        if platform.has_storage() {
            if let Some(source) = platform.color_scheme() {
                let target = value.downgrade();
                let storage = platform.detached();
                source.watch(Box::new(move |dark: bool| {
                    let Some(store) = target.upgrade() else {
                        return;
                    };
                    if stored_choice(&storage).is_some() {
                        debug!("OS prefers dark={}, keeping explicit theme", dark);
                        return;
                    }
                    store.set(Theme::from_dark(dark));
                }));
            }
        }

        Self {
            value,
            platform: platform.clone(),
            _write_through: write_through,
        }
    }

    pub fn get(&self) -> Theme {
        self.value.get()
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Theme) + 'static,
    {
        self.value.subscribe(callback)
    }

    /// Setting the current value again is allowed; it repeats the writes.
    pub fn set(&self, theme: Theme) {
        self.value.set(theme);
    }

    pub fn toggle(&self) -> Theme {
        let next = self.get().toggled();
        self.set(next);
        next
    }

    /// Whether storage holds a non-empty `theme` value, valid or not.
    pub fn has_explicit_choice(&self) -> bool {
        stored_choice(&self.platform).is_some()
    }

    /// Remove the persisted choice so the next OS change is applied again.
    /// The current value is left as is.
    pub fn clear_preference(&self) {
        self.platform.remove_item(THEME_KEY);
    }

    pub fn os_prefers_dark(&self) -> Option<bool> {
        self.platform.color_scheme().map(|s| s.prefers_dark())
    }
}

fn stored_choice(platform: &Platform) -> Option<String> {
    platform.read_item(THEME_KEY).filter(|value| !value.is_empty())
}

fn load_theme(platform: &Platform) -> Theme {
    if !platform.has_storage() {
        return Theme::Light;
    }
    if let Some(stored) = platform.read_item(THEME_KEY) {
        match stored.parse::<Theme>() {
            Ok(theme) => return theme,
            Err(_) => debug!("Stored theme {:?} is not a theme, using OS preference", stored),
        }
    }
    platform
        .color_scheme()
        .map(|source| Theme::from_dark(source.prefers_dark()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostic;
    use crate::platform::document::Document;
    use crate::platform::scheme::ManualScheme;
    use crate::store::memory::MemStorage;
    use crate::store::KeyValueStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Fixture {
        storage: Rc<MemStorage>,
        scheme: Rc<ManualScheme>,
        document: Rc<Document>,
        platform: Platform,
    }

    fn fixture(storage: MemStorage, os_dark: bool) -> Fixture {
        let storage = Rc::new(storage);
        let scheme = Rc::new(ManualScheme::new(os_dark));
        let document = Rc::new(Document::new());
        let platform = Platform::headless()
            .with_storage(storage.clone())
            .with_color_scheme(scheme.clone())
            .with_display(document.clone());
        Fixture {
            storage,
            scheme,
            document,
            platform,
        }
    }

    fn stored(f: &Fixture) -> Option<String> {
        f.storage.get_item(THEME_KEY).unwrap()
    }

    #[test]
    fn valid_persisted_value_wins_over_os() {
        for (raw, expected, os_dark) in [("light", Theme::Light, true), ("dark", Theme::Dark, false)] {
            let f = fixture(MemStorage::new().with_item(THEME_KEY, raw), os_dark);
            assert_eq!(ThemeStore::init(&f.platform).get(), expected);
        }
    }

    #[test]
    fn absent_value_uses_os_preference() {
        let f = fixture(MemStorage::new(), true);
        assert_eq!(ThemeStore::init(&f.platform).get(), Theme::Dark);

        let f = fixture(MemStorage::new(), false);
        assert_eq!(ThemeStore::init(&f.platform).get(), Theme::Light);
    }

    #[test]
    fn invalid_value_uses_os_preference() {
        for raw in ["Dark", "", "blue", "\"dark\""] {
            let f = fixture(MemStorage::new().with_item(THEME_KEY, raw), true);
            assert_eq!(ThemeStore::init(&f.platform).get(), Theme::Dark, "raw={:?}", raw);
        }
    }

    #[test]
    fn no_os_source_falls_back_to_light() {
        let storage = Rc::new(MemStorage::new().with_item(THEME_KEY, "nope"));
        let platform = Platform::headless().with_storage(storage);
        assert_eq!(ThemeStore::init(&platform).get(), Theme::Light);
    }

    #[test]
    fn no_storage_is_light_even_if_os_is_dark() {
        let scheme = Rc::new(ManualScheme::new(true));
        let platform = Platform::headless().with_color_scheme(scheme.clone());
        let store = ThemeStore::init(&platform);
        assert_eq!(store.get(), Theme::Light);
        assert_eq!(scheme.listener_count(), 0);
    }

    #[test]
    fn initialization_writes_through() {
        let f = fixture(MemStorage::new(), true);
        let _store = ThemeStore::init(&f.platform);
        assert_eq!(f.document.attribute(THEME_ATTRIBUTE).as_deref(), Some("dark"));
        assert_eq!(stored(&f).as_deref(), Some("dark"));
    }

    #[test]
    fn set_updates_display_and_storage_together() {
        let f = fixture(MemStorage::new().with_item(THEME_KEY, "light"), false);
        let store = ThemeStore::init(&f.platform);

        store.set(Theme::Dark);
        assert_eq!(f.document.attribute(THEME_ATTRIBUTE).as_deref(), Some("dark"));
        assert_eq!(stored(&f).as_deref(), Some("dark"));

        assert_eq!(store.toggle(), Theme::Light);
        assert_eq!(f.document.attribute(THEME_ATTRIBUTE).as_deref(), Some("light"));
        assert_eq!(stored(&f).as_deref(), Some("light"));
    }

    #[test]
    fn setting_current_value_changes_nothing_observable() {
        let f = fixture(MemStorage::new().with_item(THEME_KEY, "dark"), false);
        let store = ThemeStore::init(&f.platform);
        store.set(Theme::Dark);
        assert_eq!(store.get(), Theme::Dark);
        assert_eq!(stored(&f).as_deref(), Some("dark"));
        assert_eq!(f.document.attribute(THEME_ATTRIBUTE).as_deref(), Some("dark"));
    }

    #[test]
    fn subscribers_get_current_value_then_changes() {
        let f = fixture(MemStorage::new().with_item(THEME_KEY, "light"), false);
        let store = ThemeStore::init(&f.platform);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = store.subscribe(move |t| sink.borrow_mut().push(*t));

        store.set(Theme::Dark);
        assert_eq!(*seen.borrow(), vec![Theme::Light, Theme::Dark]);
    }

    #[test]
    fn os_change_is_ignored_while_a_value_is_persisted() {
        let f = fixture(MemStorage::new(), false);
        let store = ThemeStore::init(&f.platform);
        assert!(store.has_explicit_choice());

        f.scheme.set_dark(true);
        assert_eq!(store.get(), Theme::Light);

        // Content does not matter, only presence.
        f.storage.set_item(THEME_KEY, "purple").unwrap();
        f.scheme.set_dark(false);
        f.scheme.set_dark(true);
        assert_eq!(store.get(), Theme::Light);
    }

    #[test]
    fn empty_persisted_value_does_not_block_os_changes() {
        let f = fixture(MemStorage::new(), false);
        let store = ThemeStore::init(&f.platform);
        f.storage.set_item(THEME_KEY, "").unwrap();
        assert!(!store.has_explicit_choice());

        f.scheme.set_dark(true);
        assert_eq!(store.get(), Theme::Dark);
    }

    #[test]
    fn os_change_applies_after_preference_is_cleared() {
        let f = fixture(MemStorage::new().with_item(THEME_KEY, "light"), false);
        let store = ThemeStore::init(&f.platform);

        store.clear_preference();
        assert!(!store.has_explicit_choice());
        assert_eq!(store.get(), Theme::Light);

        f.scheme.set_dark(true);
        assert_eq!(store.get(), Theme::Dark);
        assert_eq!(f.document.attribute(THEME_ATTRIBUTE).as_deref(), Some("dark"));
        // Applying the OS value persists it, which pins it again.
        assert_eq!(stored(&f).as_deref(), Some("dark"));

        f.scheme.set_dark(false);
        assert_eq!(store.get(), Theme::Dark);
    }

    #[test]
    fn dropped_store_ignores_os_changes() {
        let f = fixture(MemStorage::new(), false);
        let store = ThemeStore::init(&f.platform);
        drop(store);
        f.storage.remove_item(THEME_KEY).unwrap();
        f.scheme.set_dark(true);
        assert_eq!(stored(&f), None);
    }

    #[test]
    fn write_failures_are_recorded_not_raised() {
        let f = fixture(MemStorage::new(), false);
        f.storage.set_simulate_write_error(true);
        let store = ThemeStore::init(&f.platform);
        store.set(Theme::Dark);

        assert_eq!(store.get(), Theme::Dark);
        assert_eq!(f.document.attribute(THEME_ATTRIBUTE).as_deref(), Some("dark"));
        let events = f.platform.diagnostics().events();
        assert_eq!(events.len(), 2);
        assert!(events
            .iter()
            .all(|e| matches!(e, Diagnostic::StorageWriteFailed { key, .. } if key == THEME_KEY)));
    }

    #[test]
    fn reports_os_preference() {
        let f = fixture(MemStorage::new(), true);
        let store = ThemeStore::init(&f.platform);
        assert_eq!(store.os_prefers_dark(), Some(true));
        assert_eq!(ThemeStore::init(&Platform::headless()).os_prefers_dark(), None);
    }
}
