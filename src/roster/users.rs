//! # User Stores
//!
//! [`UserStore`] holds the ordered user list and [`NextIdStore`] the counter
//! used to number new users. Both only hold and persist state: adding,
//! editing and deleting users, and advancing the counter, is done by the
//! command layer.
//!
//! Both load from storage once at init, falling back to the seed data when
//! the key is missing or unreadable, and write the full value back on every
//! change. A value that is present but cannot be decoded is reported as a
//! [`Diagnostic`] before falling back.

use crate::diagnostics::Diagnostic;
use crate::model::{Role, User};
use crate::platform::Platform;
use crate::reactive::{Subscription, Writable};
use crate::store::{NEXT_ID_KEY, USERS_KEY};
use log::warn;
use once_cell::sync::Lazy;

/// One past the highest seed id.
pub const DEFAULT_NEXT_ID: u64 = 5;

static DEFAULT_USERS: Lazy<Vec<User>> = Lazy::new(|| {
    vec![
        User::new(1, "John Doe", "john@example.com", Role::Admin),
        User::new(2, "Jane Smith", "jane@example.com", Role::User),
        User::new(3, "Bob Johnson", "bob@example.com", Role::Editor),
        User::new(4, "Alice Brown", "alice@example.com", Role::User),
    ]
});

pub fn default_users() -> Vec<User> {
    DEFAULT_USERS.clone()
}

pub struct UserStore {
    value: Writable<Vec<User>>,
    _write_through: Subscription,
}

impl UserStore {
    pub fn init(platform: &Platform) -> Self {
        let value = Writable::new(load_users(platform));
        let sink = platform.detached();
        let write_through = value.subscribe(move |users: &Vec<User>| {
            match serde_json::to_string(users) {
                Ok(json) => sink.write_item(USERS_KEY, &json),
                Err(e) => warn!("Could not encode users: {}", e),
            }
        });
        Self {
            value,
            _write_through: write_through,
        }
    }

    pub fn get(&self) -> Vec<User> {
        self.value.get()
    }

    pub fn with<R>(&self, f: impl FnOnce(&[User]) -> R) -> R {
        self.value.with(|users| f(users))
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Vec<User>) + 'static,
    {
        self.value.subscribe(callback)
    }

    pub fn set(&self, users: Vec<User>) {
        self.value.set(users);
    }

    pub fn update(&self, f: impl FnOnce(&mut Vec<User>)) {
        self.value.update(f);
    }
}

pub struct NextIdStore {
    value: Writable<u64>,
    _write_through: Subscription,
}

impl NextIdStore {
    pub fn init(platform: &Platform) -> Self {
        let value = Writable::new(load_next_id(platform));
        let sink = platform.detached();
        let write_through = value.subscribe(move |next: &u64| {
            sink.write_item(NEXT_ID_KEY, &next.to_string());
        });
        Self {
            value,
            _write_through: write_through,
        }
    }

    pub fn get(&self) -> u64 {
        self.value.get()
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&u64) + 'static,
    {
        self.value.subscribe(callback)
    }

    pub fn set(&self, next: u64) {
        self.value.set(next);
    }

    pub fn update(&self, f: impl FnOnce(&mut u64)) {
        self.value.update(f);
    }
}

fn load_users(platform: &Platform) -> Vec<User> {
    let Some(raw) = platform.read_item(USERS_KEY).filter(|raw| !raw.is_empty()) else {
        return default_users();
    };
    match serde_json::from_str::<Vec<User>>(&raw) {
        Ok(users) => users,
        Err(e) => {
            platform.diagnostics().record(Diagnostic::UsersDecodeFailed {
                raw,
                error: e.to_string(),
            });
            default_users()
        }
    }
}

fn load_next_id(platform: &Platform) -> u64 {
    let Some(raw) = platform.read_item(NEXT_ID_KEY).filter(|raw| !raw.is_empty()) else {
        return DEFAULT_NEXT_ID;
    };
    match raw.trim().parse::<u64>() {
        Ok(next) => next,
        Err(e) => {
            platform.diagnostics().record(Diagnostic::NextIdParseFailed {
                raw,
                error: e.to_string(),
            });
            DEFAULT_NEXT_ID
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemStorage;
    use crate::store::KeyValueStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn platform_with(storage: MemStorage) -> (Rc<MemStorage>, Platform) {
        let storage = Rc::new(storage);
        let platform = Platform::headless().with_storage(storage.clone());
        (storage, platform)
    }

    fn ids(users: &[User]) -> Vec<u64> {
        users.iter().map(|u| u.id).collect()
    }

    #[test]
    fn seed_data_is_fixed() {
        let users = default_users();
        assert_eq!(ids(&users), vec![1, 2, 3, 4]);
        assert_eq!(users[0], User::new(1, "John Doe", "john@example.com", Role::Admin));
        assert_eq!(users[2].role, Role::Editor);
        assert_eq!(users[3].email, "alice@example.com");
    }

    #[test]
    fn missing_users_use_seed_and_persist_it() {
        let (storage, platform) = platform_with(MemStorage::new());
        let store = UserStore::init(&platform);

        assert_eq!(store.get(), default_users());
        let persisted = storage.get_item(USERS_KEY).unwrap().unwrap();
        let decoded: Vec<User> = serde_json::from_str(&persisted).unwrap();
        assert_eq!(decoded, default_users());
        assert!(platform.diagnostics().is_empty());
    }

    #[test]
    fn headless_uses_seed() {
        let store = UserStore::init(&Platform::headless());
        assert_eq!(ids(&store.get()), vec![1, 2, 3, 4]);
        assert_eq!(NextIdStore::init(&Platform::headless()).get(), DEFAULT_NEXT_ID);
    }

    #[test]
    fn malformed_users_fall_back_and_are_reported() {
        for raw in ["{not json", "42", r#"[{"id":1}]"#, r#"{"id":1,"name":"x"}"#] {
            let (_, platform) = platform_with(MemStorage::new().with_item(USERS_KEY, raw));
            let store = UserStore::init(&platform);

            assert_eq!(ids(&store.get()), vec![1, 2, 3, 4], "raw={:?}", raw);
            let events = platform.diagnostics().events();
            assert_eq!(events.len(), 1);
            assert!(
                matches!(&events[0], Diagnostic::UsersDecodeFailed { raw: r, .. } if r == raw)
            );
        }
    }

    #[test]
    fn empty_string_is_treated_as_absent() {
        let (_, platform) = platform_with(MemStorage::new().with_item(USERS_KEY, ""));
        let store = UserStore::init(&platform);
        assert_eq!(store.get(), default_users());
        assert!(platform.diagnostics().is_empty());
    }

    #[test]
    fn persisted_list_round_trips() {
        let list = vec![
            User::new(10, "Grace Hopper", "grace@example.com", Role::Admin),
            User::new(3, "Linus", "linus@example.com", Role::Editor),
        ];
        let (storage, platform) = platform_with(MemStorage::new());
        let store = UserStore::init(&platform);
        store.set(list.clone());
        drop(store);

        let reloaded = UserStore::init(&platform);
        assert_eq!(reloaded.get(), list);

        let raw = storage.get_item(USERS_KEY).unwrap().unwrap();
        assert!(raw.starts_with('['));
    }

    #[test]
    fn empty_list_round_trips() {
        let (_, platform) = platform_with(MemStorage::new());
        UserStore::init(&platform).set(Vec::new());
        assert!(UserStore::init(&platform).get().is_empty());
    }

    #[test]
    fn every_update_is_persisted_and_delivered() {
        let (storage, platform) = platform_with(MemStorage::new());
        let store = UserStore::init(&platform);
        let lengths = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&lengths);
        let _sub = store.subscribe(move |users| sink.borrow_mut().push(users.len()));

        store.update(|users| users.retain(|u| u.id != 2));

        assert_eq!(*lengths.borrow(), vec![4, 3]);
        let decoded: Vec<User> =
            serde_json::from_str(&storage.get_item(USERS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(ids(&decoded), vec![1, 3, 4]);
        assert_eq!(store.with(|users| users.len()), 3);
    }

    #[test]
    fn next_id_defaults_to_five() {
        let (storage, platform) = platform_with(MemStorage::new());
        assert_eq!(NextIdStore::init(&platform).get(), 5);
        assert_eq!(storage.get_item(NEXT_ID_KEY).unwrap().as_deref(), Some("5"));
    }

    #[test]
    fn next_id_loads_persisted_value() {
        let (_, platform) = platform_with(MemStorage::new().with_item(NEXT_ID_KEY, "42"));
        assert_eq!(NextIdStore::init(&platform).get(), 42);

        let (_, platform) = platform_with(MemStorage::new().with_item(NEXT_ID_KEY, " 7\n"));
        assert_eq!(NextIdStore::init(&platform).get(), 7);
    }

    #[test]
    fn malformed_next_id_falls_back_to_five() {
        for raw in ["abc", "-3", "1.5", "12abc"] {
            let (_, platform) = platform_with(MemStorage::new().with_item(NEXT_ID_KEY, raw));
            assert_eq!(NextIdStore::init(&platform).get(), 5, "raw={:?}", raw);
            assert!(matches!(
                platform.diagnostics().events().as_slice(),
                [Diagnostic::NextIdParseFailed { .. }]
            ));
        }
    }

    #[test]
    fn next_id_changes_are_written_as_decimal() {
        let (storage, platform) = platform_with(MemStorage::new());
        let store = NextIdStore::init(&platform);
        store.update(|n| *n += 1);
        store.set(100);
        assert_eq!(store.get(), 100);
        assert_eq!(storage.get_item(NEXT_ID_KEY).unwrap().as_deref(), Some("100"));
    }

    #[test]
    fn unreadable_storage_falls_back_with_read_diagnostics() {
        let storage = MemStorage::new();
        storage.set_simulate_read_error(true);
        let (_, platform) = platform_with(storage);

        assert_eq!(UserStore::init(&platform).get(), default_users());
        assert_eq!(NextIdStore::init(&platform).get(), 5);
        assert!(platform
            .diagnostics()
            .events()
            .iter()
            .all(|e| matches!(e, Diagnostic::StorageReadFailed { .. })));
    }
}
