//! # Reactive Container
//!
//! [`Writable`] is the single primitive every store is built from: a value,
//! a setter, and a list of subscribers that are called synchronously on every
//! change.
//!
//! The model is single-threaded. State lives behind `Rc<RefCell<..>>`, so a
//! `Writable` is cheap to clone and every clone observes the same value.
//!
//! ## Delivery Rules
//!
//! - `subscribe` calls the new subscriber once, immediately, with the current value.
//! - `set` and `update` notify every subscriber, even when the new value equals the old.
//! - Subscribers receive a snapshot of the value taken after the change, so they
//!   may call `set` or `subscribe` on the same container without a borrow conflict.
//! - Dropping the returned [`Subscription`] removes the subscriber.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Subscriber<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<(usize, Subscriber<T>)>>,
    next_id: Cell<usize>,
}

pub struct Writable<T> {
    inner: Rc<Inner<T>>,
}

impl<T: Clone + 'static> Writable<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(initial),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Read the value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    pub fn set(&self, value: T) {
        *self.inner.value.borrow_mut() = value;
        self.notify();
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        {
            let mut value = self.inner.value.borrow_mut();
            f(&mut value);
        }
        self.notify();
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        let callback: Subscriber<T> = Rc::new(callback);
        self.inner
            .subscribers
            .borrow_mut()
            .push((id, Rc::clone(&callback)));

        callback(&self.get());

        let weak = Rc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.subscribers.borrow_mut().retain(|(sid, _)| *sid != id);
                }
            })),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    /// A handle that does not keep the state alive; used by listeners that
    /// outlive the store's owner, such as OS preference watchers.
    pub fn downgrade(&self) -> WeakWritable<T> {
        WeakWritable {
            inner: Rc::downgrade(&self.inner),
        }
    }

    fn notify(&self) {
        let snapshot = self.get();
        let subscribers: Vec<Subscriber<T>> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|(_, s)| Rc::clone(s))
            .collect();
        for subscriber in subscribers {
            subscriber(&snapshot);
        }
    }
}

impl<T> Clone for Writable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

pub struct WeakWritable<T> {
    inner: Weak<Inner<T>>,
}

impl<T> WeakWritable<T> {
    pub fn upgrade(&self) -> Option<Writable<T>> {
        self.inner.upgrade().map(|inner| Writable { inner })
    }
}

impl<T> Clone for WeakWritable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

/// Keeps a subscriber registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl Fn(&T) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |v: &T| sink.borrow_mut().push(v.clone()))
    }

    #[test]
    fn subscribe_delivers_current_value_immediately() {
        let store = Writable::new(1);
        let (seen, cb) = recorder();
        let _sub = store.subscribe(cb);
        assert_eq!(*seen.borrow(), vec![1]);
    }

    #[test]
    fn set_and_update_notify_every_time() {
        let store = Writable::new(0);
        let (seen, cb) = recorder();
        let _sub = store.subscribe(cb);

        store.set(5);
        store.update(|v| *v += 1);
        store.set(6);

        assert_eq!(*seen.borrow(), vec![0, 5, 6, 6]);
        assert_eq!(store.get(), 6);
    }

    #[test]
    fn clones_share_state() {
        let store = Writable::new(String::from("a"));
        let other = store.clone();
        other.set("b".to_string());
        assert_eq!(store.get(), "b");
        assert_eq!(store.with(|s| s.len()), 1);
    }

    #[test]
    fn dropping_subscription_stops_delivery() {
        let store = Writable::new(0);
        let (seen, cb) = recorder();
        let sub = store.subscribe(cb);
        assert_eq!(store.subscriber_count(), 1);

        drop(sub);
        store.set(9);

        assert_eq!(*seen.borrow(), vec![0]);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn explicit_unsubscribe() {
        let store = Writable::new(0);
        let (seen, cb) = recorder();
        store.subscribe(cb).unsubscribe();
        store.set(1);
        assert_eq!(*seen.borrow(), vec![0]);
    }

    #[test]
    fn subscriber_may_set_reentrantly() {
        let store = Writable::new(0);
        let handle = store.clone();
        let _clamp = store.subscribe(move |v| {
            if *v > 10 {
                handle.set(10);
            }
        });

        store.set(42);
        assert_eq!(store.get(), 10);
    }

    #[test]
    fn weak_handle_does_not_keep_state_alive() {
        let store = Writable::new(3);
        let weak = store.downgrade();
        assert_eq!(weak.upgrade().map(|s| s.get()), Some(3));
        drop(store);
        assert!(weak.upgrade().is_none());
    }
}
