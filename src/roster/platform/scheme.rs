use super::{ColorSchemeSource, SchemeListener};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Listeners = RefCell<Vec<Rc<dyn Fn(bool)>>>;

fn fire(listeners: &Listeners, dark: bool) {
    let snapshot: Vec<Rc<dyn Fn(bool)>> = listeners.borrow().iter().cloned().collect();
    for listener in snapshot {
        listener(dark);
    }
}

/// The desktop's light/dark setting, read through `dark-light`.
///
/// `dark-light` only answers point-in-time queries, so change notification
/// is driven by [`SystemScheme::poll`].
pub struct SystemScheme {
    last: Cell<bool>,
    listeners: Listeners,
}

impl SystemScheme {
    pub fn new() -> Self {
        Self {
            last: Cell::new(detect_dark()),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Re-query the OS. Notifies listeners and returns `true` if the
    /// preference changed since the last query.
    pub fn poll(&self) -> bool {
        let dark = detect_dark();
        if dark == self.last.replace(dark) {
            return false;
        }
        fire(&self.listeners, dark);
        true
    }
}

impl Default for SystemScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorSchemeSource for SystemScheme {
    fn prefers_dark(&self) -> bool {
        self.last.get()
    }

    fn watch(&self, listener: SchemeListener) {
        self.listeners.borrow_mut().push(Rc::from(listener));
    }
}

fn detect_dark() -> bool {
    matches!(dark_light::detect(), dark_light::Mode::Dark)
}

/// A preference flipped by hand. Used by tests and by hosts that learn about
/// the OS setting through their own channel.
pub struct ManualScheme {
    dark: Cell<bool>,
    listeners: Listeners,
}

impl ManualScheme {
    pub fn new(dark: bool) -> Self {
        Self {
            dark: Cell::new(dark),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Listeners only hear about actual changes, like a media query.
    pub fn set_dark(&self, dark: bool) {
        if self.dark.replace(dark) != dark {
            fire(&self.listeners, dark);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl ColorSchemeSource for ManualScheme {
    fn prefers_dark(&self) -> bool {
        self.dark.get()
    }

    fn watch(&self, listener: SchemeListener) {
        self.listeners.borrow_mut().push(Rc::from(listener));
    }
}
