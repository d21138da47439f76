use super::{ColorSchemeSource, Display, SchemeListener};
use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, MediaQueryList, MediaQueryListEvent};

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

/// `window.matchMedia("(prefers-color-scheme: dark)")`.
pub struct MediaQueryScheme {
    query: MediaQueryList,
}

impl MediaQueryScheme {
    pub fn from_window() -> Option<Self> {
        let query = web_sys::window()?.match_media(DARK_QUERY).ok().flatten()?;
        Some(Self { query })
    }
}

impl ColorSchemeSource for MediaQueryScheme {
    fn prefers_dark(&self) -> bool {
        self.query.matches()
    }

    fn watch(&self, listener: SchemeListener) {
        let closure = Closure::<dyn FnMut(MediaQueryListEvent)>::new(
            move |event: MediaQueryListEvent| listener(event.matches()),
        );
        if self
            .query
            .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
            .is_err()
        {
            warn!("Could not watch {}", DARK_QUERY);
            return;
        }
        // The listener lives as long as the page.
        closure.forget();
    }
}

/// The `<html>` element.
pub struct DocumentElement {
    element: Element,
}

impl DocumentElement {
    pub fn from_window() -> Option<Self> {
        let element = web_sys::window()?.document()?.document_element()?;
        Some(Self { element })
    }
}

impl Display for DocumentElement {
    fn set_attribute(&self, name: &str, value: &str) {
        if self.element.set_attribute(name, value).is_err() {
            warn!("Could not set {}={} on the document element", name, value);
        }
    }
}
