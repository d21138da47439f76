use super::Display;
use std::cell::RefCell;
use std::collections::BTreeMap;

/// In-memory stand-in for a document root: a map of attributes.
///
/// The CLI reads `data-theme` back from it to pick its palette.
#[derive(Debug, Default)]
pub struct Document {
    attributes: RefCell<BTreeMap<String, String>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }
}

impl Display for Document {
    fn set_attribute(&self, name: &str, value: &str) {
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }
}
