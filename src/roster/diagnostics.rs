//! Structured record of the failures stores recover from on their own.
//!
//! Stores never return errors to their callers. When they fall back to a
//! default, or fail to persist, they push a [`Diagnostic`] here and emit it
//! through the `log` facade. Nothing reads the sink to make decisions; it
//! exists so callers and tests can see what was swallowed.

use log::{error, warn};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The persisted user list was not a JSON array of users.
    UsersDecodeFailed { raw: String, error: String },
    /// The persisted next id was not a decimal integer.
    NextIdParseFailed { raw: String, error: String },
    StorageReadFailed { key: String, error: String },
    StorageWriteFailed { key: String, error: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UsersDecodeFailed { error, .. } => {
                write!(f, "Error parsing stored users: {}", error)
            }
            Diagnostic::NextIdParseFailed { raw, error } => {
                write!(f, "Error parsing stored nextId '{}': {}", raw, error)
            }
            Diagnostic::StorageReadFailed { key, error } => {
                write!(f, "Could not read '{}' from storage: {}", key, error)
            }
            Diagnostic::StorageWriteFailed { key, error } => {
                write!(f, "Could not write '{}' to storage: {}", key, error)
            }
        }
    }
}

/// Shared, append-only sink. Clones point at the same list.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    events: Rc<RefCell<Vec<Diagnostic>>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::UsersDecodeFailed { .. } | Diagnostic::NextIdParseFailed { .. } => {
                error!("{}", diagnostic)
            }
            Diagnostic::StorageReadFailed { .. } | Diagnostic::StorageWriteFailed { .. } => {
                warn!("{}", diagnostic)
            }
        }
        self.events.borrow_mut().push(diagnostic);
    }

    pub fn events(&self) -> Vec<Diagnostic> {
        self.events.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }
}
