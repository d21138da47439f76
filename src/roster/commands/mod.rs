//! # Command Layer
//!
//! Business logic for everything a UI does with the stores: the record
//! create/edit/delete flows and the theme controls. Commands operate on the
//! stores and return a [`CmdResult`]; they never print.
//!
//! The stores deliberately know nothing about id allocation or validation.
//! That lives here, in [`users::add`].

use crate::model::{Theme, User};

pub mod theme;
pub mod users;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// Snapshot of the theme state for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeReport {
    pub theme: Theme,
    /// A `theme` key is persisted, so OS changes are ignored.
    pub explicit: bool,
    pub os_prefers_dark: Option<bool>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_users: Vec<User>,
    pub listed_users: Vec<User>,
    pub theme: Option<ThemeReport>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_users(mut self, users: Vec<User>) -> Self {
        self.affected_users = users;
        self
    }

    pub fn with_listed_users(mut self, users: Vec<User>) -> Self {
        self.listed_users = users;
        self
    }

    pub fn with_theme(mut self, report: ThemeReport) -> Self {
        self.theme = Some(report);
        self
    }
}
