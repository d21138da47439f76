//! # API Facade
//!
//! [`RosterApi`] initializes the three stores from a [`Platform`] and is the
//! single entry point for UIs. Each method dispatches to a command in
//! `commands/` and returns a [`CmdResult`].
//!
//! Construction is explicit: create one `RosterApi` at startup. Store
//! initialization reads storage once, so the order in which UIs first touch
//! the stores never matters.
//!
//! UIs that render reactively can reach the stores through [`RosterApi::theme`],
//! [`RosterApi::users`] and [`RosterApi::next_id`] and subscribe to them.

use crate::commands::users::UserPatch;
use crate::commands::{self, CmdResult};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::model::{FormData, Theme};
use crate::platform::Platform;
use crate::theme::ThemeStore;
use crate::users::{NextIdStore, UserStore};

pub use crate::commands::{CmdMessage, MessageLevel, ThemeReport};

pub struct RosterApi {
    platform: Platform,
    theme: ThemeStore,
    users: UserStore,
    next_id: NextIdStore,
}

impl RosterApi {
    pub fn init(platform: Platform) -> Self {
        let theme = ThemeStore::init(&platform);
        let users = UserStore::init(&platform);
        let next_id = NextIdStore::init(&platform);
        Self {
            platform,
            theme,
            users,
            next_id,
        }
    }

    pub fn theme(&self) -> &ThemeStore {
        &self.theme
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    pub fn next_id(&self) -> &NextIdStore {
        &self.next_id
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        self.platform.diagnostics()
    }

    pub fn list_users(&self) -> CmdResult {
        commands::users::list(&self.users)
    }

    pub fn add_user(&self, form: FormData) -> Result<CmdResult> {
        commands::users::add(&self.users, &self.next_id, form)
    }

    /// Apply a partial edit on top of the stored record.
    pub fn edit_user(&self, id: u64, patch: UserPatch) -> Result<CmdResult> {
        let current = commands::users::get(&self.users, id)?;
        commands::users::edit(&self.users, id, patch.apply(current.to_form()))
    }

    pub fn delete_user(&self, id: u64) -> Result<CmdResult> {
        commands::users::delete(&self.users, id)
    }

    pub fn show_theme(&self) -> CmdResult {
        commands::theme::show(&self.theme)
    }

    pub fn set_theme(&self, theme: Theme) -> CmdResult {
        commands::theme::set(&self.theme, theme)
    }

    pub fn toggle_theme(&self) -> CmdResult {
        commands::theme::toggle(&self.theme)
    }

    pub fn clear_theme(&self) -> CmdResult {
        commands::theme::clear(&self.theme)
    }
}
