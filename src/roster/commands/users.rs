use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, RosterError};
use crate::model::{FormData, Role, User};
use crate::users::{NextIdStore, UserStore};

/// Partial edit from a UI that only sends the fields the user touched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.role.is_none()
    }

    pub fn apply(self, base: FormData) -> FormData {
        FormData {
            name: self.name.unwrap_or(base.name),
            email: self.email.unwrap_or(base.email),
            role: self.role.unwrap_or(base.role),
        }
    }
}

pub fn list(users: &UserStore) -> CmdResult {
    let listed = users.get();
    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info("No users."));
    }
    result.with_listed_users(listed)
}

pub fn get(users: &UserStore, id: u64) -> Result<User> {
    users
        .with(|list| list.iter().find(|u| u.id == id).cloned())
        .ok_or(RosterError::UserNotFound(id))
}

/// Append a user and advance the counter.
///
/// The new id is the stored counter, raised past every id in the list if a
/// stale or reset counter would collide. The counter then moves to `id + 1`,
/// so ids are never reused even after deletes. Fails without touching either
/// store when no id above the ones in use is left.
pub fn add(users: &UserStore, next_id: &NextIdStore, form: FormData) -> Result<CmdResult> {
    let form = validate(form)?;
    let (id, next) = allocate_id(users, next_id)?;

    let user = User::from_form(id, form);
    users.update(|list| list.push(user.clone()));
    next_id.set(next);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("User added ({}): {}", user.id, user.name)));
    Ok(result.with_affected_users(vec![user]))
}

/// Replace the editable fields of a user in place; position is kept.
pub fn edit(users: &UserStore, id: u64, form: FormData) -> Result<CmdResult> {
    let form = validate(form)?;
    get(users, id)?;

    let updated = User::from_form(id, form);
    users.update(|list| {
        if let Some(slot) = list.iter_mut().find(|u| u.id == id) {
            *slot = updated.clone();
        }
    });

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("User updated ({}): {}", updated.id, updated.name)));
    Ok(result.with_affected_users(vec![updated]))
}

pub fn delete(users: &UserStore, id: u64) -> Result<CmdResult> {
    let removed = get(users, id)?;
    users.update(|list| list.retain(|u| u.id != id));

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("User deleted ({}): {}", removed.id, removed.name)));
    Ok(result.with_affected_users(vec![removed]))
}

/// The id for a new user and the counter value that follows it.
fn allocate_id(users: &UserStore, next_id: &NextIdStore) -> Result<(u64, u64)> {
    let exhausted = || RosterError::Validation("user id space exhausted".into());
    let id = match users.with(|list| list.iter().map(|u| u.id).max()) {
        Some(max) => next_id.get().max(max.checked_add(1).ok_or_else(exhausted)?),
        None => next_id.get(),
    };
    let next = id.checked_add(1).ok_or_else(exhausted)?;
    Ok((id, next))
}

fn validate(form: FormData) -> Result<FormData> {
    let name = form.name.trim().to_string();
    let email = form.email.trim().to_string();
    if name.is_empty() {
        return Err(RosterError::Validation("name cannot be empty".into()));
    }
    if email.is_empty() {
        return Err(RosterError::Validation("email cannot be empty".into()));
    }
    if !email.contains('@') {
        return Err(RosterError::Validation(format!(
            "'{}' is not an email address",
            email
        )));
    }
    Ok(FormData {
        name,
        email,
        role: form.role,
    })
}
