use crate::commands::{CmdMessage, CmdResult, ThemeReport};
use crate::model::Theme;
use crate::theme::ThemeStore;

pub fn report(theme: &ThemeStore) -> ThemeReport {
    ThemeReport {
        theme: theme.get(),
        explicit: theme.has_explicit_choice(),
        os_prefers_dark: theme.os_prefers_dark(),
    }
}

pub fn show(theme: &ThemeStore) -> CmdResult {
    CmdResult::default().with_theme(report(theme))
}

pub fn set(theme: &ThemeStore, value: Theme) -> CmdResult {
    let previous = theme.get();
    theme.set(value);

    let mut result = CmdResult::default();
    if previous == value {
        result.add_message(CmdMessage::info(format!("Theme is already {}", value)));
    } else {
        result.add_message(CmdMessage::success(format!("Theme set to {}", value)));
    }
    result.with_theme(report(theme))
}

pub fn toggle(theme: &ThemeStore) -> CmdResult {
    let value = theme.toggle();
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Theme set to {}", value)));
    result.with_theme(report(theme))
}

/// Forget the explicit choice so the OS preference is followed again.
pub fn clear(theme: &ThemeStore) -> CmdResult {
    let had_choice = theme.has_explicit_choice();
    theme.clear_preference();

    let mut result = CmdResult::default();
    if had_choice {
        result.add_message(CmdMessage::success(
            "Theme preference cleared; following the system setting",
        ));
    } else {
        result.add_message(CmdMessage::warning("No theme preference was stored"));
    }
    result.with_theme(report(theme))
}
