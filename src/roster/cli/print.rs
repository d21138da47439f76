use super::styles::Palette;
use roster::api::{CmdMessage, MessageLevel, ThemeReport};
use roster::config::RosterConfig;
use roster::model::User;
use unicode_width::UnicodeWidthStr;

const ID_HEADER: &str = "ID";
const NAME_HEADER: &str = "Name";
const EMAIL_HEADER: &str = "Email";
const ROLE_HEADER: &str = "Role";
const GAP: &str = "  ";

pub(super) fn print_messages(palette: &Palette, messages: &[CmdMessage]) {
    for message in messages {
        let style = match message.level {
            MessageLevel::Info => &palette.muted,
            MessageLevel::Success => &palette.success,
            MessageLevel::Warning => &palette.warning,
        };
        println!("{}", style.apply_to(&message.content));
    }
}

pub(super) fn print_users(palette: &Palette, users: &[User]) {
    if users.is_empty() {
        return;
    }

    let ids: Vec<String> = users.iter().map(|u| u.id.to_string()).collect();
    let id_width = column_width(ID_HEADER, ids.iter().map(String::as_str));
    let name_width = column_width(NAME_HEADER, users.iter().map(|u| u.name.as_str()));
    let email_width = column_width(EMAIL_HEADER, users.iter().map(|u| u.email.as_str()));

    println!(
        "{}",
        palette.heading.apply_to(format!(
            "{}{GAP}{}{GAP}{}{GAP}{}",
            pad_left(ID_HEADER, id_width),
            pad_right(NAME_HEADER, name_width),
            pad_right(EMAIL_HEADER, email_width),
            ROLE_HEADER,
        ))
    );

    for (user, id) in users.iter().zip(&ids) {
        println!(
            "{}{GAP}{}{GAP}{}{GAP}{}",
            palette.id.apply_to(pad_left(id, id_width)),
            palette.regular.apply_to(pad_right(&user.name, name_width)),
            palette.muted.apply_to(pad_right(&user.email, email_width)),
            palette.role.apply_to(user.role),
        );
    }
}

pub(super) fn print_theme(palette: &Palette, report: &ThemeReport) {
    println!("{}", palette.heading.apply_to(report.theme));

    let source = if report.explicit {
        "explicit choice (system changes are ignored)"
    } else {
        "no stored choice (follows the system setting)"
    };
    println!("{}", palette.muted.apply_to(format!("preference: {}", source)));

    let system = match report.os_prefers_dark {
        Some(true) => "dark",
        Some(false) => "light",
        None => "unknown",
    };
    println!("{}", palette.muted.apply_to(format!("system: {}", system)));
}

pub(super) fn print_config(palette: &Palette, config: &RosterConfig) {
    println!("{} = {}", palette.heading.apply_to("origin"), config.origin);
    println!(
        "{} = {}",
        palette.heading.apply_to("storage-file"),
        config.storage_file
    );
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values.map(|v| v.width()).fold(header.width(), usize::max)
}

fn pad_right(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn pad_left(s: &str, width: usize) -> String {
    format!("{}{}", " ".repeat(width.saturating_sub(s.width())), s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_uses_display_width() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_left("7", 3), "  7");
        // Wide characters take two columns.
        assert_eq!(pad_right("日本", 5), "日本 ");
        assert_eq!(pad_right("toolong", 3), "toolong");
    }

    #[test]
    fn column_width_includes_header() {
        assert_eq!(column_width("Name", ["Al", "Bo"].into_iter()), 4);
        assert_eq!(column_width("ID", ["1234"].into_iter()), 4);
    }
}
