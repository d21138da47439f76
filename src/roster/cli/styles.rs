//! Palettes for terminal output.
//!
//! The CLI is the display for the theme store: the store writes `data-theme`
//! onto the in-memory [`Document`], and output is styled with the palette
//! that attribute names. Switching the theme therefore switches the colors
//! of the very next line printed.
//!
//! Both palettes share the same semantic slots, so print code never branches
//! on the theme.

use console::Style;
use roster::model::Theme;
use roster::platform::document::Document;
use roster::theme::THEME_ATTRIBUTE;

pub struct Palette {
    pub regular: Style,
    pub muted: Style,
    pub heading: Style,
    pub id: Style,
    pub role: Style,
    pub success: Style,
    pub warning: Style,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => build_light_palette(),
            Theme::Dark => build_dark_palette(),
        }
    }

    /// Unset or unknown attribute values get the light palette.
    pub fn for_document(document: &Document) -> Self {
        let theme = document
            .attribute(THEME_ATTRIBUTE)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();
        Self::for_theme(theme)
    }
}

fn build_light_palette() -> Palette {
    let regular = Style::new().black();
    Palette {
        heading: regular.clone().bold(),
        regular,
        muted: Style::new().color256(243),
        id: Style::new().color256(172).bold(),
        role: Style::new().color256(25),
        success: Style::new().green(),
        warning: Style::new().yellow().bold(),
    }
}

fn build_dark_palette() -> Palette {
    let regular = Style::new().white();
    Palette {
        heading: regular.clone().bold(),
        regular,
        muted: Style::new().color256(250),
        id: Style::new().color256(220).bold(),
        role: Style::new().color256(117),
        success: Style::new().green(),
        warning: Style::new().yellow().bold(),
    }
}
