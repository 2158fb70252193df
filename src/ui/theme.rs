//! # Theme System
//!
//! Color palettes for every screen. Rendering code references [`Theme`]
//! fields instead of hardcoding `ratatui::style::Color` values; the active
//! theme is picked by name in the config file.
//!
//! ## Built-in Themes
//!
//! - **Terminal** (default) - the terminal's own palette: cyan titles, yellow
//!   hints, black on cyan selection
//! - **Catppuccin Mocha** - warm, dark pastel theme
//! - **Dracula** - dark theme with vivid colors
//! - **Nord** - arctic, north-bluish color palette
//! - **Gruvbox Dark** - retro groove color scheme

use ratatui::style::Color;

/// All colors used by the UI, grouped by semantic role.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Name matched against the `theme` config field.
    pub name: &'static str,

    /// Background of modal windows and the pager.
    pub bg: Color,

    /// Primary text color (menu items, command output).
    pub fg: Color,
    /// Muted text (rules, borders).
    pub fg_dim: Color,

    /// Titles and the selected-item background.
    pub accent: Color,
    /// Key hints and the status header.
    pub secondary: Color,

    pub success: Color,
    pub error: Color,

    /// Text drawn on top of `accent` for the selected menu item.
    pub highlight_fg: Color,
}

impl Theme {
    /// Return the list of all built-in themes.
    pub fn all() -> &'static [Theme] {
        &BUILT_IN_THEMES
    }

    /// Find a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        BUILT_IN_THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Return the default theme (Terminal).
    pub fn default_theme() -> &'static Theme {
        &BUILT_IN_THEMES[0]
    }

    /// Like [`Theme::by_name`], falling back to the default theme.
    pub fn by_name_or_default(name: &str) -> &'static Theme {
        Self::by_name(name).unwrap_or_else(|| {
            tracing::warn!(theme = name, "unknown theme, using the default");
            Self::default_theme()
        })
    }
}

static BUILT_IN_THEMES: [Theme; 5] = [
    // 0 - Terminal (default)
    Theme {
        name: "Terminal",
        bg: Color::Reset,
        fg: Color::Reset,
        fg_dim: Color::DarkGray,
        accent: Color::Cyan,
        secondary: Color::Yellow,
        success: Color::Green,
        error: Color::Red,
        highlight_fg: Color::Black,
    },
    // 1 - Catppuccin Mocha
    Theme {
        name: "Catppuccin Mocha",
        bg: Color::Rgb(30, 30, 46),           // base
        fg: Color::Rgb(205, 214, 244),        // text
        fg_dim: Color::Rgb(108, 112, 134),    // overlay0
        accent: Color::Rgb(137, 180, 250),    // blue
        secondary: Color::Rgb(249, 226, 175), // yellow
        success: Color::Rgb(166, 227, 161),   // green
        error: Color::Rgb(243, 139, 168),     // red
        highlight_fg: Color::Rgb(30, 30, 46), // base
    },
    // 2 - Dracula
    Theme {
        name: "Dracula",
        bg: Color::Rgb(40, 42, 54),
        fg: Color::Rgb(248, 248, 242),
        fg_dim: Color::Rgb(98, 114, 164),
        accent: Color::Rgb(139, 233, 253),    // cyan
        secondary: Color::Rgb(241, 250, 140), // yellow
        success: Color::Rgb(80, 250, 123),
        error: Color::Rgb(255, 85, 85),
        highlight_fg: Color::Rgb(40, 42, 54),
    },
    // 3 - Nord
    Theme {
        name: "Nord",
        bg: Color::Rgb(46, 52, 64),
        fg: Color::Rgb(216, 222, 233),
        fg_dim: Color::Rgb(76, 86, 106),
        accent: Color::Rgb(136, 192, 208),    // frost
        secondary: Color::Rgb(235, 203, 139), // yellow
        success: Color::Rgb(163, 190, 140),
        error: Color::Rgb(191, 97, 106),
        highlight_fg: Color::Rgb(46, 52, 64),
    },
    // 4 - Gruvbox Dark
    Theme {
        name: "Gruvbox Dark",
        bg: Color::Rgb(40, 40, 40),
        fg: Color::Rgb(235, 219, 178),
        fg_dim: Color::Rgb(146, 131, 116),
        accent: Color::Rgb(131, 165, 152),   // blue
        secondary: Color::Rgb(250, 189, 47), // yellow
        success: Color::Rgb(184, 187, 38),
        error: Color::Rgb(251, 73, 52),
        highlight_fg: Color::Rgb(40, 40, 40),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_themes_count() {
        assert_eq!(Theme::all().len(), 5);
    }

    #[test]
    fn test_default_is_terminal() {
        assert_eq!(Theme::default_theme().name, "Terminal");
        assert_eq!(Theme::default_theme().accent, Color::Cyan);
    }

    #[test]
    fn test_by_name_case_insensitive() {
        assert!(Theme::by_name("catppuccin mocha").is_some());
        assert!(Theme::by_name("DRACULA").is_some());
        assert!(Theme::by_name("nonexistent").is_none());
    }

    #[test]
    fn test_unknown_name_falls_back_to_default() {
        assert_eq!(Theme::by_name_or_default("nope").name, "Terminal");
        assert_eq!(Theme::by_name_or_default("nord").name, "Nord");
    }

    #[test]
    fn test_all_themes_have_distinct_names() {
        let names: Vec<&str> = Theme::all().iter().map(|t| t.name).collect();
        let mut unique = names.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(names.len(), unique.len(), "duplicate theme names found");
    }

    #[test]
    fn test_highlight_is_readable_on_accent() {
        for theme in Theme::all() {
            assert_ne!(theme.highlight_fg, theme.accent, "{}", theme.name);
        }
    }
}
