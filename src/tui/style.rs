//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

/// Color palette.
pub struct Theme;

impl Theme {
    // Backgrounds
    pub const BG: Color = Color::Reset;
    pub const HEADER_BG: Color = Color::Blue;
    pub const SELECTED_BG: Color = Color::DarkGray;

    // Foregrounds
    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;
    pub const HEADER_FG: Color = Color::White;

    /// Popup borders, active tab, ticked rows.
    pub const ACCENT: Color = Color::Cyan;
    /// Key names in hints and help.
    pub const KEY: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::BG)
    }

    /// Header bar style.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Row under the cursor.
    pub fn cursor() -> Style {
        Style::default()
            .bg(Theme::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Row ticked in the selection column.
    pub fn checked() -> Style {
        Style::default().fg(Theme::ACCENT)
    }

    /// Column header row.
    pub fn table_header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Header cell that `s` would sort.
    pub fn header_focus() -> Style {
        Style::default()
            .fg(Theme::KEY)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    /// Current tab title.
    pub fn tab_active() -> Style {
        Style::default()
            .fg(Theme::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Other tab titles.
    pub fn tab_inactive() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Secondary text.
    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Error messages in popups.
    pub fn error() -> Style {
        Style::default()
            .fg(Theme::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    /// Text being typed.
    pub fn filter_input() -> Style {
        Style::default()
            .fg(Theme::FG)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Popup border.
    pub fn popup_border() -> Style {
        Style::default().fg(Theme::ACCENT)
    }

    /// Section titles and status messages.
    pub fn section_header() -> Style {
        Style::default()
            .fg(Theme::KEY)
            .add_modifier(Modifier::BOLD)
    }

    /// Help text.
    pub fn help() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Highlighted key in help lines.
    pub fn help_key() -> Style {
        Style::default().fg(Theme::KEY)
    }

    /// Enabled action button.
    pub fn action_enabled() -> Style {
        Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD)
    }

    /// Rendered but disabled action button.
    pub fn action_disabled() -> Style {
        Style::default()
            .fg(Theme::FG_DIM)
            .add_modifier(Modifier::CROSSED_OUT)
    }
}
