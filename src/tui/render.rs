//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::AppState;
use super::style::Styles;
use super::widgets::{render_header, render_help, render_login, render_quit_confirm, render_status};

/// Main render function.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(6),    // Table
        Constraint::Length(1), // Status
    ])
    .split(area);

    render_header(frame, chunks[0], state);

    match state.current_screen() {
        Some(screen) => screen.render(frame, chunks[1]),
        None => {
            let block = Block::default().borders(Borders::ALL).style(Styles::default());
            frame.render_widget(Paragraph::new("").block(block), chunks[1]);
        }
    }

    render_status(frame, chunks[2], state);

    if state.user.is_none() {
        render_login(frame, area, &state.login);
    }

    if state.show_help {
        render_help(frame, area, &mut state.help_scroll);
    }

    // Rendered last to overlay everything.
    if state.show_quit_confirm {
        render_quit_confirm(frame, area);
    }
}
