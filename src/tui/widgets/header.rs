//! Header bar with tabs and user, plus the status line.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::{AppState, Tab};
use crate::util::format_day_month_year;
use crate::tui::style::Styles;

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([
        Constraint::Length(18), // Time
        Constraint::Min(20),    // Tabs
        Constraint::Length(28), // User
    ])
    .split(area);

    let now = Local::now();
    let time = format!(
        " {} {}",
        format_day_month_year(now.date_naive()),
        now.format("%H:%M")
    );
    frame.render_widget(Paragraph::new(time).style(Styles::header()), chunks[0]);

    let titles: Vec<&'static str> = Tab::all()
        .iter()
        .map(|tab| match state.screens.get(tab.index()) {
            Some(screen) => screen.title(),
            None => "",
        })
        .collect();
    let tabs: Vec<Span> = Tab::all()
        .iter()
        .zip(titles)
        .filter(|(_, title)| !title.is_empty())
        .flat_map(|(tab, title)| {
            let style = if *tab == state.current_tab {
                Styles::tab_active()
            } else {
                Styles::tab_inactive()
            };
            vec![
                Span::styled(format!(" {}:", tab.index() + 1), Styles::dim()),
                Span::styled(format!("{} ", title), style),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(tabs)).style(Styles::header()),
        chunks[1],
    );

    let user = match &state.user {
        Some(data) => format!("{} ({}) ", data.username, data.role.name()),
        None => "not signed in ".to_string(),
    };
    frame.render_widget(
        Paragraph::new(user)
            .alignment(ratatui::layout::Alignment::Right)
            .style(Styles::header()),
        chunks[2],
    );
}

/// Bottom line: last action outcome, or the key hints.
pub fn render_status(frame: &mut Frame, area: Rect, state: &AppState) {
    let line = match &state.status_message {
        Some(message) => Line::from(Span::styled(message.clone(), Styles::section_header())),
        None => {
            let mut spans = Vec::new();
            for (key, label) in [
                ("?", "help"),
                ("Tab", "next tab"),
                ("/", "search"),
                ("F5", "refresh"),
                ("o", "sign out"),
                ("q", "quit"),
            ] {
                spans.push(Span::styled(format!(" {}", key), Styles::help_key()));
                spans.push(Span::styled(format!(" {} ", label), Styles::help()));
            }
            Line::from(spans)
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}
