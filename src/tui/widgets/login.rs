//! Sign-in popup, shown whenever there is no session.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::centered;
use crate::tui::state::{LoginField, LoginForm};
use crate::tui::style::Styles;

pub fn render_login(frame: &mut Frame, area: Rect, login: &LoginForm) {
    let popup_width = (area.width * 40 / 100).clamp(40, 60);
    let popup_area = centered(area, popup_width, 10);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Sign in ")
        .borders(Borders::ALL)
        .border_style(Styles::popup_border());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let field = |label: &'static str, value: String, focused: bool| {
        let value = if focused {
            Span::styled(format!("{}█", value), Styles::filter_input())
        } else {
            Span::raw(value)
        };
        Line::from(vec![Span::styled(label, Styles::section_header()), value])
    };
    let masked = "•".repeat(login.password.chars().count());

    let mut lines = vec![
        Line::from(""),
        field(
            "User:     ",
            login.username.clone(),
            login.focus == LoginField::Username,
        ),
        field("Password: ", masked, login.focus == LoginField::Password),
        Line::from(""),
    ];
    match &login.error {
        Some(error) => lines.push(Line::from(Span::styled(error.clone(), Styles::error()))),
        None => lines.push(Line::from("")),
    }
    lines.push(Line::from(vec![
        Span::styled("Enter", Styles::help_key()),
        Span::styled(" → sign in   ", Styles::dim()),
        Span::styled("Tab", Styles::help_key()),
        Span::styled(" → switch field   ", Styles::dim()),
        Span::styled("Esc", Styles::help_key()),
        Span::styled(" → quit", Styles::dim()),
    ]));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Left)
            .style(Styles::default()),
        inner,
    );
}
