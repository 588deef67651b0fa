//! Delete confirmation popup.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::centered;
use crate::table::DeleteDialog;
use crate::tui::style::Styles;

pub fn render_delete_confirm(frame: &mut Frame, area: Rect, dialog: &DeleteDialog) {
    let Some(name) = dialog.name() else {
        return;
    };
    let popup_width = (area.width * 50 / 100).clamp(40, 70);
    let popup_area = centered(area, popup_width, 9);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Delete ")
        .borders(Borders::ALL)
        .border_style(Styles::popup_border());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Delete "),
            Span::styled(name.to_string(), Styles::section_header()),
            Span::raw("?"),
        ]),
        Line::from(""),
    ];

    if dialog.is_in_flight() {
        lines.push(Line::from(Span::styled("Deleting…", Styles::dim())));
    } else {
        if let Some(error) = dialog.error() {
            lines.push(Line::from(Span::styled(
                format!("Error: {}", error),
                Styles::error(),
            )));
            lines.push(Line::from(""));
        }
        let confirm = if dialog.error().is_some() { " → retry" } else { " → delete" };
        lines.push(Line::from(vec![
            Span::styled("Enter", Styles::help_key()),
            Span::styled(confirm, Styles::dim()),
            Span::styled("   Esc", Styles::help_key()),
            Span::styled(" → cancel", Styles::dim()),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Styles::default());
    frame.render_widget(paragraph, inner);
}
