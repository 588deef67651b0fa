//! Quit confirmation popup widget.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::centered;
use crate::tui::style::Styles;

/// Renders a centered quit confirmation popup.
///
/// Enter/q confirms, Esc/n cancels; keys are handled in `input`.
pub fn render_quit_confirm(frame: &mut Frame, area: Rect) {
    // Half the screen, within 40..=60 columns.
    let popup_width = (area.width * 50 / 100).clamp(40, 60);
    let popup_area = centered(area, popup_width, 7);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Exit hornero ")
        .borders(Borders::ALL)
        .border_style(Styles::popup_border());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let content = vec![
        Line::from("Are you sure you want to quit?"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Styles::help_key()),
            Span::styled(" or ", Styles::dim()),
            Span::styled("q", Styles::help_key()),
            Span::styled(" → quit", Styles::dim()),
        ]),
        Line::from(vec![
            Span::styled("Esc", Styles::help_key()),
            Span::styled(" or ", Styles::dim()),
            Span::styled("n", Styles::help_key()),
            Span::styled(" → cancel", Styles::dim()),
        ]),
    ];

    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Center)
        .style(Styles::default());
    frame.render_widget(paragraph, inner);
}
