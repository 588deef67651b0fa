//! Help popup listing the key bindings.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::centered;
use crate::tui::style::Styles;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("Tab / Shift-Tab", "next / previous tab"),
            ("1-5", "jump to tab"),
            ("↑ ↓  j k", "move cursor"),
            ("← →  h l", "previous / next page"),
            ("r", "cycle rows per page (5, 10, 25)"),
            ("F5", "reload from the service"),
        ],
    ),
    (
        "Sort & filter",
        &[
            ("[ ]", "move header focus"),
            ("s", "sort focused column (asc, then desc)"),
            ("f", "cycle filter column"),
            ("/", "type search text (Enter keeps, Esc clears)"),
        ],
    ),
    (
        "Records",
        &[
            ("Space", "select / unselect row"),
            ("a", "add (only with no selection)"),
            ("e", "edit selected row"),
            ("d", "delete selected row"),
            ("Enter", "view row details"),
        ],
    ),
    (
        "Session",
        &[("o", "sign out"), ("q", "quit"), ("?", "toggle this help")],
    ),
];

fn help_lines() -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (title, keys) in SECTIONS {
        lines.push(Line::from(Span::styled(*title, Styles::section_header())));
        for (key, text) in *keys {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<16}", key), Styles::help_key()),
                Span::raw(*text),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines
}

/// Renders the help popup centered on screen with scroll support.
pub fn render_help(frame: &mut Frame, area: Rect, scroll: &mut usize) {
    let popup_width = (area.width * 60 / 100).clamp(40, 80);
    let popup_height = (area.height * 80 / 100).clamp(10, 30);
    let popup_area = centered(area, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let content = help_lines();
    let content_lines = content.len();

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Styles::popup_border());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

    let visible_height = chunks[0].height as usize;
    let max_scroll = content_lines.saturating_sub(visible_height);
    if *scroll > max_scroll {
        *scroll = max_scroll;
    }

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .scroll((*scroll as u16, 0))
        .style(Styles::default());
    frame.render_widget(paragraph, chunks[0]);

    let scroll_info = if max_scroll > 0 {
        format!(" [{}/{}]", *scroll + 1, max_scroll + 1)
    } else {
        String::new()
    };
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Press ", Styles::dim()),
        Span::styled("?", Styles::help_key()),
        Span::styled(" or ", Styles::dim()),
        Span::styled("Esc", Styles::help_key()),
        Span::styled(" to close", Styles::dim()),
        Span::styled(scroll_info, Styles::dim()),
    ]));
    frame.render_widget(footer, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_binding_is_listed() {
        let text: String = help_lines()
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        for key in ["Space", "F5", "[ ]", "/", "a", "e", "d", "o"] {
            assert!(text.contains(key), "{key} missing from help");
        }
    }
}
