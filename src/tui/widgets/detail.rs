//! Record detail popup (the "view more" action).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::centered;
use crate::table::{ColumnSet, TableRow};
use crate::tui::style::Styles;

/// Shows every column of `row`, hidden ones included.
pub fn render_detail<T: TableRow>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    columns: &ColumnSet,
    row: &T,
) {
    let label_width = columns
        .all()
        .iter()
        .map(|c| c.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = columns
        .all()
        .iter()
        .map(|column| {
            Line::from(vec![
                Span::styled(
                    format!("{:<width$}  ", column.label, width = label_width),
                    Styles::section_header(),
                ),
                Span::raw(row.cell(&column.id).to_string()),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Esc", Styles::help_key()),
        Span::styled(" → close", Styles::dim()),
    ]));

    let popup_width = (area.width * 60 / 100).clamp(40, 80);
    let popup_area = centered(area, popup_width, lines.len() as u16 + 2);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Styles::popup_border());
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .style(Styles::default());
    frame.render_widget(paragraph, popup_area);
}
