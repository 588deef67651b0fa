//! Add/edit record popup.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::centered;
use crate::tui::form::{FieldKind, RecordForm};
use crate::tui::style::Styles;

pub fn render_form(frame: &mut Frame, area: Rect, form: &RecordForm, saving: bool) {
    let label_width = form
        .fields
        .iter()
        .map(|f| f.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = form
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = i == form.focus;
            let marker = if focused { "› " } else { "  " };
            let hint = match field.kind {
                FieldKind::Date if field.value.is_empty() => "dd/mm/yyyy",
                _ => "",
            };
            let value = if focused {
                Span::styled(format!("{}█", field.value), Styles::filter_input())
            } else {
                Span::raw(field.value.clone())
            };
            Line::from(vec![
                Span::styled(marker, Styles::help_key()),
                Span::styled(
                    format!("{:<width$}  ", field.label, width = label_width),
                    Styles::section_header(),
                ),
                value,
                Span::styled(format!(" {}", hint), Styles::dim()),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(error.clone(), Styles::error())));
    }
    if saving {
        lines.push(Line::from(Span::styled("Saving…", Styles::dim())));
    } else {
        lines.push(Line::from(vec![
            Span::styled("Enter", Styles::help_key()),
            Span::styled(" → save   ", Styles::dim()),
            Span::styled("Tab", Styles::help_key()),
            Span::styled(" → next field   ", Styles::dim()),
            Span::styled("Esc", Styles::help_key()),
            Span::styled(" → cancel", Styles::dim()),
        ]));
    }

    let popup_width = (area.width * 60 / 100).clamp(50, 90);
    let popup_area = centered(area, popup_width, lines.len() as u16 + 2);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", form.title))
        .borders(Borders::ALL)
        .border_style(Styles::popup_border());
    frame.render_widget(
        Paragraph::new(lines).block(block).style(Styles::default()),
        popup_area,
    );
}
