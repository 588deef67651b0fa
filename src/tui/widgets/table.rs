//! Entity table: filter bar, action bar, rows and page footer.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState};

use crate::table::{Affordances, TableEngine, TableRow};
use crate::tui::style::Styles;

/// Where the keyboard is on the table.
#[derive(Debug, Clone, Copy)]
pub struct TableCursor {
    pub row: usize,
    pub header: usize,
    pub searching: bool,
}

pub fn render_table<T: TableRow>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    engine: &TableEngine<T>,
    cursor: TableCursor,
) {
    let affordances = engine.affordances();
    let chunks = Layout::vertical([
        Constraint::Length(if affordances.filter_bar { 1 } else { 0 }),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    if affordances.filter_bar {
        render_filter_bar(frame, chunks[0], engine, cursor.searching);
    }
    frame.render_widget(Paragraph::new(action_line(affordances)), chunks[1]);

    let view = engine.view();
    let columns: Vec<_> = engine.columns().visible().collect();

    let mut headers = Vec::new();
    let mut widths = Vec::new();
    if affordances.selection_column {
        headers.push(Cell::from(""));
        widths.push(Constraint::Length(3));
    }
    for (i, column) in columns.iter().enumerate() {
        let arrow = engine
            .sort_state()
            .direction_of(&column.id)
            .map(|order| order.arrow())
            .unwrap_or("");
        let style = if i == cursor.header {
            Styles::header_focus()
        } else {
            Styles::table_header()
        };
        headers.push(Cell::from(Span::styled(
            format!("{}{}", column.label, arrow),
            style,
        )));
        widths.push(Constraint::Fill(1));
    }
    if affordances.view {
        headers.push(Cell::from(""));
        widths.push(Constraint::Length(2));
    }
    let header = Row::new(headers).style(Styles::table_header()).height(1);

    let rows: Vec<Row> = view
        .rows
        .iter()
        .map(|row| {
            let checked = engine.is_row_selected(row);
            let mut cells = Vec::new();
            if affordances.selection_column {
                cells.push(Cell::from(if checked { "[x]" } else { "[ ]" }));
            }
            for column in &columns {
                cells.push(Cell::from(row.cell(&column.id).to_string()));
            }
            if affordances.view {
                cells.push(Cell::from(Span::styled("›", Styles::dim())));
            }
            let style = if checked {
                Styles::checked()
            } else {
                Styles::default()
            };
            Row::new(cells).style(style).height(1)
        })
        .collect();

    let mut state = TableState::default();
    if !view.is_empty() {
        state.select(Some(cursor.row));
    }
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .style(Styles::default());
    let inner = block.inner(chunks[2]);
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1)
        .row_highlight_style(Styles::cursor());

    frame.render_widget(Clear, chunks[2]);
    frame.render_stateful_widget(table, chunks[2], &mut state);

    // One row spanning every column, below the header.
    if view.is_empty() && inner.height > 1 {
        let empty_row = Rect {
            y: inner.y + 1,
            height: 1,
            ..inner
        };
        frame.render_widget(
            Paragraph::new(Span::styled("No results", Styles::dim())),
            empty_row,
        );
    }

    let range = if view.rows.is_empty() {
        format!("0 of {}", view.filtered_len)
    } else {
        let start = view.page * view.rows_per_page.get() + 1;
        format!("{}-{} of {}", start, start + view.rows.len() - 1, view.filtered_len)
    };
    let footer = Line::from(vec![
        Span::styled("Rows per page: ", Styles::dim()),
        Span::raw(view.rows_per_page.to_string()),
        Span::styled("   ", Styles::dim()),
        Span::raw(range),
        Span::styled("   Page ", Styles::dim()),
        Span::raw(format!("{}/{}", view.page + 1, view.page_count)),
    ]);
    frame.render_widget(Paragraph::new(footer), chunks[3]);
}

fn render_filter_bar<T: TableRow>(
    frame: &mut Frame,
    area: Rect,
    engine: &TableEngine<T>,
    searching: bool,
) {
    let column = engine.filter_title().unwrap_or("none");
    let text = &engine.filter_state().search_text;
    // Highlighted while it narrows the rows.
    let column_style = if engine.filter_state().is_active() {
        Styles::section_header()
    } else {
        Styles::action_enabled()
    };
    let mut spans = vec![
        Span::styled("Filter ", Styles::dim()),
        Span::styled(format!("[{} ▾]", column), column_style),
        Span::styled("  Search: ", Styles::dim()),
    ];
    if searching {
        spans.push(Span::styled(format!("{}█", text), Styles::filter_input()));
    } else {
        spans.push(Span::raw(text.clone()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn action_line(affordances: Affordances) -> Line<'static> {
    let mut spans = Vec::new();
    let mut push = |key: &'static str, label: &'static str, enabled: bool| {
        let style = if enabled {
            Styles::action_enabled()
        } else {
            Styles::action_disabled()
        };
        spans.push(Span::styled(key, Styles::help_key()));
        spans.push(Span::styled(format!(" {}  ", label), style));
    };
    if let Some(enabled) = affordances.add {
        push("a", "Add", enabled);
    }
    if let Some(enabled) = affordances.edit {
        push("e", "Edit", enabled);
    }
    if let Some(enabled) = affordances.delete {
        push("d", "Delete", enabled);
    }
    if affordances.view {
        push("Enter", "View", true);
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Capabilities, Column, ColumnSet, TableConfig};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use serde_json::{Value, json};

    fn engine() -> TableEngine<Value> {
        let columns = ColumnSet::new(vec![
            Column::new("id", "Id").hidden().no_filter(),
            Column::new("name", "Nombre"),
            Column::new("stock", "Stock"),
        ])
        .unwrap();
        let config = TableConfig::new(columns, "name").capabilities(Capabilities::all());
        let mut engine = TableEngine::new(config).unwrap();
        engine.set_rows(vec![
            json!({"id": 1, "name": "Harina", "stock": 40}),
            json!({"id": 2, "name": "Azucar", "stock": 12}),
        ]);
        engine
    }

    fn draw(engine: &TableEngine<Value>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let cursor = TableCursor {
            row: 0,
            header: 0,
            searching: false,
        };
        terminal
            .draw(|frame| render_table(frame, frame.area(), "Insumos", engine, cursor))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn selected_row_and_sort_arrow() {
        let mut engine = engine();
        engine.request_sort("name").unwrap();
        engine.toggle_selection("1").unwrap();

        let text = draw(&engine);
        assert!(text.contains("Nombre▲"), "{text}");
        let harina = text.lines().find(|l| l.contains("Harina")).unwrap();
        assert!(harina.contains("[x]"), "{harina}");
        let azucar = text.lines().find(|l| l.contains("Azucar")).unwrap();
        assert!(azucar.contains("[ ]"), "{azucar}");
        assert!(text.contains("1-2 of 2"));
    }

    #[test]
    fn empty_result_spans_the_table() {
        let mut engine = engine();
        engine.select_filter(Some("name")).unwrap();
        engine.set_search_text("zzz");

        let text = draw(&engine);
        assert!(text.contains("No results"), "{text}");
        assert!(text.contains("0 of 0"));
        assert!(!text.contains("[ ]"));
    }
}
