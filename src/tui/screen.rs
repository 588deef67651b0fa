//! One dashboard tab: a table engine bound to an entity collection.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use serde_json::Value;
use tracing::{debug, warn};

use crate::Result;
use crate::backend::Client;
use crate::models::Entity;
use crate::session::Role;
use crate::table::{PendingDelete, RowsPerPage, TableEngine, TableError};

use super::form::RecordForm;
use super::widgets::{TableCursor, render_delete_confirm, render_detail, render_form, render_table};

/// What the app should do after a key reached a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenCommand {
    None,
    /// Show a message in the status line.
    Status(String),
    /// Service work is queued; call `Screen::execute`.
    Execute,
}

/// Object-safe face of a tab, so the app can hold different entities.
pub trait Screen {
    fn title(&self) -> &'static str;
    /// Fetches the collection and replaces the rows. Returns the row count.
    fn reload(&mut self, client: &mut Client) -> Result<usize>;
    fn handle_key(&mut self, key: KeyEvent) -> ScreenCommand;
    /// Runs queued service work and returns a status message.
    fn execute(&mut self, client: &mut Client) -> Option<String>;
    /// True while a popup or the search box owns the keyboard.
    fn captures_input(&self) -> bool;
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

#[derive(Debug)]
enum Pending {
    Create(Value),
    Update { id: String, record: Value },
    Delete(PendingDelete),
}

pub struct TableScreen<T: Entity> {
    engine: TableEngine<T>,
    /// Row index on the current page.
    cursor: usize,
    /// Index into the visible columns.
    header_focus: usize,
    searching: bool,
    form: Option<RecordForm>,
    detail: Option<T>,
    pending: Option<Pending>,
}

impl<T: Entity> TableScreen<T> {
    pub fn new(role: Role, rows_per_page: RowsPerPage) -> Result<Self, TableError> {
        let engine = TableEngine::new(T::table_config(role, rows_per_page)?)?;
        Ok(Self {
            engine,
            cursor: 0,
            header_focus: 0,
            searching: false,
            form: None,
            detail: None,
            pending: None,
        })
    }

    pub fn engine(&self) -> &TableEngine<T> {
        &self.engine
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn form(&self) -> Option<&RecordForm> {
        self.form.as_ref()
    }

    pub fn detail(&self) -> Option<&T> {
        self.detail.as_ref()
    }

    fn clamp_cursor(&mut self) {
        let len = self.engine.view().rows.len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    fn focused_column(&self) -> Option<String> {
        self.engine
            .columns()
            .visible()
            .nth(self.header_focus)
            .map(|c| c.id.clone())
    }

    fn open_form(&mut self, record: Value, target: Option<String>) {
        let title = match target {
            Some(_) => format!("Edit {}", T::TITLE),
            None => format!("New {}", T::TITLE),
        };
        self.form = Some(RecordForm::new(
            title,
            self.engine.columns(),
            record,
            target,
            T::DATE_COLUMNS,
            T::name_column(),
        ));
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> ScreenCommand {
        let Some(form) = self.form.as_mut() else {
            return ScreenCommand::None;
        };
        if self.pending.is_some() {
            return ScreenCommand::None;
        }
        match key.code {
            KeyCode::Esc => self.form = None,
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(c) => form.input(c),
            KeyCode::Enter => {
                let Ok(record) = form.submit() else {
                    return ScreenCommand::None;
                };
                // Reject shapes the entity cannot hold (negative ids, overflow).
                if let Err(err) = serde_json::from_value::<T>(record.clone()) {
                    form.error = Some(err.to_string());
                    return ScreenCommand::None;
                }
                self.pending = Some(match form.target() {
                    Some(id) => Pending::Update {
                        id: id.to_string(),
                        record,
                    },
                    None => Pending::Create(record),
                });
                return ScreenCommand::Execute;
            }
            _ => {}
        }
        ScreenCommand::None
    }

    fn handle_delete_key(&mut self, key: KeyEvent) -> ScreenCommand {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.engine.confirm_delete() {
                    Some(pending) => {
                        self.pending = Some(Pending::Delete(pending));
                        ScreenCommand::Execute
                    }
                    None => ScreenCommand::None,
                }
            }
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.engine.cancel_delete();
                ScreenCommand::None
            }
            _ => ScreenCommand::None,
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> ScreenCommand {
        let mut text = self.engine.filter_state().search_text.clone();
        match key.code {
            KeyCode::Esc => {
                text.clear();
                self.searching = false;
            }
            KeyCode::Enter => self.searching = false,
            KeyCode::Backspace => {
                text.pop();
            }
            KeyCode::Char(c) => text.push(c),
            _ => return ScreenCommand::None,
        }
        self.engine.set_search_text(text);
        self.clamp_cursor();
        ScreenCommand::None
    }

    fn handle_table_key(&mut self, key: KeyEvent) -> Result<ScreenCommand, TableError> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor += 1;
                self.clamp_cursor();
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.engine.prev_page();
                self.cursor = 0;
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.engine.next_page();
                self.cursor = 0;
            }
            KeyCode::Char(' ') => self.engine.toggle_at(self.cursor)?,
            KeyCode::Char('r') => {
                let next = self.engine.pagination().rows_per_page.next();
                self.engine.set_rows_per_page(next);
                self.cursor = 0;
                return Ok(ScreenCommand::Status(format!("{} rows per page", next)));
            }
            KeyCode::Char('[') => self.header_focus = self.header_focus.saturating_sub(1),
            KeyCode::Char(']') => {
                let last = self.engine.columns().visible_count().saturating_sub(1);
                self.header_focus = (self.header_focus + 1).min(last);
            }
            KeyCode::Char('s') => {
                if let Some(column) = self.focused_column() {
                    self.engine.request_sort(&column)?;
                    self.clamp_cursor();
                }
            }
            KeyCode::Char('f') if self.engine.config().show_dropdown => {
                self.engine.cycle_filter();
                self.clamp_cursor();
                let message = match self.engine.filter_title() {
                    Some(title) => format!("Filter by {}", title),
                    None => "Filter off".to_string(),
                };
                return Ok(ScreenCommand::Status(message));
            }
            KeyCode::Char('/') if self.engine.config().show_dropdown => {
                if self.engine.filter_state().selected.is_none() {
                    self.engine.cycle_filter();
                }
                self.searching = true;
            }
            KeyCode::Char('a') => {
                self.engine.add_request()?;
                let empty = serde_json::to_value(T::default()).unwrap_or(Value::Null);
                self.open_form(empty, None);
            }
            KeyCode::Char('e') => {
                let row = self.engine.edit_target()?;
                let id = self.engine.row_id(row);
                let record = serde_json::to_value(row).unwrap_or(Value::Null);
                self.open_form(record, Some(id));
            }
            KeyCode::Char('d') => self.engine.request_delete()?,
            KeyCode::Enter => {
                let row = self.engine.view_target(self.cursor)?.clone();
                self.detail = Some(row);
            }
            _ => {}
        }
        Ok(ScreenCommand::None)
    }

    fn finish_save(&mut self, client: &mut Client, pending: Pending) -> Option<String> {
        let result = match &pending {
            Pending::Create(record) => client.create(T::PATH, record).map(|_| "created"),
            Pending::Update { id, record } => client.update(T::PATH, id, record).map(|_| "saved"),
            Pending::Delete(_) => return None,
        };
        match result {
            Ok(verb) => {
                self.form = None;
                let reloaded = self.reload(client).err();
                Some(match reloaded {
                    Some(err) => format!("{} {}, refresh failed: {}", T::TITLE, verb, err),
                    None => format!("{} {}", T::TITLE, verb),
                })
            }
            Err(err) => {
                warn!(path = T::PATH, error = %err, "save failed");
                if let Some(form) = self.form.as_mut() {
                    form.error = Some(err.to_string());
                }
                Some(format!("Save failed: {}", err))
            }
        }
    }
}

impl<T: Entity> Screen for TableScreen<T> {
    fn title(&self) -> &'static str {
        T::TITLE
    }

    fn reload(&mut self, client: &mut Client) -> Result<usize> {
        let rows: Vec<T> = client.list(T::PATH)?;
        let count = rows.len();
        self.engine.set_rows(rows);
        self.clamp_cursor();
        debug!(path = T::PATH, count, "rows loaded");
        Ok(count)
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenCommand {
        if self.form.is_some() {
            return self.handle_form_key(key);
        }
        if self.engine.delete_dialog().is_open() {
            return self.handle_delete_key(key);
        }
        if self.detail.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                self.detail = None;
            }
            return ScreenCommand::None;
        }
        if self.searching {
            return self.handle_search_key(key);
        }
        match self.handle_table_key(key) {
            Ok(command) => command,
            Err(err) => ScreenCommand::Status(err.to_string()),
        }
    }

    fn execute(&mut self, client: &mut Client) -> Option<String> {
        match self.pending.take()? {
            Pending::Delete(pending) => {
                let name = self
                    .engine
                    .delete_dialog()
                    .name()
                    .unwrap_or_default()
                    .to_string();
                let result = client
                    .delete(T::PATH, pending.id())
                    .map_err(|err| err.to_string());
                if self.engine.finish_delete(pending, result) {
                    let message = match self.reload(client) {
                        Ok(_) => format!("Deleted {}", name),
                        Err(err) => format!("Deleted {}, refresh failed: {}", name, err),
                    };
                    Some(message)
                } else {
                    Some(format!("Could not delete {}", name))
                }
            }
            save => self.finish_save(client, save),
        }
    }

    fn captures_input(&self) -> bool {
        self.searching
            || self.form.is_some()
            || self.detail.is_some()
            || self.engine.delete_dialog().is_open()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let cursor = TableCursor {
            row: self.cursor,
            header: self.header_focus,
            searching: self.searching,
        };
        render_table(frame, area, T::TITLE, &self.engine, cursor);

        if let Some(row) = &self.detail {
            render_detail(frame, area, T::TITLE, self.engine.columns(), row);
        }
        if let Some(form) = &self.form {
            render_form(frame, area, form, self.pending.is_some());
        }
        if self.engine.delete_dialog().is_open() {
            render_delete_confirm(frame, area, self.engine.delete_dialog());
        }
    }
}
