//! Table engine: owns the transient UI state of one table instance.

use tracing::debug;

use super::{
    Affordances, Capabilities, ColumnSet, DeleteDialog, FilterOption, FilterPredicates,
    FilterState, Operation, Pagination, PendingDelete, RowsPerPage, Selection, SortState,
    TableError, TableRow,
};

/// Everything a screen declares about its table, passed once.
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub columns: ColumnSet,
    /// Column whose value labels the delete confirmation.
    pub name_column: String,
    pub capabilities: Capabilities,
    /// Show the filter dropdown and search box.
    pub show_dropdown: bool,
    /// Restricts the dropdown to these column ids.
    pub dropdown_options: Option<Vec<String>>,
    pub rows_per_page: RowsPerPage,
}

impl TableConfig {
    pub fn new(columns: ColumnSet, name_column: impl Into<String>) -> Self {
        Self {
            columns,
            name_column: name_column.into(),
            capabilities: Capabilities::default(),
            show_dropdown: true,
            dropdown_options: None,
            rows_per_page: RowsPerPage::default(),
        }
    }

    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn show_dropdown(mut self, show: bool) -> Self {
        self.show_dropdown = show;
        self
    }

    pub fn dropdown_options(mut self, ids: Vec<String>) -> Self {
        self.dropdown_options = Some(ids);
        self
    }

    pub fn rows_per_page(mut self, rows_per_page: RowsPerPage) -> Self {
        self.rows_per_page = rows_per_page;
        self
    }
}

/// The derived page for rendering.
#[derive(Debug)]
pub struct TableView<'a, T> {
    /// Rows of the current page, in display order.
    pub rows: Vec<&'a T>,
    /// Row count after filtering, before paging.
    pub filtered_len: usize,
    pub page: usize,
    pub page_count: usize,
    pub rows_per_page: RowsPerPage,
}

impl<T> TableView<'_, T> {
    /// True when the page has no rows; render a single "no results" row.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// State for one table: sort, filter, page, selection and delete dialog.
#[derive(Debug)]
pub struct TableEngine<T: TableRow> {
    config: TableConfig,
    predicates: FilterPredicates,
    rows: Vec<T>,
    sort: SortState,
    filter: FilterState,
    pagination: Pagination,
    selection: Selection,
    delete: DeleteDialog,
}

impl<T: TableRow> TableEngine<T> {
    pub fn new(config: TableConfig) -> Result<Self, TableError> {
        config.columns.require(&config.name_column)?;
        let predicates =
            FilterPredicates::from_schema(&config.columns, config.dropdown_options.as_deref())?;
        let pagination = Pagination::new(config.rows_per_page);
        Ok(Self {
            config,
            predicates,
            rows: Vec::new(),
            sort: SortState::default(),
            filter: FilterState::default(),
            pagination,
            selection: Selection::default(),
            delete: DeleteDialog::Closed,
        })
    }

    /// Replaces the rows after a refresh. A selection whose row disappeared is
    /// dropped; page and sort are kept.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        let id_column = self.config.columns.id_column().id.clone();
        let ids: Vec<String> = self
            .rows
            .iter()
            .map(|row| row.cell(&id_column).to_string())
            .collect();
        if self.selection.retain_existing(ids.iter().map(String::as_str)) {
            debug!("selected row vanished after refresh, selection cleared");
        }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.config.columns
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn capabilities(&self) -> Capabilities {
        self.config.capabilities
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn delete_dialog(&self) -> &DeleteDialog {
        &self.delete
    }

    /// Identifier of a row, read from the id column.
    pub fn row_id(&self, row: &T) -> String {
        row.cell(&self.config.columns.id_column().id).to_string()
    }

    pub fn affordances(&self) -> Affordances {
        Affordances::derive(
            self.config.capabilities,
            self.selection.count(),
            self.config.show_dropdown,
        )
    }

    /// Filtered and sorted rows, before paging.
    fn derived(&self) -> Vec<&T> {
        let mut rows = if self.config.show_dropdown {
            self.filter.apply(&self.rows, &self.predicates)
        } else {
            self.rows.iter().collect()
        };
        self.sort.apply(&mut rows);
        rows
    }

    /// Derives the visible page from the current state.
    pub fn view(&self) -> TableView<'_, T> {
        let derived = self.derived();
        let filtered_len = derived.len();
        let rows = self.pagination.slice(&derived).to_vec();
        TableView {
            rows,
            filtered_len,
            page: self.pagination.page,
            page_count: self.pagination.page_count(filtered_len),
            rows_per_page: self.pagination.rows_per_page,
        }
    }

    // ---- sorting -------------------------------------------------------

    /// Header click on `column`.
    pub fn request_sort(&mut self, column: &str) -> Result<(), TableError> {
        let col = self.config.columns.require(column)?;
        if !col.sortable {
            return Err(TableError::NotSortable(column.to_string()));
        }
        self.sort.toggle(column);
        debug!(column, order = ?self.sort.order, "sort changed");
        Ok(())
    }

    // ---- filtering -----------------------------------------------------

    /// Dropdown entries in schema order.
    pub fn filter_options(&self) -> Vec<FilterOption> {
        self.config
            .columns
            .filter_options()
            .into_iter()
            .filter(|option| self.predicates.contains(&option.column))
            .collect()
    }

    /// Chooses the filter column (`None` shows everything). The page is kept.
    pub fn select_filter(&mut self, column: Option<&str>) -> Result<(), TableError> {
        if let Some(id) = column {
            self.config.columns.require(id)?;
            if !self.predicates.contains(id) {
                return Err(TableError::NotFilterable(id.to_string()));
            }
        }
        self.filter.selected = column.map(str::to_string);
        Ok(())
    }

    /// Steps the dropdown: none -> first option -> ... -> last -> none.
    pub fn cycle_filter(&mut self) {
        let options = self.filter_options();
        let next = match self.filter.selected.as_deref() {
            None => options.first(),
            Some(current) => options
                .iter()
                .position(|o| o.column == current)
                .and_then(|i| options.get(i + 1)),
        };
        self.filter.selected = next.map(|o| o.column.clone());
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.filter.search_text = text.into();
    }

    /// Label of the selected filter column.
    pub fn filter_title(&self) -> Option<&str> {
        let id = self.filter.selected.as_deref()?;
        self.config.columns.get(id).map(|c| c.label.as_str())
    }

    // ---- paging --------------------------------------------------------

    pub fn set_rows_per_page(&mut self, rows_per_page: RowsPerPage) {
        self.pagination.set_rows_per_page(rows_per_page);
    }

    pub fn next_page(&mut self) {
        let len = self.derived().len();
        self.pagination.next_page(len);
    }

    pub fn prev_page(&mut self) {
        self.pagination.prev_page();
    }

    // ---- selection -----------------------------------------------------

    /// Toggles selection of the row with identifier `id`.
    pub fn toggle_selection(&mut self, id: &str) -> Result<(), TableError> {
        if !self.config.capabilities.needs_selection() {
            return Err(TableError::NotSupported(Operation::Select));
        }
        self.selection.toggle(id);
        Ok(())
    }

    /// Toggles selection of the row at `index` on the current page.
    pub fn toggle_at(&mut self, index: usize) -> Result<(), TableError> {
        let id = {
            let view = self.view();
            let row = view
                .rows
                .get(index)
                .ok_or(TableError::RowOutOfRange(index))?;
            self.row_id(row)
        };
        self.toggle_selection(&id)
    }

    /// The selected row, if it is still in the data.
    pub fn selected_row(&self) -> Option<&T> {
        let id = self.selection.selected()?;
        self.rows.iter().find(|row| self.row_id(row) == id)
    }

    pub fn is_row_selected(&self, row: &T) -> bool {
        self.selection.is_selected(&self.row_id(row))
    }

    // ---- add / edit / view ---------------------------------------------

    /// Ok when the caller may open its create form.
    pub fn add_request(&self) -> Result<(), TableError> {
        if !self.config.capabilities.add {
            return Err(TableError::NotSupported(Operation::Add));
        }
        if !self.selection.is_empty() {
            return Err(TableError::SelectionPresent(Operation::Add));
        }
        Ok(())
    }

    /// The full row to edit.
    pub fn edit_target(&self) -> Result<&T, TableError> {
        if !self.config.capabilities.edit {
            return Err(TableError::NotSupported(Operation::Edit));
        }
        self.selected_row()
            .ok_or(TableError::SelectionRequired(Operation::Edit))
    }

    /// The full row at `index` on the current page. Needs no selection.
    pub fn view_target(&self, index: usize) -> Result<&T, TableError> {
        if !self.config.capabilities.view {
            return Err(TableError::NotSupported(Operation::View));
        }
        self.view()
            .rows
            .get(index)
            .copied()
            .ok_or(TableError::RowOutOfRange(index))
    }

    // ---- delete --------------------------------------------------------

    /// Opens the confirmation dialog for the selected row.
    pub fn request_delete(&mut self) -> Result<(), TableError> {
        if !self.config.capabilities.delete {
            return Err(TableError::NotSupported(Operation::Delete));
        }
        if self.delete.is_in_flight() {
            return Ok(());
        }
        let row = self
            .selected_row()
            .ok_or(TableError::SelectionRequired(Operation::Delete))?;
        let id = self.row_id(row);
        let name = row.cell(&self.config.name_column).to_string();
        debug!(id, name, "delete requested");
        self.delete = DeleteDialog::open(id, name);
        Ok(())
    }

    /// User confirmed. Returns the single-use token carrying the id to delete,
    /// or `None` if a delete is already in flight or no dialog is open.
    pub fn confirm_delete(&mut self) -> Option<PendingDelete> {
        self.delete.confirm()
    }

    /// Applies the caller's delete outcome. Success closes the dialog and
    /// clears the selection; failure keeps both and shows the error.
    pub fn finish_delete(&mut self, pending: PendingDelete, result: Result<(), String>) -> bool {
        let id = pending.id().to_string();
        let deleted = self.delete.finish(pending, result);
        if deleted {
            self.selection.clear();
            debug!(id, "delete finished");
        } else if let Some(error) = self.delete.error() {
            debug!(id, error, "delete failed");
        }
        deleted
    }

    /// Closes the dialog unless a delete is in flight.
    pub fn cancel_delete(&mut self) -> bool {
        self.delete.cancel()
    }

    /// Confirms and runs `delete` synchronously. The callback runs at most once
    /// and only when a confirmation was pending.
    pub fn delete_with<E, F>(&mut self, delete: F) -> bool
    where
        E: std::fmt::Display,
        F: FnOnce(&str) -> Result<(), E>,
    {
        let Some(pending) = self.confirm_delete() else {
            return false;
        };
        let result = delete(pending.id()).map_err(|e| e.to_string());
        self.finish_delete(pending, result)
    }
}
