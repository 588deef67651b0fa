//! Column schema.

use std::collections::HashSet;

use super::TableError;

/// Describes how one row field is labeled, sorted, filtered and displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub id: String,
    pub label: String,
    pub sortable: bool,
    /// Kept in the schema but never rendered (identifier fields).
    pub hidden_column: bool,
    /// Excluded from the filter dropdown.
    pub hidden_filter: bool,
}

impl Column {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            sortable: true,
            hidden_column: false,
            hidden_filter: false,
        }
    }

    /// Marks the column as hidden from rendering.
    pub fn hidden(mut self) -> Self {
        self.hidden_column = true;
        self
    }

    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Removes the column from the filter options.
    pub fn no_filter(mut self) -> Self {
        self.hidden_filter = true;
        self
    }
}

/// An entry of the filter dropdown: the column it scopes and its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub column: String,
    pub title: String,
}

/// Validated, ordered set of columns with a designated identifier column.
#[derive(Debug, Clone)]
pub struct ColumnSet {
    columns: Vec<Column>,
    id_column: usize,
}

impl ColumnSet {
    /// Builds a column set. The first column carries the row identifier
    /// unless `with_id_column` says otherwise.
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        if columns.is_empty() {
            return Err(TableError::EmptySchema);
        }
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.id.as_str()) {
                return Err(TableError::DuplicateColumn(column.id.clone()));
            }
        }
        Ok(Self {
            columns,
            id_column: 0,
        })
    }

    /// Designates another column as the row identifier.
    pub fn with_id_column(mut self, id: &str) -> Result<Self, TableError> {
        self.id_column = self.position(id)?;
        Ok(self)
    }

    pub fn get(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    fn position(&self, id: &str) -> Result<usize, TableError> {
        self.columns
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| TableError::UnknownColumn(id.to_string()))
    }

    /// Looks up a column, failing with `UnknownColumn`.
    pub fn require(&self, id: &str) -> Result<&Column, TableError> {
        self.get(id)
            .ok_or_else(|| TableError::UnknownColumn(id.to_string()))
    }

    pub fn id_column(&self) -> &Column {
        &self.columns[self.id_column]
    }

    pub fn all(&self) -> &[Column] {
        &self.columns
    }

    /// Columns that are rendered, in schema order.
    pub fn visible(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.hidden_column)
    }

    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }

    /// Dropdown options for every filterable column.
    pub fn filter_options(&self) -> Vec<FilterOption> {
        self.columns
            .iter()
            .filter(|c| !c.hidden_filter)
            .map(|c| FilterOption {
                column: c.id.clone(),
                title: c.label.clone(),
            })
            .collect()
    }
}
