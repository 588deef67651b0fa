//! Generic tabular data engine: sorting, filtering, paging, selection and the
//! delete confirmation workflow shared by every list screen.
//!
//! Rows are derived on every `view()` as filter -> sort -> paginate over the
//! rows most recently handed to `set_rows`.

mod capabilities;
pub mod compare;
mod column;
mod delete;
mod engine;
mod filter;
mod pagination;
mod selection;
mod sort;
mod value;

use thiserror::Error;

pub use capabilities::{Affordances, Capabilities};
pub use column::{Column, ColumnSet, FilterOption};
pub use delete::{DeleteDialog, PendingDelete};
pub use engine::{TableConfig, TableEngine, TableView};
pub use filter::{CellPredicate, FilterPredicates, FilterState};
pub use pagination::{Pagination, RowsPerPage};
pub use selection::Selection;
pub use sort::{SortOrder, SortState};
pub use value::{CellValue, TableRow};

/// Row operations that can be offered by a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Edit,
    Delete,
    View,
    Select,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::Add => "add",
            Operation::Edit => "edit",
            Operation::Delete => "delete",
            Operation::View => "view",
            Operation::Select => "select",
        };
        f.write_str(name)
    }
}

/// Misuse of a table: bad schema, unknown column, or an action that is not
/// available in the current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("column set is empty")]
    EmptySchema,

    #[error("duplicate column id '{0}'")]
    DuplicateColumn(String),

    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    #[error("column '{0}' is not sortable")]
    NotSortable(String),

    #[error("column '{0}' is not filterable")]
    NotFilterable(String),

    #[error("this table does not support {0}")]
    NotSupported(Operation),

    #[error("{0} is not available while a row is selected")]
    SelectionPresent(Operation),

    #[error("{0} requires exactly one selected row")]
    SelectionRequired(Operation),

    #[error("no row at position {0} on this page")]
    RowOutOfRange(usize),
}
