//! Bakery entities shown by the dashboard.
//!
//! Each entity is a typed row with its service path, column schema and the
//! operations its screen offers.

mod employee;
mod ingredient;
mod machine;
mod provider;
mod recipe;

pub use employee::Employee;
pub use ingredient::Ingredient;
pub use machine::Machine;
pub use provider::Provider;
pub use recipe::Recipe;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::session::Role;
use crate::table::{
    Capabilities, Column, ColumnSet, RowsPerPage, TableConfig, TableError, TableRow,
};

/// A record type backed by a service collection.
pub trait Entity: TableRow + Serialize + DeserializeOwned + Default + Send + 'static {
    /// Collection path on the service, without slashes.
    const PATH: &'static str;
    /// Tab title.
    const TITLE: &'static str;
    /// Columns holding `dd/mm/yyyy` dates.
    const DATE_COLUMNS: &'static [&'static str] = &[];

    /// Column schema; the hidden `id` column comes first.
    fn columns() -> Vec<Column>;

    /// Column labeling the delete confirmation.
    fn name_column() -> &'static str {
        "name"
    }

    /// Operations offered to `role`.
    fn capabilities(role: Role) -> Capabilities {
        role.capabilities()
    }

    fn table_config(role: Role, rows_per_page: RowsPerPage) -> Result<TableConfig, TableError> {
        let columns = ColumnSet::new(Self::columns())?;
        Ok(TableConfig::new(columns, Self::name_column())
            .capabilities(Self::capabilities(role))
            .rows_per_page(rows_per_page))
    }
}

/// The hidden identifier column every entity starts with.
fn id_column() -> Column {
    Column::new("id", "Id").hidden().no_filter()
}
