//! Ingredients in stock (insumos).

use serde::{Deserialize, Serialize};

use super::{Entity, id_column};
use crate::table::{CellValue, Column, TableRow};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: u32,
    pub name: String,
    pub unit: String,
    pub stock: f64,
    /// `dd/mm/yyyy`
    pub expiry: String,
    pub provider: String,
}

impl TableRow for Ingredient {
    fn cell(&self, column: &str) -> CellValue {
        match column {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "unit" => self.unit.as_str().into(),
            "stock" => self.stock.into(),
            "expiry" => self.expiry.as_str().into(),
            "provider" => self.provider.as_str().into(),
            _ => CellValue::Empty,
        }
    }
}

impl Entity for Ingredient {
    const PATH: &'static str = "insumos";
    const TITLE: &'static str = "Insumos";
    const DATE_COLUMNS: &'static [&'static str] = &["expiry"];

    fn columns() -> Vec<Column> {
        vec![
            id_column(),
            Column::new("name", "Nombre"),
            Column::new("unit", "Unidad").no_filter(),
            Column::new("stock", "Stock"),
            Column::new("expiry", "Vencimiento"),
            Column::new("provider", "Proveedor"),
        ]
    }
}
