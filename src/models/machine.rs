//! Machinery (maquinaria).

use serde::{Deserialize, Serialize};

use super::{Entity, id_column};
use crate::table::{CellValue, Column, TableRow};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub id: u32,
    pub name: String,
    pub brand: String,
    /// `dd/mm/yyyy`
    pub purchased: String,
    /// `dd/mm/yyyy`
    pub last_service: String,
}

impl TableRow for Machine {
    fn cell(&self, column: &str) -> CellValue {
        match column {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "brand" => self.brand.as_str().into(),
            "purchased" => self.purchased.as_str().into(),
            "last_service" => self.last_service.as_str().into(),
            _ => CellValue::Empty,
        }
    }
}

impl Entity for Machine {
    const PATH: &'static str = "maquinaria";
    const TITLE: &'static str = "Maquinaria";
    const DATE_COLUMNS: &'static [&'static str] = &["purchased", "last_service"];

    fn columns() -> Vec<Column> {
        vec![
            id_column(),
            Column::new("name", "Nombre"),
            Column::new("brand", "Marca"),
            Column::new("purchased", "Compra"),
            Column::new("last_service", "Último service"),
        ]
    }
}
