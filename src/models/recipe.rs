//! Recipes (recetas).

use serde::{Deserialize, Serialize};

use super::{Entity, id_column};
use crate::table::{CellValue, Column, TableRow};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u32,
    pub name: String,
    pub category: String,
    /// Units produced per batch.
    pub yield_units: u32,
    pub prep_minutes: u32,
}

impl TableRow for Recipe {
    fn cell(&self, column: &str) -> CellValue {
        match column {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "category" => self.category.as_str().into(),
            "yield_units" => self.yield_units.into(),
            "prep_minutes" => self.prep_minutes.into(),
            _ => CellValue::Empty,
        }
    }
}

impl Entity for Recipe {
    const PATH: &'static str = "recetas";
    const TITLE: &'static str = "Recetas";

    fn columns() -> Vec<Column> {
        vec![
            id_column(),
            Column::new("name", "Nombre"),
            Column::new("category", "Categoría"),
            Column::new("yield_units", "Rinde"),
            Column::new("prep_minutes", "Minutos"),
        ]
    }
}
