//! Suppliers (proveedores).

use serde::{Deserialize, Serialize};

use super::{Entity, id_column};
use crate::table::{CellValue, Column, TableRow};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: u32,
    pub name: String,
    pub contact: String,
    pub phone: String,
    pub email: String,
}

impl TableRow for Provider {
    fn cell(&self, column: &str) -> CellValue {
        match column {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "contact" => self.contact.as_str().into(),
            "phone" => self.phone.as_str().into(),
            "email" => self.email.as_str().into(),
            _ => CellValue::Empty,
        }
    }
}

impl Entity for Provider {
    const PATH: &'static str = "proveedores";
    const TITLE: &'static str = "Proveedores";

    fn columns() -> Vec<Column> {
        vec![
            id_column(),
            Column::new("name", "Nombre"),
            Column::new("contact", "Contacto"),
            // Phone numbers would coerce to numbers; ordering them means nothing.
            Column::new("phone", "Teléfono").not_sortable(),
            Column::new("email", "Email"),
        ]
    }
}
