//! Personnel (personal).

use serde::{Deserialize, Serialize};

use super::{Entity, id_column};
use crate::session::Role;
use crate::table::{CellValue, Capabilities, Column, TableRow};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: u32,
    pub name: String,
    pub position: String,
    pub phone: String,
    /// `dd/mm/yyyy`
    pub hired: String,
}

impl TableRow for Employee {
    fn cell(&self, column: &str) -> CellValue {
        match column {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "position" => self.position.as_str().into(),
            "phone" => self.phone.as_str().into(),
            "hired" => self.hired.as_str().into(),
            _ => CellValue::Empty,
        }
    }
}

impl Entity for Employee {
    const PATH: &'static str = "personal";
    const TITLE: &'static str = "Personal";
    const DATE_COLUMNS: &'static [&'static str] = &["hired"];

    fn columns() -> Vec<Column> {
        vec![
            id_column(),
            Column::new("name", "Nombre"),
            Column::new("position", "Puesto"),
            Column::new("phone", "Teléfono").not_sortable().no_filter(),
            Column::new("hired", "Ingreso"),
        ]
    }

    fn capabilities(role: Role) -> Capabilities {
        if role.may_manage_staff() {
            role.capabilities()
        } else {
            role.capabilities().with_add(false).with_edit(false)
        }
    }
}
