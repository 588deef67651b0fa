//! Add/edit form built from a table's visible columns.
//!
//! Field kinds come from the record's JSON shape: numbers stay numbers, date
//! columns must parse as `dd/mm/yyyy`, everything else is text.

use serde_json::{Map, Number, Value};

use crate::table::{CellValue, ColumnSet};
use crate::util::parse_day_month_year;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Number,
    Date,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub column: String,
    pub label: String,
    pub value: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FormField {
    /// Parses the typed text into the JSON value stored for this field.
    fn parse(&self) -> Result<Value, String> {
        let text = self.value.trim();
        if self.required && text.is_empty() {
            return Err(format!("{} is required", self.label));
        }
        match self.kind {
            FieldKind::Text => Ok(Value::String(text.to_string())),
            FieldKind::Integer => text
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| format!("{}: expected a whole number", self.label)),
            FieldKind::Number => text
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| format!("{}: expected a number", self.label)),
            FieldKind::Date => match parse_day_month_year(text) {
                Some(_) => Ok(Value::String(text.to_string())),
                None => Err(format!("{}: expected dd/mm/yyyy", self.label)),
            },
        }
    }
}

/// Editable copy of one record.
#[derive(Debug, Clone)]
pub struct RecordForm {
    pub title: String,
    pub fields: Vec<FormField>,
    pub focus: usize,
    pub error: Option<String>,
    /// Id of the record being edited; `None` when adding.
    target: Option<String>,
    base: Map<String, Value>,
}

impl RecordForm {
    /// `record` is the JSON form of the row being edited (or of an empty row
    /// when adding). Hidden columns are carried over untouched.
    pub fn new(
        title: impl Into<String>,
        columns: &ColumnSet,
        record: Value,
        target: Option<String>,
        date_columns: &[&str],
        name_column: &str,
    ) -> Self {
        let base = match record {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let fields = columns
            .visible()
            .map(|column| {
                let current = base.get(&column.id);
                let kind = if date_columns.contains(&column.id.as_str()) {
                    FieldKind::Date
                } else {
                    match current {
                        Some(Value::Number(n)) if n.is_f64() => FieldKind::Number,
                        Some(Value::Number(_)) => FieldKind::Integer,
                        _ => FieldKind::Text,
                    }
                };
                let value = match current {
                    Some(Value::String(s)) => s.clone(),
                    Some(v) => CellValue::from(v).to_string(),
                    None => String::new(),
                };
                FormField {
                    column: column.id.clone(),
                    label: column.label.clone(),
                    value,
                    kind,
                    required: column.id == name_column,
                }
            })
            .collect();
        Self {
            title: title.into(),
            fields,
            focus: 0,
            error: None,
            target,
            base,
        }
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn input(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    /// Builds the record to send. The first invalid field wins the focus.
    pub fn submit(&mut self) -> Result<Value, String> {
        let mut record = self.base.clone();
        for (index, field) in self.fields.iter().enumerate() {
            match field.parse() {
                Ok(value) => {
                    record.insert(field.column.clone(), value);
                }
                Err(message) => {
                    self.focus = index;
                    self.error = Some(message.clone());
                    return Err(message);
                }
            }
        }
        self.error = None;
        Ok(Value::Object(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;
    use serde_json::json;

    fn columns() -> ColumnSet {
        ColumnSet::new(vec![
            Column::new("id", "Id").hidden(),
            Column::new("name", "Nombre"),
            Column::new("stock", "Stock"),
            Column::new("units", "Unidades"),
            Column::new("expiry", "Vencimiento"),
        ])
        .unwrap()
    }

    fn form(record: Value) -> RecordForm {
        RecordForm::new("Insumo", &columns(), record, Some("7".into()), &["expiry"], "name")
    }

    #[test]
    fn fields_follow_visible_columns_and_json_types() {
        let form = form(json!({
            "id": 7,
            "name": "Harina",
            "stock": 2.5,
            "units": 3,
            "expiry": "01/02/2022"
        }));
        let kinds: Vec<FieldKind> = form.fields.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![FieldKind::Text, FieldKind::Number, FieldKind::Integer, FieldKind::Date]
        );
        assert_eq!(form.fields[1].value, "2.5");
        assert_eq!(form.target(), Some("7"));
    }

    #[test]
    fn submit_keeps_hidden_fields_and_types() {
        let mut form = form(json!({
            "id": 7,
            "name": "Harina",
            "stock": 2.0,
            "units": 3,
            "expiry": ""
        }));
        form.focus = 1;
        form.backspace();
        form.input('5');
        form.focus = 3;
        for c in "29/02/2024".chars() {
            form.input(c);
        }
        let record = form.submit().unwrap();
        assert_eq!(
            record,
            json!({"id": 7, "name": "Harina", "stock": 5.0, "units": 3, "expiry": "29/02/2024"})
        );
    }

    #[test]
    fn invalid_fields_are_reported_and_focused() {
        let mut form = form(json!({
            "id": 7,
            "name": "Harina",
            "stock": 1.0,
            "units": 3,
            "expiry": "31/02/2022"
        }));
        assert_eq!(form.submit().unwrap_err(), "Vencimiento: expected dd/mm/yyyy");
        assert_eq!(form.focus, 3);

        form.fields[2].value = "tres".into();
        assert!(form.submit().unwrap_err().starts_with("Unidades"));
        assert_eq!(form.error.as_deref(), Some("Unidades: expected a whole number"));

        form.fields[0].value = "  ".into();
        assert_eq!(form.submit().unwrap_err(), "Nombre is required");
    }

    #[test]
    fn focus_wraps() {
        let mut form = form(json!({}));
        form.prev_field();
        assert_eq!(form.focus, 3);
        form.next_field();
        assert_eq!(form.focus, 0);
    }
}
