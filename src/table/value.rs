//! Cell values and the row trait.

use std::fmt;

/// A single cell as seen by the engine.
///
/// Rows hand out cells by column id; the engine never looks at the row type
/// itself. Stringification (`Display`) is what filtering and dialog labels use.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Number(f64),
    /// Missing field or JSON null.
    Empty,
}

impl CellValue {
    /// Coerces the value to a number the way a loosely typed `Number(x)` would:
    /// numbers pass through, text is trimmed and parsed (empty text is 0),
    /// anything else is not numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Integer(v) => Some(*v as f64),
            CellValue::Number(v) if !v.is_nan() => Some(*v),
            CellValue::Number(_) => None,
            CellValue::Text(s) => coerce_text(s),
            CellValue::Empty => None,
        }
    }

    /// Returns the text content, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

fn coerce_text(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0.0);
    }
    match s.trim_start_matches(['+', '-']) {
        "Infinity" => {
            return Some(if s.starts_with('-') {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            });
        }
        // Rust accepts these spellings, a JS-style coercion does not.
        rest if rest.eq_ignore_ascii_case("inf")
            || rest.eq_ignore_ascii_case("infinity")
            || rest.eq_ignore_ascii_case("nan") =>
        {
            return None;
        }
        _ => {}
    }
    s.parse::<f64>().ok().filter(|v| !v.is_nan())
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Integer(v) => write!(f, "{}", v),
            CellValue::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => {
                write!(f, "{}", *v as i64)
            }
            CellValue::Number(v) => write!(f, "{}", v),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Integer(v)
    }
}

impl From<u32> for CellValue {
    fn from(v: u32) -> Self {
        CellValue::Integer(v as i64)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(v: Option<V>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

impl From<&serde_json::Value> for CellValue {
    fn from(v: &serde_json::Value) -> Self {
        use serde_json::Value;
        match v {
            Value::Null => CellValue::Empty,
            Value::Bool(b) => CellValue::Text(b.to_string()),
            Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Integer(i),
                None => CellValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => CellValue::Text(s.clone()),
            other => CellValue::Text(other.to_string()),
        }
    }
}

/// Trait for rows rendered by a table.
pub trait TableRow: Clone {
    /// Cell value for the given column id. Unknown columns yield `Empty`.
    fn cell(&self, column: &str) -> CellValue;
}

impl TableRow for serde_json::Value {
    fn cell(&self, column: &str) -> CellValue {
        self.get(column).map(CellValue::from).unwrap_or(CellValue::Empty)
    }
}
