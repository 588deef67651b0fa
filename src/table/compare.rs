//! Heterogeneous cell comparator.
//!
//! Values are classified pairwise, in priority order:
//! 1. both strict `dd/mm/yyyy` calendar dates -> chronological
//! 2. both numeric after loose coercion -> numeric
//! 3. otherwise -> lexicographic on the stringified values
//!
//! Mixed pairs (one date, one not) fall through to string comparison, so the
//! pairwise rules alone are not a total order on a mixed column. Sorting a
//! whole column goes through `ColumnKind`, which picks one rule for every
//! pair: dates if all cells are dates, numbers if all are numeric, text
//! otherwise.

use std::cmp::Ordering;

use crate::util::parse_day_month_year;

use super::{CellValue, TableRow};

/// Comparator for descending order: `Less` means `a` sorts before `b`.
pub fn descending(a: &CellValue, b: &CellValue) -> Ordering {
    if let (Some(da), Some(db)) = (as_date(a), as_date(b)) {
        return db.cmp(&da);
    }
    if let (Some(na), Some(nb)) = (a.as_number(), b.as_number()) {
        return nb.partial_cmp(&na).unwrap_or(Ordering::Equal);
    }
    text_descending(a, b)
}

/// Comparator for ascending order (the negated descending comparator).
pub fn ascending(a: &CellValue, b: &CellValue) -> Ordering {
    descending(a, b).reverse()
}

/// Compares two rows on one column, descending.
pub fn compare_rows<T: TableRow>(a: &T, b: &T, column: &str) -> Ordering {
    descending(&a.cell(column), &b.cell(column))
}

fn as_date(value: &CellValue) -> Option<chrono::NaiveDate> {
    value.as_text().and_then(parse_day_month_year)
}

fn text_descending(a: &CellValue, b: &CellValue) -> Ordering {
    b.to_string().cmp(&a.to_string())
}

/// Comparison rule shared by every pair of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Every cell is a strict `dd/mm/yyyy` date.
    Date,
    /// Every cell coerces to a number.
    Number,
    /// Anything else, including mixed columns.
    Text,
}

impl ColumnKind {
    /// Classifies a column from all of its cells. An empty column is `Text`.
    pub fn of(cells: &[CellValue]) -> ColumnKind {
        if cells.is_empty() {
            ColumnKind::Text
        } else if cells.iter().all(|c| as_date(c).is_some()) {
            ColumnKind::Date
        } else if cells.iter().all(|c| c.as_number().is_some()) {
            ColumnKind::Number
        } else {
            ColumnKind::Text
        }
    }

    /// Descending comparator under this rule. Total on cells the column was
    /// classified from.
    pub fn descending(self, a: &CellValue, b: &CellValue) -> Ordering {
        match self {
            ColumnKind::Date => match (as_date(a), as_date(b)) {
                (Some(da), Some(db)) => db.cmp(&da),
                _ => text_descending(a, b),
            },
            ColumnKind::Number => match (a.as_number(), b.as_number()) {
                (Some(na), Some(nb)) => nb.total_cmp(&na),
                _ => text_descending(a, b),
            },
            ColumnKind::Text => text_descending(a, b),
        }
    }
}
