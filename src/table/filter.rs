//! Column-scoped substring filter.

use std::collections::HashMap;

use super::{ColumnSet, TableError, TableRow};

/// Predicate for one filterable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellPredicate {
    /// Stringified cell contains the search text, ignoring case.
    ContainsIgnoreCase,
}

impl CellPredicate {
    /// `needle_lower` must already be lowercased.
    fn matches(self, cell: &str, needle_lower: &str) -> bool {
        match self {
            CellPredicate::ContainsIgnoreCase => cell.to_lowercase().contains(needle_lower),
        }
    }
}

/// Predicates keyed by column id, built once from the schema.
///
/// Only columns offered in the dropdown get a predicate, so two columns
/// sharing a label can never widen a filter to both.
#[derive(Debug, Clone)]
pub struct FilterPredicates {
    by_column: HashMap<String, CellPredicate>,
}

impl FilterPredicates {
    /// Builds predicates for every filterable column, optionally restricted to
    /// the caller's dropdown choices.
    pub fn from_schema(
        columns: &ColumnSet,
        dropdown_options: Option<&[String]>,
    ) -> Result<Self, TableError> {
        let mut by_column: HashMap<String, CellPredicate> = HashMap::new();
        match dropdown_options {
            Some(ids) => {
                for id in ids {
                    let column = columns.require(id)?;
                    if column.hidden_filter {
                        return Err(TableError::NotFilterable(id.clone()));
                    }
                    by_column.insert(id.clone(), CellPredicate::ContainsIgnoreCase);
                }
            }
            None => {
                for option in columns.filter_options() {
                    by_column.insert(option.column, CellPredicate::ContainsIgnoreCase);
                }
            }
        }
        Ok(Self { by_column })
    }

    pub fn contains(&self, column: &str) -> bool {
        self.by_column.contains_key(column)
    }

    fn get(&self, column: &str) -> Option<CellPredicate> {
        self.by_column.get(column).copied()
    }
}

/// Which column is being searched and for what.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Column id chosen in the dropdown, `None` shows every row.
    pub selected: Option<String>,
    pub search_text: String,
}

impl FilterState {
    /// Returns the rows that pass the filter, preserving order.
    pub fn apply<'a, T: TableRow>(
        &self,
        rows: impl IntoIterator<Item = &'a T>,
        predicates: &FilterPredicates,
    ) -> Vec<&'a T>
    where
        T: 'a,
    {
        let Some(column) = self.selected.as_deref() else {
            return rows.into_iter().collect();
        };
        let Some(predicate) = predicates.get(column) else {
            return rows.into_iter().collect();
        };
        let needle = self.search_text.to_lowercase();
        rows.into_iter()
            .filter(|row| predicate.matches(&row.cell(column).to_string(), &needle))
            .collect()
    }

    /// True when a column is chosen and the search text is non-empty.
    pub fn is_active(&self) -> bool {
        self.selected.is_some() && !self.search_text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;
    use serde_json::{Value, json};

    fn columns() -> ColumnSet {
        ColumnSet::new(vec![
            Column::new("id", "Id").hidden().no_filter(),
            Column::new("name", "Nombre"),
            Column::new("city", "Nombre"),
        ])
        .unwrap()
    }

    fn rows() -> Vec<Value> {
        vec![
            json!({"id": 1, "name": "Bimbo", "city": "Lima"}),
            json!({"id": 2, "name": "Ledevit", "city": "Bimbo Town"}),
        ]
    }

    fn names(rows: &[&Value]) -> Vec<String> {
        rows.iter().map(|r| r["name"].as_str().unwrap().to_string()).collect()
    }

    #[test]
    fn no_selection_is_identity() {
        let predicates = FilterPredicates::from_schema(&columns(), None).unwrap();
        let state = FilterState {
            selected: None,
            search_text: "zzz".into(),
        };
        let data = rows();
        assert_eq!(state.apply(&data, &predicates).len(), 2);
    }

    #[test]
    fn matches_substring_case_insensitively() {
        let predicates = FilterPredicates::from_schema(&columns(), None).unwrap();
        let state = FilterState {
            selected: Some("name".into()),
            search_text: "bim".into(),
        };
        let data = rows();
        assert_eq!(names(&state.apply(&data, &predicates)), vec!["Bimbo"]);
    }

    #[test]
    fn shared_labels_do_not_widen_the_filter() {
        // Both columns are labeled "Nombre"; only the chosen id is searched.
        let predicates = FilterPredicates::from_schema(&columns(), None).unwrap();
        let state = FilterState {
            selected: Some("name".into()),
            search_text: "BIMBO".into(),
        };
        let data = rows();
        assert_eq!(names(&state.apply(&data, &predicates)), vec!["Bimbo"]);
    }

    #[test]
    fn empty_search_keeps_everything() {
        let predicates = FilterPredicates::from_schema(&columns(), None).unwrap();
        let state = FilterState {
            selected: Some("city".into()),
            search_text: String::new(),
        };
        let data = rows();
        assert_eq!(state.apply(&data, &predicates).len(), 2);
        assert!(!state.is_active());
    }

    #[test]
    fn filtering_twice_changes_nothing() {
        let predicates = FilterPredicates::from_schema(&columns(), None).unwrap();
        let state = FilterState {
            selected: Some("city".into()),
            search_text: "lim".into(),
        };
        let data = rows();
        let once = state.apply(&data, &predicates);
        let twice = state.apply(once.iter().copied(), &predicates);
        assert_eq!(once, twice);
    }

    #[test]
    fn dropdown_options_restrict_predicates() {
        let set = columns();
        let predicates =
            FilterPredicates::from_schema(&set, Some(&["city".to_string()][..])).unwrap();
        assert!(predicates.contains("city"));
        assert!(!predicates.contains("name"));

        assert_eq!(
            FilterPredicates::from_schema(&set, Some(&["id".to_string()][..])).unwrap_err(),
            TableError::NotFilterable("id".into())
        );
        assert_eq!(
            FilterPredicates::from_schema(&set, Some(&["zip".to_string()][..])).unwrap_err(),
            TableError::UnknownColumn("zip".into())
        );
    }
}
