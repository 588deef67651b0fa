//! Sort state and stable row ordering.

use super::compare::ColumnKind;
use super::{CellValue, TableRow};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Arrow shown next to the active header.
    pub fn arrow(self) -> &'static str {
        match self {
            SortOrder::Asc => "▲",
            SortOrder::Desc => "▼",
        }
    }
}

/// Active sort column and direction. No column means insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    pub order: SortOrder,
    pub order_by: Option<String>,
}

impl SortState {
    /// Header click: the active ascending column flips to descending, anything
    /// else becomes the active column in ascending order.
    pub fn toggle(&mut self, column: &str) {
        let is_active_asc =
            self.order_by.as_deref() == Some(column) && self.order == SortOrder::Asc;
        self.order = if is_active_asc {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        };
        self.order_by = Some(column.to_string());
    }

    /// Sorts rows in place. Equal keys keep their relative order.
    ///
    /// The comparison rule is chosen once from every cell of the column, so
    /// a column mixing dates, numbers and text still sorts consistently.
    pub fn apply<T: TableRow>(&self, rows: &mut [&T]) {
        let Some(column) = self.order_by.as_deref() else {
            return;
        };
        let cells: Vec<CellValue> = rows.iter().map(|row| row.cell(column)).collect();
        let kind = ColumnKind::of(&cells);

        let mut order: Vec<usize> = (0..rows.len()).collect();
        match self.order {
            SortOrder::Desc => order.sort_by(|&a, &b| kind.descending(&cells[a], &cells[b])),
            SortOrder::Asc => {
                order.sort_by(|&a, &b| kind.descending(&cells[a], &cells[b]).reverse())
            }
        }

        let original = rows.to_vec();
        for (slot, index) in rows.iter_mut().zip(order) {
            *slot = original[index];
        }
    }

    /// Returns the direction if `column` is the active sort column.
    pub fn direction_of(&self, column: &str) -> Option<SortOrder> {
        (self.order_by.as_deref() == Some(column)).then_some(self.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn sorted(state: &SortState, rows: &[Value]) -> Vec<Value> {
        let mut refs: Vec<&Value> = rows.iter().collect();
        state.apply(&mut refs);
        refs.into_iter().cloned().collect()
    }

    #[test]
    fn toggle_goes_asc_then_desc_then_asc() {
        let mut state = SortState::default();
        assert_eq!(state.order_by, None);

        state.toggle("q");
        assert_eq!(state.direction_of("q"), Some(SortOrder::Asc));
        state.toggle("q");
        assert_eq!(state.direction_of("q"), Some(SortOrder::Desc));
        state.toggle("q");
        assert_eq!(state.direction_of("q"), Some(SortOrder::Asc));
    }

    #[test]
    fn switching_column_restarts_ascending() {
        let mut state = SortState::default();
        state.toggle("q");
        state.toggle("q");
        state.toggle("name");
        assert_eq!(state.direction_of("name"), Some(SortOrder::Asc));
        assert_eq!(state.direction_of("q"), None);
    }

    #[test]
    fn numeric_sort_both_directions() {
        let rows = vec![json!({"q": 10}), json!({"q": 2}), json!({"q": 30})];
        let desc = SortState {
            order: SortOrder::Desc,
            order_by: Some("q".into()),
        };
        assert_eq!(
            sorted(&desc, &rows),
            vec![json!({"q": 30}), json!({"q": 10}), json!({"q": 2})]
        );

        let asc = SortState {
            order: SortOrder::Asc,
            order_by: Some("q".into()),
        };
        assert_eq!(
            sorted(&asc, &rows),
            vec![json!({"q": 2}), json!({"q": 10}), json!({"q": 30})]
        );
    }

    #[test]
    fn date_sort_descending() {
        let rows = vec![
            json!({"d": "01/06/2022"}),
            json!({"d": "20/06/2022"}),
            json!({"d": "15/06/2022"}),
        ];
        let desc = SortState {
            order: SortOrder::Desc,
            order_by: Some("d".into()),
        };
        let order: Vec<String> = sorted(&desc, &rows)
            .iter()
            .map(|r| r["d"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(order, vec!["20/06/2022", "15/06/2022", "01/06/2022"]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let rows = vec![
            json!({"k": 1, "tag": "a"}),
            json!({"k": 0, "tag": "b"}),
            json!({"k": 1, "tag": "c"}),
            json!({"k": 0, "tag": "d"}),
        ];
        for order in [SortOrder::Asc, SortOrder::Desc] {
            let state = SortState {
                order,
                order_by: Some("k".into()),
            };
            let tags: Vec<String> = sorted(&state, &rows)
                .iter()
                .map(|r| r["tag"].as_str().unwrap().to_string())
                .collect();
            let expected = match order {
                SortOrder::Asc => vec!["b", "d", "a", "c"],
                SortOrder::Desc => vec!["a", "c", "b", "d"],
            };
            assert_eq!(tags, expected);
        }
    }

    #[test]
    fn no_column_keeps_order() {
        let rows = vec![json!({"q": 3}), json!({"q": 1})];
        assert_eq!(sorted(&SortState::default(), &rows), rows);
    }

    #[test]
    fn mixed_column_sorts_without_panicking() {
        let pool = [
            "20/06/2021", "15/06/2022", "18", "10", "9", "5a", "abc", "01/01/2030", "3", "x",
        ];
        let rows: Vec<Value> = (0..200)
            .map(|i| json!({"v": pool[(i * 3 + i / 7) % pool.len()], "n": i}))
            .collect();
        for order in [SortOrder::Asc, SortOrder::Desc] {
            let state = SortState {
                order,
                order_by: Some("v".into()),
            };
            let values: Vec<String> = sorted(&state, &rows)
                .iter()
                .map(|r| r["v"].as_str().unwrap().to_string())
                .collect();
            assert_eq!(values.len(), rows.len());
            for pair in values.windows(2) {
                match order {
                    SortOrder::Asc => assert!(pair[0] <= pair[1]),
                    SortOrder::Desc => assert!(pair[0] >= pair[1]),
                }
            }
        }
    }

    #[test]
    fn one_stray_value_sorts_the_column_as_text() {
        let rows = vec![json!({"v": "10"}), json!({"v": "9"}), json!({"v": "5a"})];
        let asc = SortState {
            order: SortOrder::Asc,
            order_by: Some("v".into()),
        };
        let values: Vec<String> = sorted(&asc, &rows)
            .iter()
            .map(|r| r["v"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(values, vec!["10", "5a", "9"]);
    }
}
