//! Single-row selection keyed by row identifier.

/// At most one selected row, tracked by its identifier so the selection
/// follows the row across paging, sorting and filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<String>,
}

impl Selection {
    /// Selects `id`, replacing any previous selection. Toggling the selected
    /// id clears the selection.
    pub fn toggle(&mut self, id: &str) {
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        } else {
            self.selected = Some(id.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// Always 0 or 1.
    pub fn count(&self) -> usize {
        usize::from(self.selected.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }

    /// Drops the selection when its row is gone. Returns true if it was dropped.
    pub fn retain_existing<'a>(&mut self, mut ids: impl Iterator<Item = &'a str>) -> bool {
        match self.selected.as_deref() {
            Some(current) if !ids.any(|id| id == current) => {
                self.selected = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selecting_another_row_replaces() {
        let mut s = Selection::default();
        s.toggle("1");
        s.toggle("2");
        assert_eq!(s.selected(), Some("2"));
        assert_eq!(s.count(), 1);
    }

    #[test]
    fn reselecting_clears() {
        let mut s = Selection::default();
        s.toggle("1");
        s.toggle("1");
        assert!(s.is_empty());
    }

    #[test]
    fn count_never_exceeds_one() {
        let mut s = Selection::default();
        for id in ["1", "2", "2", "3", "1", "4", "4", "4"] {
            s.toggle(id);
            assert!(s.count() <= 1);
        }
    }

    #[test]
    fn stale_selection_is_dropped() {
        let mut s = Selection::default();
        s.toggle("7");
        assert!(!s.retain_existing(["5", "7"].into_iter()));
        assert_eq!(s.selected(), Some("7"));
        assert!(s.retain_existing(["5", "6"].into_iter()));
        assert!(s.is_empty());
    }
}
