//! Supported row operations and the affordances derived from them.

/// Operations a table offers. Built once per table and inspected on render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub add: bool,
    pub edit: bool,
    pub delete: bool,
    pub view: bool,
}

impl Capabilities {
    pub fn all() -> Self {
        Self {
            add: true,
            edit: true,
            delete: true,
            view: true,
        }
    }

    /// Only the per-row detail action.
    pub fn read_only() -> Self {
        Self {
            view: true,
            ..Self::default()
        }
    }

    pub fn with_add(mut self, on: bool) -> Self {
        self.add = on;
        self
    }

    pub fn with_edit(mut self, on: bool) -> Self {
        self.edit = on;
        self
    }

    pub fn with_delete(mut self, on: bool) -> Self {
        self.delete = on;
        self
    }


    /// Rows need a selection control when any selection-based action exists.
    pub fn needs_selection(&self) -> bool {
        self.edit || self.delete
    }
}

/// What the table shows for the current state.
///
/// `Some(enabled)` means the button is rendered; `None` means it is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordances {
    pub add: Option<bool>,
    pub edit: Option<bool>,
    pub delete: Option<bool>,
    pub view: bool,
    pub selection_column: bool,
    pub filter_bar: bool,
}

impl Affordances {
    pub fn derive(capabilities: Capabilities, selected_count: usize, filter_bar: bool) -> Self {
        let exactly_one = selected_count == 1;
        Self {
            add: capabilities.add.then_some(selected_count == 0),
            edit: capabilities.edit.then_some(exactly_one),
            delete: capabilities.delete.then_some(exactly_one),
            view: capabilities.view,
            selection_column: capabilities.needs_selection(),
            filter_bar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_disabled_while_selected() {
        let a = Affordances::derive(Capabilities::all(), 0, true);
        assert_eq!(a.add, Some(true));
        let a = Affordances::derive(Capabilities::all(), 1, true);
        assert_eq!(a.add, Some(false));
    }

    #[test]
    fn delete_disabled_unless_exactly_one() {
        for count in 0..=1 {
            let a = Affordances::derive(Capabilities::all(), count, true);
            assert_eq!(a.delete, Some(count == 1));
            assert_eq!(a.edit, Some(count == 1));
        }
    }

    #[test]
    fn absent_capabilities_render_nothing() {
        let a = Affordances::derive(Capabilities::read_only(), 0, false);
        assert_eq!(a.add, None);
        assert_eq!(a.edit, None);
        assert_eq!(a.delete, None);
        assert!(a.view);
        assert!(!a.selection_column);
        assert!(!a.filter_bar);
    }

    #[test]
    fn delete_alone_still_gets_selection_column() {
        let caps = Capabilities::default().with_delete(true);
        assert!(Affordances::derive(caps, 0, true).selection_column);
    }

    #[test]
    fn setters_switch_single_operations() {
        let caps = Capabilities::all().with_add(false).with_edit(false);
        assert!(!caps.add);
        assert!(!caps.edit);
        assert!(caps.delete);
        assert!(caps.view);
        assert!(caps.needs_selection());
    }
}
