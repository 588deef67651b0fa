//! Application state management.

use crate::models::{Employee, Ingredient, Machine, Provider, Recipe};
use crate::session::{Role, SessionData};
use crate::table::{RowsPerPage, TableError};

use super::screen::{Screen, TableScreen};

/// Available tabs in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Ingredients,
    Recipes,
    Providers,
    Machines,
    Personnel,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[
            Tab::Ingredients,
            Tab::Recipes,
            Tab::Providers,
            Tab::Machines,
            Tab::Personnel,
        ]
    }

    pub fn index(self) -> usize {
        Tab::all().iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Tab for a `1`..`5` key.
    pub fn from_digit(c: char) -> Option<Tab> {
        let n = c.to_digit(10)? as usize;
        Tab::all().get(n.checked_sub(1)?).copied()
    }

    pub fn next(self) -> Tab {
        let all = Tab::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn prev(self) -> Tab {
        let all = Tab::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }

    fn screen(self, role: Role, rows_per_page: RowsPerPage) -> Result<Box<dyn Screen>, TableError> {
        Ok(match self {
            Tab::Ingredients => Box::new(TableScreen::<Ingredient>::new(role, rows_per_page)?),
            Tab::Recipes => Box::new(TableScreen::<Recipe>::new(role, rows_per_page)?),
            Tab::Providers => Box::new(TableScreen::<Provider>::new(role, rows_per_page)?),
            Tab::Machines => Box::new(TableScreen::<Machine>::new(role, rows_per_page)?),
            Tab::Personnel => Box::new(TableScreen::<Employee>::new(role, rows_per_page)?),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

/// Credentials being typed on the login popup.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    pub error: Option<String>,
}

impl LoginForm {
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }
}

/// Main application state.
pub struct AppState {
    /// One screen per tab while signed in, empty otherwise.
    pub screens: Vec<Box<dyn Screen>>,
    pub current_tab: Tab,
    pub user: Option<SessionData>,
    pub login: LoginForm,
    pub rows_per_page: RowsPerPage,
    pub show_help: bool,
    pub help_scroll: usize,
    pub show_quit_confirm: bool,
    /// Outcome of the last action, shown in the status line.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(rows_per_page: RowsPerPage, username: Option<String>) -> Self {
        let login = LoginForm {
            focus: if username.is_some() {
                LoginField::Password
            } else {
                LoginField::Username
            },
            username: username.unwrap_or_default(),
            ..LoginForm::default()
        };
        Self {
            screens: Vec::new(),
            current_tab: Tab::default(),
            user: None,
            login,
            rows_per_page,
            show_help: false,
            help_scroll: 0,
            show_quit_confirm: false,
            status_message: None,
        }
    }

    /// Builds the tabs for the signed-in role.
    pub fn sign_in(&mut self, data: SessionData) -> Result<(), TableError> {
        self.screens = Tab::all()
            .iter()
            .map(|tab| tab.screen(data.role, self.rows_per_page))
            .collect::<Result<_, _>>()?;
        self.current_tab = Tab::default();
        self.login.password.clear();
        self.login.error = None;
        self.user = Some(data);
        Ok(())
    }

    /// Drops every screen and returns to the login popup.
    pub fn sign_out(&mut self) {
        self.screens.clear();
        self.user = None;
        self.show_help = false;
        self.login.password.clear();
        self.login.focus = LoginField::Password;
    }

    pub fn current_screen(&mut self) -> Option<&mut dyn Screen> {
        let index = self.current_tab.index();
        match self.screens.get_mut(index) {
            Some(screen) => Some(screen.as_mut()),
            None => None,
        }
    }

    /// True while the current screen owns the keyboard.
    pub fn screen_captures_input(&self) -> bool {
        self.screens
            .get(self.current_tab.index())
            .is_some_and(|s| s.captures_input())
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role) -> SessionData {
        SessionData {
            token: "t".into(),
            username: "ana".into(),
            role,
        }
    }

    #[test]
    fn tabs_cycle_and_map_digits() {
        assert_eq!(Tab::Ingredients.prev(), Tab::Personnel);
        assert_eq!(Tab::Personnel.next(), Tab::Ingredients);
        assert_eq!(Tab::from_digit('3'), Some(Tab::Providers));
        assert_eq!(Tab::from_digit('0'), None);
        assert_eq!(Tab::from_digit('6'), None);
    }

    #[test]
    fn sign_in_builds_one_screen_per_tab() {
        let mut state = AppState::new(RowsPerPage::Ten, Some("ana".into()));
        assert_eq!(state.login.focus, LoginField::Password);
        state.login.password = "secret".into();

        state.sign_in(session(Role::Staff)).unwrap();
        assert_eq!(state.screens.len(), Tab::all().len());
        assert!(state.login.password.is_empty());
        state.switch_tab(Tab::Machines);
        assert_eq!(state.current_screen().map(|s| s.title()), Some("Maquinaria"));

        state.sign_out();
        assert!(state.current_screen().is_none());
        assert!(state.user.is_none());
    }
}
