//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::screen::ScreenCommand;
use super::state::{AppState, Tab};

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Submit the login form.
    Login,
    /// Drop the session.
    Logout,
    /// Reload the current tab.
    Refresh,
    /// The current screen queued service work.
    Execute,
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }
    if state.show_quit_confirm {
        return handle_quit_confirm(state, key);
    }
    if state.user.is_none() {
        return handle_login(state, key);
    }
    if state.show_help {
        return handle_help(state, key);
    }
    if state.screen_captures_input() {
        return forward_to_screen(state, key);
    }
    handle_normal_mode(state, key)
}

fn handle_quit_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.show_quit_confirm = false;
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.show_quit_confirm = false;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

fn handle_login(state: &mut AppState, key: KeyEvent) -> KeyAction {
    let login = &mut state.login;
    match key.code {
        KeyCode::Esc => state.show_quit_confirm = true,
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => login.toggle_focus(),
        KeyCode::Backspace => {
            login.focused_mut().pop();
        }
        KeyCode::Char(c) => login.focused_mut().push(c),
        KeyCode::Enter => {
            if login.username.trim().is_empty() {
                login.error = Some("User is required".to_string());
                return KeyAction::None;
            }
            return KeyAction::Login;
        }
        _ => {}
    }
    KeyAction::None
}

fn handle_help(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => {
            state.show_help = false;
            state.help_scroll = 0;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.help_scroll = state.help_scroll.saturating_sub(1)
        }
        // Clamped during render.
        KeyCode::Down | KeyCode::Char('j') => {
            state.help_scroll = state.help_scroll.saturating_add(1)
        }
        _ => {}
    }
    KeyAction::None
}

fn forward_to_screen(state: &mut AppState, key: KeyEvent) -> KeyAction {
    let Some(screen) = state.current_screen() else {
        return KeyAction::None;
    };
    match screen.handle_key(key) {
        ScreenCommand::None => KeyAction::None,
        ScreenCommand::Status(message) => {
            state.status_message = Some(message);
            KeyAction::None
        }
        ScreenCommand::Execute => KeyAction::Execute,
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.show_quit_confirm = true;
            KeyAction::None
        }
        KeyCode::Char('?') => {
            state.show_help = true;
            KeyAction::None
        }
        KeyCode::Char('o') => KeyAction::Logout,
        KeyCode::F(5) => KeyAction::Refresh,

        KeyCode::Tab => {
            state.switch_tab(state.current_tab.next());
            KeyAction::Refresh
        }
        KeyCode::BackTab => {
            state.switch_tab(state.current_tab.prev());
            KeyAction::Refresh
        }
        KeyCode::Char(c @ '1'..='9') => match Tab::from_digit(c) {
            Some(tab) => {
                state.switch_tab(tab);
                KeyAction::Refresh
            }
            None => KeyAction::None,
        },

        KeyCode::Esc => {
            state.status_message = None;
            KeyAction::None
        }

        _ => forward_to_screen(state, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Role, SessionData};
    use crate::table::RowsPerPage;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn signed_in() -> AppState {
        let mut state = AppState::new(RowsPerPage::Five, None);
        state
            .sign_in(SessionData {
                token: "t".into(),
                username: "ana".into(),
                role: Role::Admin,
            })
            .unwrap();
        state
    }

    #[test]
    fn login_form_collects_credentials() {
        let mut state = AppState::new(RowsPerPage::Five, None);
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter)), KeyAction::None);
        assert!(state.login.error.is_some());

        for c in "ana".chars() {
            handle_key(&mut state, key(KeyCode::Char(c)));
        }
        handle_key(&mut state, key(KeyCode::Tab));
        for c in "pw".chars() {
            handle_key(&mut state, key(KeyCode::Char(c)));
        }
        handle_key(&mut state, key(KeyCode::Backspace));
        assert_eq!(state.login.username, "ana");
        assert_eq!(state.login.password, "p");
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter)), KeyAction::Login);
    }

    #[test]
    fn quit_requires_confirmation_and_quits_on_qq() {
        let mut state = signed_in();

        let action = handle_key(&mut state, key(KeyCode::Char('q')));
        assert_eq!(action, KeyAction::None);
        assert!(state.show_quit_confirm);

        let action = handle_key(&mut state, key(KeyCode::Char('q')));
        assert_eq!(action, KeyAction::Quit);
        assert!(!state.show_quit_confirm);
    }

    #[test]
    fn quit_confirmation_cancels_on_esc() {
        let mut state = signed_in();
        handle_key(&mut state, key(KeyCode::Char('q')));
        assert_eq!(handle_key(&mut state, key(KeyCode::Esc)), KeyAction::None);
        assert!(!state.show_quit_confirm);
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let mut state = AppState::new(RowsPerPage::Five, None);
        let ctrl_c = KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char('c'))
        };
        assert_eq!(handle_key(&mut state, ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn tabs_switch_and_request_a_reload() {
        let mut state = signed_in();
        assert_eq!(handle_key(&mut state, key(KeyCode::Tab)), KeyAction::Refresh);
        assert_eq!(state.current_tab, Tab::Recipes);
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('5'))), KeyAction::Refresh);
        assert_eq!(state.current_tab, Tab::Personnel);
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('9'))), KeyAction::None);
        assert_eq!(handle_key(&mut state, key(KeyCode::BackTab)), KeyAction::Refresh);
        assert_eq!(state.current_tab, Tab::Machines);
    }

    #[test]
    fn search_box_swallows_global_keys() {
        let mut state = signed_in();
        handle_key(&mut state, key(KeyCode::Char('/')));
        assert!(state.screen_captures_input());

        // 'q' is search text here, not quit.
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('q'))), KeyAction::None);
        assert!(!state.show_quit_confirm);
        assert_eq!(handle_key(&mut state, key(KeyCode::Tab)), KeyAction::None);
        assert_eq!(state.current_tab, Tab::Ingredients);

        handle_key(&mut state, key(KeyCode::Enter));
        assert!(!state.screen_captures_input());
    }

    #[test]
    fn screen_errors_land_in_the_status_line() {
        let mut state = signed_in();
        handle_key(&mut state, key(KeyCode::Char('e')));
        assert_eq!(
            state.status_message.as_deref(),
            Some("edit requires exactly one selected row")
        );
        handle_key(&mut state, key(KeyCode::Esc));
        assert!(state.status_message.is_none());
    }

    #[test]
    fn help_toggles_and_scrolls() {
        let mut state = signed_in();
        handle_key(&mut state, key(KeyCode::Char('?')));
        assert!(state.show_help);
        handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(state.help_scroll, 1);
        handle_key(&mut state, key(KeyCode::Char('?')));
        assert!(!state.show_help);
        assert_eq!(state.help_scroll, 0);
    }

    #[test]
    fn sign_out_and_refresh_keys() {
        let mut state = signed_in();
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('o'))), KeyAction::Logout);
        assert_eq!(handle_key(&mut state, key(KeyCode::F(5))), KeyAction::Refresh);
    }
}
