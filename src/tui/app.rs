//! Main TUI application.

use std::io;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{info, warn};

use crate::backend::Client;
use crate::session::{SessionEvent, SubscriptionId};
use crate::table::RowsPerPage;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::AppState;

/// Main TUI application.
pub struct App {
    client: Client,
    state: AppState,
    session_events: Receiver<SessionEvent>,
    subscription: SubscriptionId,
    should_quit: bool,
}

impl App {
    pub fn new(client: Client, rows_per_page: RowsPerPage, username: Option<String>) -> Self {
        let (tx, rx) = mpsc::channel();
        let subscription = client.session().subscribe(move |event| {
            let _ = tx.send(event.clone());
        });
        Self {
            client,
            state: AppState::new(rows_per_page, username),
            session_events: rx,
            subscription,
            should_quit: false,
        }
    }

    /// Runs the TUI application.
    pub fn run(mut self, tick_rate: Duration) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(tick_rate);

        // A session may already exist (set before the app started).
        if let Some(data) = self.client.session().get() {
            self.on_session_event(SessionEvent::SignedIn(data));
        }

        let result = loop {
            if let Err(err) = terminal.draw(|frame| render(frame, &mut self.state)) {
                break Err(err);
            }

            match events.next() {
                Ok(Event::Tick) | Ok(Event::Resize) => {}
                Ok(Event::Key(key)) => match handle_key(&mut self.state, key) {
                    KeyAction::None => {}
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::Login => self.login(),
                    KeyAction::Logout => self.client.logout(),
                    KeyAction::Refresh => self.refresh(),
                    KeyAction::Execute => {
                        // Show the in-flight state before blocking on the service.
                        if let Err(err) = terminal.draw(|frame| render(frame, &mut self.state)) {
                            break Err(err);
                        }
                        self.execute();
                    }
                },
                Err(_) => self.should_quit = true,
            }

            self.drain_session_events();

            if self.should_quit {
                break Ok(());
            }
        };

        self.client.session().unsubscribe(self.subscription);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn drain_session_events(&mut self) {
        while let Ok(event) = self.session_events.try_recv() {
            self.on_session_event(event);
        }
    }

    fn on_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::SignedIn(data) => {
                let user = data.username.clone();
                if let Err(err) = self.state.sign_in(data) {
                    warn!(error = %err, "cannot build tables");
                    self.state.status_message = Some(err.to_string());
                    return;
                }
                self.state.status_message = Some(format!("Welcome, {}", user));
                self.refresh();
            }
            SessionEvent::SignedOut => {
                if self.state.user.is_some() {
                    self.state.sign_out();
                    self.state.status_message = Some("Signed out".to_string());
                }
            }
        }
    }

    fn login(&mut self) {
        let username = self.state.login.username.trim().to_string();
        let password = self.state.login.password.clone();
        if let Err(err) = self.client.login(&username, &password) {
            info!(user = %username, error = %err, "sign in failed");
            self.state.login.error = Some(err.to_string());
            self.state.login.password.clear();
        }
        // Success arrives as a session event.
    }

    fn refresh(&mut self) {
        let Some(screen) = self.state.current_screen() else {
            return;
        };
        let title = screen.title();
        let message = match screen.reload(&mut self.client) {
            Ok(count) => format!("{}: {} records", title, count),
            Err(err) => format!("{}: load failed: {}", title, err),
        };
        self.state.status_message = Some(message);
    }

    fn execute(&mut self) {
        let Some(screen) = self.state.current_screen() else {
            return;
        };
        if let Some(message) = screen.execute(&mut self.client) {
            self.state.status_message = Some(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{FileBackend, demo_document};
    use crate::session::Session;
    use crate::tui::state::Tab;

    fn app() -> App {
        let backend = FileBackend::in_memory(demo_document("pw"));
        App::new(
            Client::new(Box::new(backend), Session::new()),
            RowsPerPage::Five,
            Some("admin".into()),
        )
    }

    #[test]
    fn login_builds_tabs_and_loads_rows() {
        let mut app = app();
        app.state.login.password = "pw".into();
        app.login();
        assert!(app.state.user.is_none(), "applied only once the event is drained");

        app.drain_session_events();
        assert_eq!(app.state.user.as_ref().map(|u| u.username.as_str()), Some("admin"));
        assert_eq!(app.state.status_message.as_deref(), Some("Insumos: 7 records"));

        app.state.switch_tab(Tab::Providers);
        app.refresh();
        assert_eq!(app.state.status_message.as_deref(), Some("Proveedores: 4 records"));
    }

    #[test]
    fn bad_password_stays_on_login() {
        let mut app = app();
        app.state.login.password = "nope".into();
        app.login();
        app.drain_session_events();
        assert!(app.state.user.is_none());
        assert!(app.state.login.error.is_some());
        assert!(app.state.login.password.is_empty());
    }

    #[test]
    fn logout_returns_to_login() {
        let mut app = app();
        app.state.login.password = "pw".into();
        app.login();
        app.drain_session_events();

        app.client.logout();
        app.drain_session_events();
        assert!(app.state.user.is_none());
        assert!(app.state.screens.is_empty());
        assert_eq!(app.state.status_message.as_deref(), Some("Signed out"));
    }
}
