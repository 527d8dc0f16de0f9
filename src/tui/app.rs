use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};

use crate::journal::{Attempt, AttemptJournal};
use crate::model::{LoginCredentials, RegistrationCredentials};

use super::action::{Action, ScreenState};
use super::error::AppError;
use super::screens::{LoginState, RegistrationState, draw_login, draw_registration};
use super::widgets::{StatusBarContext, draw_status_bar};

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Sign in with email and password.
    Login,
    /// Create an account with login, email and password.
    Registration,
}

/// Top-level application state.
pub struct App {
    screen: Screen,
    login: LoginState,
    registration: RegistrationState,
    journal: AttemptJournal,
    status: StatusBarContext,
    should_quit: bool,
}

impl App {
    /// Creates a new `App` starting on the [`Screen::Login`] screen.
    ///
    /// Reads the journal once so the status bar can show the total recorded
    /// attempt count from the start.
    pub fn new(journal: AttemptJournal) -> Result<Self, AppError> {
        let recorded = journal.attempts()?.len();
        Ok(Self {
            screen: Screen::Login,
            login: LoginState::new(),
            registration: RegistrationState::new(),
            journal,
            status: StatusBarContext {
                identity: String::new(),
                registered: false,
                recorded,
            },
            should_quit: false,
        })
    }

    /// Main event loop: draw → read event → dispatch → check quit.
    ///
    /// Terminal focus changes feed the controllers as the external
    /// keyboard-visibility signal.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::FocusLost => self.handle_focus_change(false),
                Event::FocusGained => self.handle_focus_change(true),
                _ => {}
            }
        }
        Ok(())
    }

    /// Renders the current screen above the status bar.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let [body, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        match self.screen {
            Screen::Login => draw_login(&self.login, frame, body),
            Screen::Registration => draw_registration(&self.registration, frame, body),
        }
        draw_status_bar(&self.status, frame, status_area);
    }

    /// Handles a key event: global keys first, then the active screen.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        let action = match self.screen {
            Screen::Login => self.login.handle_key(key),
            Screen::Registration => self.registration.handle_key(key),
        };
        self.apply(action);
    }

    /// Forwards a terminal focus change as the external keyboard signal.
    pub fn handle_focus_change(&mut self, focused: bool) {
        match self.screen {
            Screen::Login => self.login.sync_keyboard(focused),
            Screen::Registration => self.registration.sync_keyboard(focused),
        }
    }

    /// Applies an [`Action`] returned by a screen handler.
    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(target) => self.navigate(target),
            Action::SignIn(credentials) => self.record_sign_in(&credentials),
            Action::Register(credentials) => self.record_registration(&credentials),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Switches to `target`, giving it a fresh form (screens keep no state
    /// across mounts).
    fn navigate(&mut self, target: Screen) {
        match target {
            Screen::Login => self.login.reset(),
            Screen::Registration => self.registration.reset(),
        }
        self.screen = target;
    }

    fn record_sign_in(&mut self, credentials: &LoginCredentials) {
        let attempt = Attempt::sign_in(credentials);
        match self.journal.record(&attempt) {
            Ok(()) => self.note_recorded(attempt),
            Err(e) => self.login.set_error(e.to_string()),
        }
    }

    fn record_registration(&mut self, credentials: &RegistrationCredentials) {
        let attempt = Attempt::register(credentials);
        match self.journal.record(&attempt) {
            Ok(()) => self.note_recorded(attempt),
            Err(e) => self.registration.set_error(e.to_string()),
        }
    }

    fn note_recorded(&mut self, attempt: Attempt) {
        self.status = StatusBarContext {
            identity: attempt.email,
            registered: attempt.login.is_some(),
            recorded: self.status.recorded + 1,
        };
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the status bar context.
    pub fn status(&self) -> &StatusBarContext {
        &self.status
    }

    /// Returns a reference to the sign-in screen state.
    pub fn login(&self) -> &LoginState {
        &self.login
    }

    /// Returns a reference to the sign-up screen state.
    pub fn registration(&self) -> &RegistrationState {
        &self.registration
    }
}
