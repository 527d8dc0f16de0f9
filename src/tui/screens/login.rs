//! Sign-in screen — email and password form.

use std::collections::BTreeMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::form::{FormController, LayoutMode};
use crate::model::{
    FieldName, LoginCredentials, normalize_email, validate_email, validate_password,
};
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;
use crate::tui::widgets::form::{FieldView, draw_form, mask};

/// Field set and labels for the sign-in form, in render order.
const FIELDS: [(FieldName, &str); 2] = [
    (FieldName::Email, "Email address"),
    (FieldName::Password, "Password"),
];

/// State for the sign-in screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginState {
    controller: FormController,
    field_errors: BTreeMap<FieldName, String>,
    general_error: Option<String>,
}

impl Default for LoginState {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginState {
    /// Creates a fresh sign-in form.
    pub fn new() -> Self {
        let names: Vec<FieldName> = FIELDS.iter().map(|(name, _)| *name).collect();
        Self {
            controller: FormController::new(&names),
            field_errors: BTreeMap::new(),
            general_error: None,
        }
    }

    /// Returns a reference to the controller for rendering.
    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    /// Returns the validation error for a field, if any.
    pub fn field_error(&self, name: FieldName) -> Option<&str> {
        self.field_errors.get(&name).map(String::as_str)
    }

    /// Returns the general error message, if any.
    pub fn general_error(&self) -> Option<&str> {
        self.general_error.as_deref()
    }

    /// Sets a general error message not tied to any specific field.
    ///
    /// Used to display journal-level errors inline.
    pub fn set_error(&mut self, msg: String) {
        self.general_error = Some(msg);
    }

    /// Resets the form to its initial state, dropping errors too.
    pub fn reset(&mut self) {
        self.controller.reset();
        self.field_errors.clear();
        self.general_error = None;
    }

    /// Forwards an external keyboard-visibility signal to the controller.
    pub fn sync_keyboard(&mut self, visible: bool) {
        self.controller.sync_keyboard(visible);
    }

    fn focus_next(&mut self) {
        let next = match self.controller.active_field() {
            None => FIELDS[0].0,
            Some(current) => {
                let i = FIELDS
                    .iter()
                    .position(|(name, _)| *name == current)
                    .unwrap_or(0);
                FIELDS[(i + 1) % FIELDS.len()].0
            }
        };
        self.controller.focus(next);
    }

    fn focus_prev(&mut self) {
        let prev = match self.controller.active_field() {
            None => FIELDS[FIELDS.len() - 1].0,
            Some(current) => {
                let i = FIELDS
                    .iter()
                    .position(|(name, _)| *name == current)
                    .unwrap_or(0);
                FIELDS[(i + FIELDS.len() - 1) % FIELDS.len()].0
            }
        };
        self.controller.focus(prev);
    }

    fn append_char(&mut self, ch: char) {
        let Some(field) = self.controller.active_field() else {
            return;
        };
        let mut value = self.controller.value(field).to_string();
        value.push(ch);
        self.controller.set_field(field, value);
    }

    fn delete_char(&mut self) {
        let Some(field) = self.controller.active_field() else {
            return;
        };
        let mut value = self.controller.value(field).to_string();
        value.pop();
        self.controller.set_field(field, value);
    }

    /// Consults the validators, then commits the form.
    fn submit(&mut self) -> Action {
        self.field_errors.clear();
        self.general_error = None;

        let email = normalize_email(self.controller.value(FieldName::Email));
        if let Err(e) = validate_email(&email) {
            self.field_errors.insert(FieldName::Email, e.to_string());
        }
        if let Err(e) = validate_password(self.controller.value(FieldName::Password)) {
            self.field_errors.insert(FieldName::Password, e.to_string());
        }
        if !self.field_errors.is_empty() {
            return Action::None;
        }

        let committed = self.controller.submit();
        Action::SignIn(LoginCredentials {
            email: normalize_email(committed.value(FieldName::Email)),
            password: committed.value(FieldName::Password).to_string(),
        })
    }
}

impl ScreenState for LoginState {
    /// Handles a key event, returning an [`Action`] for the app to apply.
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        // Alt+P toggles password visibility; Alt+R jumps to registration.
        if key.modifiers == KeyModifiers::ALT {
            match key.code {
                KeyCode::Char('p') => {
                    self.controller.toggle_password();
                    return Action::None;
                }
                KeyCode::Char('r') => return Action::Navigate(Screen::Registration),
                _ => {}
            }
        }

        match key.code {
            KeyCode::Tab => {
                self.focus_next();
                Action::None
            }
            KeyCode::BackTab => {
                self.focus_prev();
                Action::None
            }
            KeyCode::Backspace => {
                self.delete_char();
                Action::None
            }
            KeyCode::Esc => {
                if self.controller.active_field().is_some() {
                    self.controller.blur();
                    Action::None
                } else {
                    Action::Quit
                }
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Char(ch) => {
                self.append_char(ch);
                Action::None
            }
            _ => Action::None,
        }
    }
}

/// Builds per-field view data from the controller snapshot.
fn field_views(state: &LoginState) -> Vec<FieldView> {
    let snapshot = state.controller().snapshot();
    FIELDS
        .iter()
        .map(|&(name, label)| {
            let value = snapshot.value(name);
            let is_password = name == FieldName::Password;
            let shown = if is_password && !snapshot.password_visible {
                mask(value)
            } else {
                value.to_string()
            };
            FieldView {
                label: label.to_string(),
                value: shown,
                focused: snapshot.active_field == Some(name),
                error: state.field_error(name).map(str::to_string),
                affordance: is_password.then(|| {
                    if snapshot.password_visible {
                        "Alt+P: Hide".to_string()
                    } else {
                        "Alt+P: Show".to_string()
                    }
                }),
            }
        })
        .collect()
}

/// Renders the sign-in screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_login(state: &LoginState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Sign In ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let form_height = FIELDS.len() as u16 * 3;
    let views = field_views(state);

    match state.controller().layout_mode() {
        LayoutMode::Expanded => {
            let [form_area, error_area, _spacer, button_area, link_area, _rest, footer_area] =
                Layout::vertical([
                    Constraint::Length(form_height),
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Length(3),
                    Constraint::Length(1),
                    Constraint::Min(0),
                    Constraint::Length(1),
                ])
                .areas(inner);

            draw_form(&views, frame, form_area);
            draw_general_error(state, frame, error_area);

            let button = Paragraph::new(Line::from("Sign In"))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Cyan)),
                );
            frame.render_widget(button, button_area);

            let link = Paragraph::new(Line::from("No account? Register (Alt+R)"))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Blue));
            frame.render_widget(link, link_area);

            let footer = Paragraph::new(Line::from("Tab: edit  Enter: sign in  Esc: quit"))
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(footer, footer_area);
        }
        LayoutMode::Compact => {
            let [form_area, error_area, _spacer, footer_area] = Layout::vertical([
                Constraint::Length(form_height),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .areas(inner);

            draw_form(&views, frame, form_area);
            draw_general_error(state, frame, error_area);

            let footer = Paragraph::new(Line::from("Enter: sign in  Esc: done"))
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(footer, footer_area);
        }
    }
}

#[mutants::skip]
fn draw_general_error(state: &LoginState, frame: &mut Frame, area: Rect) {
    if let Some(err) = state.general_error() {
        let error = Paragraph::new(Line::from(err)).style(Style::default().fg(Color::Red));
        frame.render_widget(error, area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState};

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn alt_press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::ALT,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_string(state: &mut LoginState, s: &str) {
        for ch in s.chars() {
            state.handle_key(press(KeyCode::Char(ch)));
        }
    }

    fn fill_valid_form(state: &mut LoginState) {
        state.handle_key(press(KeyCode::Tab));
        type_string(state, "nat@example.com");
        state.handle_key(press(KeyCode::Tab));
        type_string(state, "correcthorse");
    }

    mod typing {
        use super::*;

        #[test]
        fn chars_ignored_while_idle() {
            let mut state = LoginState::new();
            type_string(&mut state, "nat");
            assert_eq!(state.controller().value(FieldName::Email), "");
            assert_eq!(state.controller().value(FieldName::Password), "");
        }

        #[test]
        fn chars_fill_focused_field() {
            let mut state = LoginState::new();
            state.handle_key(press(KeyCode::Tab));
            type_string(&mut state, "nat@example.com");
            assert_eq!(
                state.controller().value(FieldName::Email),
                "nat@example.com"
            );
        }

        #[test]
        fn backspace_deletes_char() {
            let mut state = LoginState::new();
            state.handle_key(press(KeyCode::Tab));
            type_string(&mut state, "ab");
            state.handle_key(press(KeyCode::Backspace));
            assert_eq!(state.controller().value(FieldName::Email), "a");
        }

        #[test]
        fn backspace_ignored_while_idle() {
            let mut state = LoginState::new();
            state.handle_key(press(KeyCode::Backspace));
            assert_eq!(state.controller().value(FieldName::Email), "");
        }
    }

    mod focus {
        use super::*;

        #[test]
        fn tab_focuses_first_field_from_idle() {
            let mut state = LoginState::new();
            state.handle_key(press(KeyCode::Tab));
            assert_eq!(
                state.controller().active_field(),
                Some(FieldName::Email)
            );
            assert!(state.controller().keyboard_visible());
        }

        #[test]
        fn tab_cycles_focus_forward_and_wraps() {
            let mut state = LoginState::new();
            state.handle_key(press(KeyCode::Tab));
            state.handle_key(press(KeyCode::Tab));
            assert_eq!(
                state.controller().active_field(),
                Some(FieldName::Password)
            );
            state.handle_key(press(KeyCode::Tab));
            assert_eq!(
                state.controller().active_field(),
                Some(FieldName::Email)
            );
        }

        #[test]
        fn backtab_focuses_last_field_from_idle() {
            let mut state = LoginState::new();
            state.handle_key(press(KeyCode::BackTab));
            assert_eq!(
                state.controller().active_field(),
                Some(FieldName::Password)
            );
        }

        #[test]
        fn esc_blurs_before_quitting() {
            let mut state = LoginState::new();
            state.handle_key(press(KeyCode::Tab));
            let action = state.handle_key(press(KeyCode::Esc));
            assert_eq!(action, Action::None);
            assert_eq!(state.controller().active_field(), None);
            assert!(!state.controller().keyboard_visible());
        }

        #[test]
        fn esc_while_idle_quits() {
            let mut state = LoginState::new();
            let action = state.handle_key(press(KeyCode::Esc));
            assert_eq!(action, Action::Quit);
        }
    }

    mod password_toggle {
        use super::*;

        #[test]
        fn alt_p_toggles_visibility() {
            let mut state = LoginState::new();
            assert!(!state.controller().password_visible());
            state.handle_key(alt_press(KeyCode::Char('p')));
            assert!(state.controller().password_visible());
            state.handle_key(alt_press(KeyCode::Char('p')));
            assert!(!state.controller().password_visible());
        }

        #[test]
        fn toggle_persists_across_focus_and_blur() {
            let mut state = LoginState::new();
            state.handle_key(alt_press(KeyCode::Char('p')));
            state.handle_key(press(KeyCode::Tab));
            state.handle_key(press(KeyCode::Esc));
            assert!(state.controller().password_visible());
        }
    }

    mod navigation {
        use super::*;

        #[test]
        fn alt_r_navigates_to_registration() {
            let mut state = LoginState::new();
            let action = state.handle_key(alt_press(KeyCode::Char('r')));
            assert_eq!(action, Action::Navigate(Screen::Registration));
        }

        #[test]
        fn unhandled_key_returns_none() {
            let mut state = LoginState::new();
            let action = state.handle_key(press(KeyCode::F(1)));
            assert_eq!(action, Action::None);
        }
    }

    mod valid_submit {
        use super::*;

        #[test]
        fn emits_committed_credentials() {
            let mut state = LoginState::new();
            fill_valid_form(&mut state);
            let action = state.handle_key(press(KeyCode::Enter));
            assert_eq!(
                action,
                Action::SignIn(LoginCredentials {
                    email: "nat@example.com".to_string(),
                    password: "correcthorse".to_string(),
                })
            );
        }

        #[test]
        fn form_is_fresh_after_submit() {
            let mut state = LoginState::new();
            state.handle_key(alt_press(KeyCode::Char('p')));
            fill_valid_form(&mut state);
            state.handle_key(press(KeyCode::Enter));
            assert_eq!(state.controller().value(FieldName::Email), "");
            assert_eq!(state.controller().value(FieldName::Password), "");
            assert_eq!(state.controller().active_field(), None);
            assert!(!state.controller().keyboard_visible());
            assert!(!state.controller().password_visible());
        }

        #[test]
        fn email_is_trimmed() {
            let mut state = LoginState::new();
            state.handle_key(press(KeyCode::Tab));
            type_string(&mut state, " nat@example.com ");
            state.handle_key(press(KeyCode::Tab));
            type_string(&mut state, "correcthorse");
            let action = state.handle_key(press(KeyCode::Enter));
            match action {
                Action::SignIn(credentials) => {
                    assert_eq!(credentials.email, "nat@example.com");
                }
                other => panic!("expected SignIn, got {other:?}"),
            }
        }
    }

    mod invalid_submit {
        use super::*;

        #[test]
        fn empty_submit_shows_all_errors() {
            let mut state = LoginState::new();
            let action = state.handle_key(press(KeyCode::Enter));
            assert_eq!(action, Action::None);
            assert!(state.field_error(FieldName::Email).is_some());
            assert!(state.field_error(FieldName::Password).is_some());
        }

        #[test]
        fn invalid_email_keeps_typed_values() {
            let mut state = LoginState::new();
            state.handle_key(press(KeyCode::Tab));
            type_string(&mut state, "not-an-email");
            state.handle_key(press(KeyCode::Tab));
            type_string(&mut state, "correcthorse");
            let action = state.handle_key(press(KeyCode::Enter));
            assert_eq!(action, Action::None);
            assert!(state.field_error(FieldName::Email).is_some());
            assert!(state.field_error(FieldName::Password).is_none());
            assert_eq!(state.controller().value(FieldName::Email), "not-an-email");
        }

        #[test]
        fn short_password_rejected() {
            let mut state = LoginState::new();
            state.handle_key(press(KeyCode::Tab));
            type_string(&mut state, "nat@example.com");
            state.handle_key(press(KeyCode::Tab));
            type_string(&mut state, "short");
            let action = state.handle_key(press(KeyCode::Enter));
            assert_eq!(action, Action::None);
            assert!(state.field_error(FieldName::Password).is_some());
        }

        #[test]
        fn errors_cleared_on_resubmit() {
            let mut state = LoginState::new();
            state.handle_key(press(KeyCode::Enter));
            assert!(state.field_error(FieldName::Email).is_some());
            fill_valid_form(&mut state);
            let action = state.handle_key(press(KeyCode::Enter));
            assert!(matches!(action, Action::SignIn(_)));
            assert!(state.field_error(FieldName::Email).is_none());
        }
    }

    mod reset {
        use super::*;

        #[test]
        fn clears_fields_toggle_and_errors() {
            let mut state = LoginState::new();
            state.handle_key(press(KeyCode::Tab));
            type_string(&mut state, "x");
            state.handle_key(alt_press(KeyCode::Char('p')));
            state.handle_key(press(KeyCode::Enter)); // invalid, sets errors
            state.reset();
            assert_eq!(state.controller().value(FieldName::Email), "");
            assert!(!state.controller().password_visible());
            assert_eq!(state.controller().active_field(), None);
            assert!(state.field_error(FieldName::Email).is_none());
            assert_eq!(state.general_error(), None);
        }

        #[test]
        fn set_error_stores_message() {
            let mut state = LoginState::new();
            state.set_error("journal unavailable".to_string());
            assert_eq!(state.general_error(), Some("journal unavailable"));
        }
    }

    mod keyboard_signal {
        use super::*;

        #[test]
        fn hide_signal_collapses_keyboard_only() {
            let mut state = LoginState::new();
            state.handle_key(press(KeyCode::Tab));
            state.sync_keyboard(false);
            assert!(!state.controller().keyboard_visible());
            assert_eq!(
                state.controller().active_field(),
                Some(FieldName::Email)
            );
        }

        #[test]
        fn show_signal_needs_active_field() {
            let mut state = LoginState::new();
            state.sync_keyboard(true);
            assert!(!state.controller().keyboard_visible());
        }
    }

    mod rendering {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        use super::*;

        fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
            let mut s = String::new();
            for y in 0..buf.area.height {
                for x in 0..buf.area.width {
                    s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
                }
                s.push('\n');
            }
            s
        }

        fn render_login(state: &LoginState, width: u16, height: u16) -> String {
            let backend = TestBackend::new(width, height);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal
                .draw(|frame| {
                    draw_login(state, frame, frame.area());
                })
                .unwrap();
            buffer_to_string(terminal.backend().buffer())
        }

        #[test]
        fn expanded_shows_button_and_link() {
            let state = LoginState::new();
            let output = render_login(&state, 60, 20);
            assert!(output.contains("Sign In"), "should show title and button");
            assert!(output.contains("Email address"), "should show email field");
            assert!(
                output.contains("No account? Register"),
                "should show secondary link"
            );
        }

        #[test]
        fn compact_hides_button_and_link() {
            let mut state = LoginState::new();
            state.handle_key(press(KeyCode::Tab));
            let output = render_login(&state, 60, 20);
            assert!(
                !output.contains("No account? Register"),
                "editing should hide the secondary link"
            );
            assert!(output.contains("Esc: done"), "should show editing footer");
        }

        #[test]
        fn password_renders_masked_by_default() {
            let mut state = LoginState::new();
            state.handle_key(press(KeyCode::Tab));
            state.handle_key(press(KeyCode::Tab));
            type_string(&mut state, "secret99");
            let output = render_login(&state, 60, 20);
            assert!(!output.contains("secret99"), "password must be masked");
            assert!(output.contains('\u{2022}'), "should show mask glyphs");
            assert!(output.contains("Alt+P: Show"), "should show reveal hint");
        }

        #[test]
        fn toggled_password_renders_plain() {
            let mut state = LoginState::new();
            state.handle_key(alt_press(KeyCode::Char('p')));
            state.handle_key(press(KeyCode::Tab));
            state.handle_key(press(KeyCode::Tab));
            type_string(&mut state, "secret99");
            let output = render_login(&state, 60, 20);
            assert!(output.contains("secret99"), "revealed password is plain");
            assert!(output.contains("Alt+P: Hide"), "should show conceal hint");
        }

        #[test]
        fn renders_general_error() {
            let mut state = LoginState::new();
            state.set_error("journal unavailable".to_string());
            let output = render_login(&state, 60, 20);
            assert!(output.contains("journal unavailable"));
        }
    }
}
