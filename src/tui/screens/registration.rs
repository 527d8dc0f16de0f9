//! Sign-up screen — login, email and password form.

use std::collections::BTreeMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::form::{FormController, LayoutMode};
use crate::model::{
    FieldName, RegistrationCredentials, normalize_email, normalize_login, validate_email,
    validate_login, validate_password,
};
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;
use crate::tui::widgets::form::{FieldView, draw_form, mask};

/// Field set and labels for the sign-up form, in render order.
const FIELDS: [(FieldName, &str); 3] = [
    (FieldName::Login, "Login"),
    (FieldName::Email, "Email address"),
    (FieldName::Password, "Password"),
];

/// State for the sign-up screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationState {
    controller: FormController,
    field_errors: BTreeMap<FieldName, String>,
    general_error: Option<String>,
}

impl Default for RegistrationState {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationState {
    /// Creates a fresh sign-up form.
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

        let login = normalize_login(self.controller.value(FieldName::Login));
        if let Err(e) = validate_login(&login) {
            self.field_errors.insert(FieldName::Login, e.to_string());
        }
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
        Action::Register(RegistrationCredentials {
            login: normalize_login(committed.value(FieldName::Login)),
            email: normalize_email(committed.value(FieldName::Email)),
            password: committed.value(FieldName::Password).to_string(),
        })
    }
}

impl ScreenState for RegistrationState {
    /// Handles a key event, returning an [`Action`] for the app to apply.
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        // Alt+P toggles password visibility; Alt+S jumps back to sign-in.
        if key.modifiers == KeyModifiers::ALT {
            match key.code {
                KeyCode::Char('p') => {
                    self.controller.toggle_password();
                    return Action::None;
                }
                KeyCode::Char('s') => return Action::Navigate(Screen::Login),
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
                    Action::Navigate(Screen::Login)
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
fn field_views(state: &RegistrationState) -> Vec<FieldView> {
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

/// Renders the sign-up screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_registration(state: &RegistrationState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Sign Up ")
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

            let button = Paragraph::new(Line::from("Sign Up"))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Cyan)),
                );
            frame.render_widget(button, button_area);

            let link = Paragraph::new(Line::from("Already registered? Sign in (Alt+S)"))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Blue));
            frame.render_widget(link, link_area);

            let footer = Paragraph::new(Line::from("Tab: edit  Enter: sign up  Esc: back"))
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

            let footer = Paragraph::new(Line::from("Enter: sign up  Esc: done"))
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(footer, footer_area);
        }
    }
}

#[mutants::skip]
fn draw_general_error(state: &RegistrationState, frame: &mut Frame, area: Rect) {
    if let Some(err) = state.general_error() {
        let error = Paragraph::new(Line::from(err)).style(Style::default().fg(Color::Red));
        frame.render_widget(error, area);
    }
}
