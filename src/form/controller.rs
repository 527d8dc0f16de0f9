//! The form controller: one state machine per screen instance.

use crate::model::FieldName;

use super::focus::{FocusCoordinator, LayoutMode};
use super::store::FieldStore;

/// Immutable read of a controller's state at a point in time.
///
/// The presentation layer re-renders from this after every event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    /// Field values in configuration order.
    pub fields: Vec<(FieldName, String)>,
    /// The field currently receiving input, if any.
    pub active_field: Option<FieldName>,
    /// Whether the on-screen keyboard is considered visible.
    pub keyboard_visible: bool,
    /// Whether the password field renders as plain text.
    pub password_visible: bool,
}

impl FormSnapshot {
    /// Returns the value of `name`, or `""` if it is not configured.
    pub fn value(&self, name: FieldName) -> &str {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }
}

/// Field values captured at the moment of submit, unaffected by the reset
/// that follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    values: Vec<(FieldName, String)>,
}

impl Submission {
    /// Returns the committed value of `name`, or `""` if it is not configured.
    pub fn value(&self, name: FieldName) -> &str {
        self.values
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    /// Returns all committed values in configuration order.
    pub fn values(&self) -> &[(FieldName, String)] {
        &self.values
    }
}

/// Interaction state machine for one auth form.
///
/// Owns the field values, the focus/keyboard state and the password
/// visibility flag; mutated only through the event methods below. The
/// screen instantiating it supplies its fixed, ordered field set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormController {
    store: FieldStore,
    focus: FocusCoordinator,
    password_visible: bool,
}

impl FormController {
    /// Creates a controller for the given fields: all values empty, no
    /// active field, keyboard hidden, password masked.
    pub fn new(fields: &[FieldName]) -> Self {
        Self {
            store: FieldStore::new(fields),
            focus: FocusCoordinator::new(),
            password_visible: false,
        }
    }

    /// Replaces the value of `name`, leaving focus and visibility untouched.
    pub fn set_field(&mut self, name: FieldName, value: impl Into<String>) {
        self.store.set(name, value);
    }

    /// Returns the current value of `name`.
    pub fn value(&self, name: FieldName) -> &str {
        self.store.value(name)
    }

    /// Gives `name` the focus, replacing any previously active field.
    ///
    /// Focusing a field outside the configured set is a programming error;
    /// it fails fast in debug builds and is ignored in release builds.
    pub fn focus(&mut self, name: FieldName) {
        debug_assert!(
            self.store.contains(name),
            "field {name} is not part of this form"
        );
        if self.store.contains(name) {
            self.focus.focus(name);
        }
    }

    /// Drops the focus and hides the keyboard. No-op safe.
    pub fn blur(&mut self) {
        self.focus.blur();
    }

    /// Returns the active field, if any.
    pub fn active_field(&self) -> Option<FieldName> {
        self.focus.active_field()
    }

    /// Returns whether the on-screen keyboard is considered visible.
    pub fn keyboard_visible(&self) -> bool {
        self.focus.keyboard_visible()
    }

    /// Reconciles an external keyboard-visibility signal with focus state.
    ///
    /// A hide always applies; a show only applies while some field is
    /// active, so a stray platform event cannot report the keyboard up with
    /// nothing focused. The result holds until the next focus or blur.
    pub fn sync_keyboard(&mut self, visible: bool) {
        self.focus
            .set_keyboard_visible(visible && self.focus.active_field().is_some());
    }

    /// Derives the layout hint for the presentation layer.
    pub fn layout_mode(&self) -> LayoutMode {
        self.focus.layout_mode()
    }

    /// Returns whether the password field renders as plain text.
    pub fn password_visible(&self) -> bool {
        self.password_visible
    }

    /// Flips password visibility. Independent of focus; persists across
    /// focus and blur, cleared only by reset.
    pub fn toggle_password(&mut self) {
        self.password_visible = !self.password_visible;
    }

    /// Returns an immutable snapshot of the current state.
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            fields: self.store.entries().to_vec(),
            active_field: self.focus.active_field(),
            keyboard_visible: self.focus.keyboard_visible(),
            password_visible: self.password_visible,
        }
    }

    /// Commits the form: captures the current values, then replaces the
    /// state with a fresh initial one (empty fields, no focus, keyboard
    /// hidden, password masked).
    ///
    /// The returned [`Submission`] reflects the values at the moment of the
    /// call, unaffected by the reset.
    pub fn submit(&mut self) -> Submission {
        let committed = Submission {
            values: self.store.entries().to_vec(),
        };
        self.reset();
        committed
    }

    /// Restores the fresh initial state: fields empty, focus dropped,
    /// keyboard hidden, password masked again.
    pub fn reset(&mut self) {
        self.store.reset();
        self.focus.blur();
        self.password_visible = false;
    }
}
