//! Focus tracking and on-screen keyboard visibility.

use crate::model::FieldName;

/// How the presentation layer should arrange the form chrome.
///
/// Derived from keyboard visibility, never stored separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Keyboard hidden: full spacing, submit button and secondary link shown.
    Expanded,
    /// Keyboard visible: collapsed spacing, submit button and link hidden to
    /// keep usable vertical space above the keyboard.
    Compact,
}

/// Tracks the single active field and whether the on-screen keyboard is
/// considered visible.
///
/// Focus and blur drive visibility by default, but the flag is stored
/// explicitly so an external platform signal can also feed it; the most
/// recent writer wins until the next focus or blur event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FocusCoordinator {
    active: Option<FieldName>,
    keyboard_visible: bool,
}

impl FocusCoordinator {
    /// Creates a coordinator with no active field and the keyboard hidden.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gives `name` the focus and marks the keyboard visible.
    ///
    /// Focusing the already-active field is a no-op in effect; focusing a
    /// different field replaces the previous one, so at most one field is
    /// ever active.
    pub fn focus(&mut self, name: FieldName) {
        self.active = Some(name);
        self.keyboard_visible = true;
    }

    /// Drops the focus and marks the keyboard hidden.
    ///
    /// Always succeeds; a blur with nothing focused is a no-op.
    pub fn blur(&mut self) {
        self.active = None;
        self.keyboard_visible = false;
    }

    /// Returns the active field, if any.
    pub fn active_field(&self) -> Option<FieldName> {
        self.active
    }

    /// Returns whether the keyboard is considered visible.
    pub fn keyboard_visible(&self) -> bool {
        self.keyboard_visible
    }

    /// Overrides keyboard visibility from an external signal source.
    ///
    /// Does not touch the active field; the override holds until the next
    /// [`focus`](Self::focus) or [`blur`](Self::blur).
    pub fn set_keyboard_visible(&mut self, visible: bool) {
        self.keyboard_visible = visible;
    }

    /// Derives the layout hint for the presentation layer.
    pub fn layout_mode(&self) -> LayoutMode {
        if self.keyboard_visible {
            LayoutMode::Compact
        } else {
            LayoutMode::Expanded
        }
    }
}
