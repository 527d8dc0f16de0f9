//! Field value storage: the mapping of field name → current text.

use crate::model::FieldName;

/// Ordered mapping from field name to current text value.
///
/// The key set is fixed at construction; only values change. Iteration
/// follows construction order so screens render fields the way they
/// configured them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldStore {
    entries: Vec<(FieldName, String)>,
}

impl FieldStore {
    /// Creates a store with the given fields, all values empty.
    pub fn new(fields: &[FieldName]) -> Self {
        Self {
            entries: fields.iter().map(|&name| (name, String::new())).collect(),
        }
    }

    /// Returns `true` if `name` is part of this store's fixed key set.
    pub fn contains(&self, name: FieldName) -> bool {
        self.entries.iter().any(|(field, _)| *field == name)
    }

    /// Replaces the value of `name`.
    ///
    /// No validation is performed; empty strings and arbitrary text are
    /// accepted. Setting a field outside the configured set is a
    /// programming error: it fails fast in debug builds and is ignored in
    /// release builds.
    pub fn set(&mut self, name: FieldName, value: impl Into<String>) {
        debug_assert!(self.contains(name), "field {name} is not part of this form");
        if let Some((_, slot)) = self.entries.iter_mut().find(|(field, _)| *field == name) {
            *slot = value.into();
        }
    }

    /// Returns the current value of `name`, or `""` if it is not configured.
    pub fn value(&self, name: FieldName) -> &str {
        self.entries
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    /// Sets every field back to the empty string. Idempotent.
    pub fn reset(&mut self) {
        for (_, value) in &mut self.entries {
            value.clear();
        }
    }

    /// Returns all entries in construction order.
    pub fn entries(&self) -> &[(FieldName, String)] {
        &self.entries
    }
}
