use std::fmt;

/// Identifier for a single text input slot in an auth form.
///
/// Each screen configures its controller with an ordered subset of these:
/// the sign-in screen uses `Email` and `Password`, the sign-up screen adds
/// `Login` in front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    /// Account name chosen at registration.
    Login,
    /// Email address.
    Email,
    /// Password; rendered masked unless the user toggles visibility.
    Password,
}

impl FieldName {
    /// Returns the lowercase key used for display and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Login => "login",
            FieldName::Email => "email",
            FieldName::Password => "password",
        }
    }
}

#[mutants::skip]
impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_is_lowercase_key() {
        assert_eq!(FieldName::Login.as_str(), "login");
        assert_eq!(FieldName::Email.as_str(), "email");
        assert_eq!(FieldName::Password.as_str(), "password");
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(FieldName::Password.to_string(), "password");
    }
}
