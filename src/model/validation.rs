use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Validation errors for credential fields.
///
/// Produced by the screen-level validators consulted at submit time; the
/// form controller itself never validates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("login cannot be empty")]
    EmptyLogin,
    #[error("invalid login: {0}")]
    InvalidLogin(String),
    #[error("email cannot be empty")]
    EmptyEmail,
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    #[error("password cannot be empty")]
    EmptyPassword,
    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    ShortPassword,
}

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

static LOGIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]{2,31}$").expect("valid hardcoded regex"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid hardcoded regex"));

/// Trims surrounding whitespace from a login.
pub fn normalize_login(login: &str) -> String {
    login.trim().to_string()
}

/// Trims surrounding whitespace from an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_string()
}

/// Validates a login: 3–32 characters, starting alphanumeric, then
/// alphanumerics, `.`, `_` or `-`.
pub fn validate_login(login: &str) -> Result<(), ValidationError> {
    match login {
        "" => Err(ValidationError::EmptyLogin),
        s if LOGIN_RE.is_match(s) => Ok(()),
        _ => Err(ValidationError::InvalidLogin(login.to_string())),
    }
}

/// Validates an email address: one `@`, a dot in the domain, no whitespace.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    match email {
        "" => Err(ValidationError::EmptyEmail),
        s if EMAIL_RE.is_match(s) => Ok(()),
        _ => Err(ValidationError::InvalidEmail(email.to_string())),
    }
}

/// Validates a password: non-empty and at least [`MIN_PASSWORD_LEN`] characters.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        Err(ValidationError::EmptyPassword)
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        Err(ValidationError::ShortPassword)
    } else {
        Ok(())
    }
}
