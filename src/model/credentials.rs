/// Committed sign-in values, built by the login screen from a submitted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Committed sign-up values, built by the registration screen from a
/// submitted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationCredentials {
    pub login: String,
    pub email: String,
    pub password: String,
}
