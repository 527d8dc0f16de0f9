mod credentials;
mod field;
mod validation;

pub use credentials::{LoginCredentials, RegistrationCredentials};
pub use field::FieldName;
pub use validation::{
    ValidationError, normalize_email, normalize_login, validate_email, validate_login,
    validate_password,
};
