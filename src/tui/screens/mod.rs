//! TUI screen implementations.

pub mod login;
pub mod registration;

pub use login::{LoginState, draw_login};
pub use registration::{RegistrationState, draw_registration};
