//! Form interaction controller shared by the sign-in and sign-up screens.
//!
//! Three cooperating pieces: [`FieldStore`] owns field values,
//! [`FocusCoordinator`] tracks the single active field and keyboard
//! visibility, and [`FormController`] composes them with the password
//! visibility toggle and the submit/reset lifecycle. Screens drive the
//! controller with discrete input events and re-render from its snapshot.

pub mod controller;
pub mod focus;
pub mod store;

pub use controller::{FormController, FormSnapshot, Submission};
pub use focus::{FocusCoordinator, LayoutMode};
pub use store::FieldStore;
