//! Attempt journal: the submission collaborator behind the auth screens.
//!
//! Each committed form submission is appended as one JSON line to an
//! `attempts.jsonl` file, making a record a single-line file append with
//! no read/rewrite. Identity fields only — password values never reach
//! this layer's on-disk format.

mod error;
mod manager;

pub use error::JournalError;
pub use manager::{Attempt, AttemptJournal, AttemptKind};
