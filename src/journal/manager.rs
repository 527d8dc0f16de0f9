use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::JournalError;
use crate::model::{LoginCredentials, RegistrationCredentials};

/// Which form produced an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum AttemptKind {
    SignIn,
    Register,
}

/// One committed form submission, as recorded in the journal.
///
/// Carries identity fields only; the password stays in the in-memory
/// submission and is never written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    pub kind: AttemptKind,
    /// Chosen account name — present for registrations, absent for sign-ins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    pub email: String,
    pub at: DateTime<Utc>,
}

impl Attempt {
    /// Builds a sign-in attempt stamped with the current time.
    pub fn sign_in(credentials: &LoginCredentials) -> Self {
        Self {
            kind: AttemptKind::SignIn,
            login: None,
            email: credentials.email.clone(),
            at: Utc::now(),
        }
    }

    /// Builds a registration attempt stamped with the current time.
    pub fn register(credentials: &RegistrationCredentials) -> Self {
        Self {
            kind: AttemptKind::Register,
            login: Some(credentials.login.clone()),
            email: credentials.email.clone(),
            at: Utc::now(),
        }
    }
}

/// Manages the JSONL attempt journal.
///
/// Records are appended one JSON object per line to `attempts.jsonl`.
pub struct AttemptJournal {
    path: PathBuf,
}

impl AttemptJournal {
    /// Creates a journal using the XDG data directory.
    ///
    /// The directory (`~/.local/share/signon/`) is created if it does not
    /// already exist.
    pub fn new() -> Result<Self, JournalError> {
        let data_dir = dirs::data_dir().ok_or(JournalError::NoDataDir)?;
        let base = data_dir.join("signon");
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join("attempts.jsonl"),
        })
    }

    /// Creates a journal rooted in the given directory.
    #[cfg(test)]
    pub(crate) fn with_path(dir: impl Into<PathBuf>) -> Result<Self, JournalError> {
        let base = dir.into();
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join("attempts.jsonl"),
        })
    }

    /// Appends one attempt to the journal.
    pub fn record(&self, attempt: &Attempt) -> Result<(), JournalError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        serde_json::to_writer(&mut file, attempt)?;
        writeln!(file)?;
        Ok(())
    }

    /// Reads all recorded attempts, oldest first.
    ///
    /// A journal that has never recorded anything reads back empty.
    pub fn attempts(&self) -> Result<Vec<Attempt>, JournalError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = fs::File::open(&self.path)?;
        BufReader::new(file)
            .lines()
            .map(|line| {
                let line = line?;
                serde_json::from_str(&line).map_err(JournalError::Json)
            })
            .collect()
    }
}
