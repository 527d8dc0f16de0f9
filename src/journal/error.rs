/// Errors that can occur while recording or reading attempts.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// An I/O error occurred while reading or writing the journal file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON serialization or deserialization error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The platform does not provide a data directory.
    #[error("could not determine XDG data directory")]
    NoDataDir,
}
