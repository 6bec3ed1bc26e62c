//! Error type shared by storage, tracker, metadata and backup code.
//!
//! The scheduling and aggregation functions never return these for domain
//! conditions; they only come from collaborators or caller misuse.

use crate::models::ProblemId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Problem not found: {0}")]
    ProblemNotFound(ProblemId),

    #[error("Problem {0} is already mastered")]
    AlreadyMastered(ProblemId),

    #[error("Metadata extraction failed: {0}")]
    Metadata(String),
}

pub type Result<T> = std::result::Result<T, SageError>;
