//! Error types for the form core.
//!
//! Upload and publish errors live in their own crates (`tf-store`,
//! `tf-publish`); the CLI converges everything into `anyhow`.

use thiserror::Error;

/// Message shown to the author when required fields are missing.
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill all required fields";

/// A document failed the required-field gate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required keys are absent or empty.
    #[error("Please fill all required fields (missing: {})", missing.join(", "))]
    MissingRequiredFields { missing: Vec<&'static str> },
}

impl ValidationError {
    /// Names of the required fields that were missing, in declaration order.
    #[must_use]
    pub fn missing(&self) -> &[&'static str] {
        match self {
            Self::MissingRequiredFields { missing } => missing,
        }
    }
}

/// Errors raised while working with drafts and documents.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The entry type name is not one of `Event`, `Trip`, `Report`.
    #[error("Unknown entry type: {0}")]
    UnknownEntryType(String),

    /// A sub-image block with the given sequence number does not exist.
    #[error("Sub image {0} not found")]
    SubImageNotFound(u32),

    /// No sequence number is left for another sub-image block.
    #[error("Sub image sequence exhausted")]
    SubImageSequenceExhausted,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
