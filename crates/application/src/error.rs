//! Application-level errors

use domain::RawError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Raw error raised by the data-access layer, still unclassified
    #[error(transparent)]
    DataAccess(#[from] RawError),

    /// Collection or document not found
    #[error("Not found: {0}")]
    NotFound(String),
}

impl ApplicationError {
    /// The raw data-access error, if this is one
    pub const fn as_raw(&self) -> Option<&RawError> {
        match self {
            Self::DataAccess(raw) => Some(raw),
            _ => None,
        }
    }
}
