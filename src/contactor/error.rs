use crate::validation::FormErrors;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ContactorError {
    #[error("Contact not found: {0}")]
    ContactNotFound(String),

    #[error("Duplicate contact id: {0}")]
    DuplicateId(Uuid),

    #[error("{failed} of {total} records failed: {source}")]
    BatchFailed {
        failed: usize,
        total: usize,
        source: Box<ContactorError>,
    },

    #[error("Invalid contact: {0}")]
    Validation(FormErrors),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, ContactorError>;
