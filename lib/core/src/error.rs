use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Compound not found: {0}")]
    CompoundNotFound(String),

    #[error("Unknown taxonomy key: {0}")]
    UnknownTaxonomyKey(String),

    #[error("Duplicate id in catalog: {0}")]
    DuplicateId(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Invalid stack: {0}")]
    InvalidStack(String),

    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),

    #[error("Stack not found: {0}")]
    StackNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
