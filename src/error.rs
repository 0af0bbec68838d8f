use thiserror::Error;

/// Service-level error taxonomy.
///
/// Validation and permission errors abort the operation without touching the
/// store; not-found errors let callers degrade to an empty view. Storage
/// errors carry the underlying cause from the record store.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    PermissionDenied(&'static str),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
