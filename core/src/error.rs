use crate::store::StoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RepositoryError>;

#[derive(Error, Debug)]
pub enum RepositoryError {
    /// A required argument was missing or malformed. Raised before any state changes.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// The identity, item or key does not name a live entity.
    #[error("{0} is not in the repository")]
    OutOfRange(String),

    /// A key that must be unique matched several entities.
    #[error("more than one entry exists with the {field} {value}")]
    Ambiguous { field: &'static str, value: String },

    #[error("repository does not support queries")]
    NotSupported,

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl RepositoryError {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}
