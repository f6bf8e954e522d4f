use crate::types::RepositoryId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Redb(#[from] redb::DatabaseError),

    #[error("Table error: {0}")]
    TableError(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    StorageError(#[from] redb::StorageError),

    #[error("Transaction error: {0}")]
    TransactionError(#[from] redb::TransactionError),

    #[error("Commit error: {0}")]
    CommitError(#[from] redb::CommitError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] postcard::Error),

    #[error("Metadata error: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("Record {0} is empty")]
    EmptyRecord(RepositoryId),

    #[error("Record {id} has unsupported version {version}")]
    UnsupportedVersion { id: RepositoryId, version: u8 },

    /// Raised by stores that refuse an operation, e.g. read-only ones.
    #[error("Store rejected operation: {0}")]
    Rejected(String),
}
