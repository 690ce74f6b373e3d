use thiserror::Error;

use crate::message::MessageKey;

/// Errors from the session store backend.
///
/// Never retried automatically; every failure is surfaced to the caller
/// with its underlying cause.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("duplicate message key: {0}")]
    DuplicateKey(String),
}

/// Errors from the retrieval collaborator.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("retrieval request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("retrieval service responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

/// Errors from bulk deletion.
///
/// A zero-match delete is not an error; it is reported as `found = false`
/// by the deletion manager. `Partial` means some but not all matched keys
/// were removed -- the surviving key set is carried so the caller can
/// retry only those.
#[derive(Debug, Error)]
pub enum DeleteError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("partial delete: {deleted} removed, {} keys survived", .failed.len())]
    Partial {
        deleted: usize,
        failed: Vec<MessageKey>,
    },
}

/// Errors from the ask orchestration.
///
/// An `Upstream` failure leaves the already-persisted user turn in place;
/// that inconsistency window is intentional and documented, not silent.
#[derive(Debug, Error)]
pub enum AskError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Upstream(#[from] RetrievalError),
}
