use thiserror::Error;

/// Failures surfaced by the record store. Everything here renders as a
/// server error at the HTTP layer; there is no domain-level error taxonomy.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying database could not be reached or rejected the call.
    #[error("record store unavailable")]
    Unavailable(#[from] libsql::Error),

    /// A stored row could not be decoded into a favorite record.
    #[error("malformed favorite record: {0}")]
    Malformed(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
