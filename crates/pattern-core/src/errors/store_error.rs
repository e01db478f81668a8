/// Pattern store collaborator errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("query against {store} failed: {reason}")]
    QueryFailed { store: String, reason: String },

    #[error("write to {store} failed: {reason}")]
    WriteFailed { store: String, reason: String },

    #[error("{store} timed out after {elapsed_ms}ms")]
    Timeout { store: String, elapsed_ms: u64 },

    #[error("{store} unavailable")]
    Unavailable { store: String },
}
