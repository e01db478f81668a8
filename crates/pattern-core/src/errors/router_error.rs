use crate::models::Source;

/// Routing errors surfaced to callers of the router's write path.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("private-only write requested but no private store is configured")]
    PrivateStoreNotConfigured,

    #[error("destination NONE: pattern is not stored anywhere")]
    NothingToStore,

    #[error("partial write: {succeeded:?} store accepted pattern {id}, {failed:?} store failed: {reason}")]
    PartialWrite {
        succeeded: Source,
        failed: Source,
        id: String,
        reason: String,
    },
}
