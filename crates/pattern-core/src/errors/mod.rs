//! Error taxonomy. One enum per subsystem, wrapped by [`PatternError`].

mod config_error;
mod embedding_error;
mod policy_error;
mod router_error;
mod store_error;

pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use policy_error::PolicyError;
pub use router_error::RouterError;
pub use store_error::StoreError;

/// Top-level error for every fallible operation in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error(transparent)]
    Router(#[from] RouterError),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type PatternResult<T> = Result<T, PatternError>;
