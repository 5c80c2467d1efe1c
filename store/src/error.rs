/// Failures at the kitchen store boundary.
///
/// Mutations addressed at an unknown id are not errors; they are no-ops.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("kitchen store used before initialize() or after dispose()")]
    NotInitialized,

    #[error("kitchen store is already initialized")]
    AlreadyInitialized,

    /// A snapshot exists but does not decode. Sample data is never
    /// substituted for it.
    #[error("stored `{key}` snapshot is corrupt: {source}")]
    CorruptSnapshot {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Rejected before anything is changed in memory or written.
    #[error("rejected `{key}` record: {source}")]
    InvalidRecord {
        key: &'static str,
        #[source]
        source: crate::types::FieldError,
    },

    #[error("failed to encode `{key}` snapshot: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("persistence backend failed: {0:#}")]
    Backend(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
