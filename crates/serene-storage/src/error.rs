use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("serialization error in {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage backend error: {0}")]
    Backend(String),
}
