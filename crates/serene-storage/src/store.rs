use async_trait::async_trait;

use crate::error::StorageError;

/// Ordered, append-only record streams keyed by string.
///
/// Keys are opaque path-like strings. Streams that were never written read
/// back as empty; there is no "not found" for history.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append one record to the end of the stream.
    async fn append(&self, key: &str, record: Vec<u8>) -> Result<(), StorageError>;

    /// Up to `n` most recent records, oldest first.
    async fn read_recent(&self, key: &str, n: usize) -> Result<Vec<Vec<u8>>, StorageError>;

    /// Every record in the stream, oldest first.
    async fn read_all(&self, key: &str) -> Result<Vec<Vec<u8>>, StorageError>;

    async fn len(&self, key: &str) -> Result<usize, StorageError>;

    /// Drop records from the front until at most `keep` remain.
    /// Returns how many were dropped.
    async fn trim(&self, key: &str, keep: usize) -> Result<usize, StorageError>;
}
