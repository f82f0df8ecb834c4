use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::error::StorageError;
use crate::store::HistoryStore;

fn encode<T: Serialize>(key: &str, value: &T) -> Result<Vec<u8>, StorageError> {
    serde_json::to_vec(value).map_err(|source| StorageError::Serialization {
        key: key.to_string(),
        source,
    })
}

fn decode_all<T: DeserializeOwned>(key: &str, raw: Vec<Vec<u8>>) -> Result<Vec<T>, StorageError> {
    raw.iter()
        .map(|bytes| {
            serde_json::from_slice(bytes).map_err(|source| StorageError::Serialization {
                key: key.to_string(),
                source,
            })
        })
        .collect()
}

/// Serialize a record as JSON and append it to the stream.
pub async fn append_record<T: Serialize>(
    store: &dyn HistoryStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = encode(key, value)?;
    store.append(key, body).await
}

/// Append, then trim the stream so at most `cap` records remain.
pub async fn append_record_capped<T: Serialize>(
    store: &dyn HistoryStore,
    key: &str,
    value: &T,
    cap: usize,
) -> Result<(), StorageError> {
    append_record(store, key, value).await?;
    let dropped = store.trim(key, cap).await?;
    if dropped > 0 {
        debug!(key, dropped, cap, "trimmed history stream");
    }
    Ok(())
}

/// Up to `n` most recent records, oldest first.
pub async fn read_recent_records<T: DeserializeOwned>(
    store: &dyn HistoryStore,
    key: &str,
    n: usize,
) -> Result<Vec<T>, StorageError> {
    let raw = store.read_recent(key, n).await?;
    decode_all(key, raw)
}

pub async fn read_all_records<T: DeserializeOwned>(
    store: &dyn HistoryStore,
    key: &str,
) -> Result<Vec<T>, StorageError> {
    let raw = store.read_all(key).await?;
    decode_all(key, raw)
}

/// The newest record in the stream, if any.
pub async fn last_record<T: DeserializeOwned>(
    store: &dyn HistoryStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    Ok(read_recent_records(store, key, 1).await?.pop())
}
