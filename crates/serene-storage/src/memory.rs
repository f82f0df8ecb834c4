use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::store::HistoryStore;

/// In-process history store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    streams: RwLock<HashMap<String, VecDeque<Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryStore {
    async fn append(&self, key: &str, record: Vec<u8>) -> Result<(), StorageError> {
        let mut streams = self.streams.write().await;
        streams.entry(key.to_string()).or_default().push_back(record);
        Ok(())
    }

    async fn read_recent(&self, key: &str, n: usize) -> Result<Vec<Vec<u8>>, StorageError> {
        let streams = self.streams.read().await;
        let Some(stream) = streams.get(key) else {
            return Ok(Vec::new());
        };
        let skip = stream.len().saturating_sub(n);
        Ok(stream.iter().skip(skip).cloned().collect())
    }

    async fn read_all(&self, key: &str) -> Result<Vec<Vec<u8>>, StorageError> {
        let streams = self.streams.read().await;
        Ok(streams
            .get(key)
            .map(|s| s.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn len(&self, key: &str) -> Result<usize, StorageError> {
        let streams = self.streams.read().await;
        Ok(streams.get(key).map_or(0, VecDeque::len))
    }

    async fn trim(&self, key: &str, keep: usize) -> Result<usize, StorageError> {
        let mut streams = self.streams.write().await;
        let Some(stream) = streams.get_mut(key) else {
            return Ok(0);
        };
        let excess = stream.len().saturating_sub(keep);
        stream.drain(..excess);
        Ok(excess)
    }
}
