// Repository trait for durable history storage
use crate::domain::history::HistoryEntry;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryStoreError {
    #[error("history storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("history serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Read the persisted list. An absent record is an empty history, not an
    /// error.
    async fn load(&self) -> Result<Vec<HistoryEntry>, HistoryStoreError>;

    /// Overwrite the persisted list with the given entries.
    async fn persist(&self, entries: &[HistoryEntry]) -> Result<(), HistoryStoreError>;

    /// Remove the persisted record entirely.
    async fn clear(&self) -> Result<(), HistoryStoreError>;
}
