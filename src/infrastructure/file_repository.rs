// File-backed history repository
use crate::application::history_repository::{HistoryRepository, HistoryStoreError};
use crate::domain::history::HistoryEntry;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Persists the history list as a single JSON document. An absent file is
/// the valid empty-history state; an unreadable document is discarded with a
/// warning rather than surfaced as an error.
#[derive(Debug, Clone)]
pub struct FileHistoryRepository {
    path: PathBuf,
}

impl FileHistoryRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl HistoryRepository for FileHistoryRepository {
    async fn load(&self) -> Result<Vec<HistoryEntry>, HistoryStoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!(
                    "discarding unparsable history file {}: {e}",
                    self.path.display()
                );
                Ok(Vec::new())
            }
        }
    }

    async fn persist(&self, entries: &[HistoryEntry]) -> Result<(), HistoryStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string(entries)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), HistoryStoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::driver::{compute_driver_plan, DriverConfig, Voltage};
    use crate::domain::history::{CalculationSnapshot, CustomerInfo};
    use crate::domain::units::{convert, LengthUnit};
    use chrono::Utc;

    fn entry(id: i64) -> HistoryEntry {
        HistoryEntry::new(
            id,
            Utc::now(),
            CalculationSnapshot {
                customer: CustomerInfo {
                    customer_name: "Alice".to_string(),
                    area: "Hall".to_string(),
                },
                converter_values: convert(LengthUnit::Meters, "2").unwrap(),
                driver_values: DriverConfig::default(),
                results: compute_driver_plan(2.0, 14.4, 20.0, 100.0, Voltage::V24).unwrap(),
            },
        )
    }

    #[tokio::test]
    async fn test_absent_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repository = FileHistoryRepository::new(dir.path().join("history.json"));
        assert_eq!(repository.load().await.unwrap(), Vec::new());
    }

    #[tokio::test]
    async fn test_persist_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let repository = FileHistoryRepository::new(dir.path().join("history.json"));

        let entries = vec![entry(2), entry(1)];
        repository.persist(&entries).await.unwrap();
        assert_eq!(repository.load().await.unwrap(), entries);
    }

    #[tokio::test]
    async fn test_corrupt_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let repository = FileHistoryRepository::new(path);
        assert_eq!(repository.load().await.unwrap(), Vec::new());
    }

    #[tokio::test]
    async fn test_clear_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let repository = FileHistoryRepository::new(path.clone());

        repository.persist(&[entry(1)]).await.unwrap();
        assert!(path.exists());

        repository.clear().await.unwrap();
        assert!(!path.exists());
        assert_eq!(repository.load().await.unwrap(), Vec::new());

        // clearing an already-absent record stays silent
        repository.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_persist_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/state/history.json");
        let repository = FileHistoryRepository::new(path.clone());

        repository.persist(&[entry(1)]).await.unwrap();
        assert!(path.exists());
    }
}
