// History store - the owned, capacity-bounded list of saved calculations
use crate::application::history_repository::HistoryRepository;
use crate::domain::history::{CalculationSnapshot, HistoryEntry, HISTORY_CAPACITY};
use chrono::Utc;
use std::sync::Arc;

/// In-memory list of saved calculations, newest first, backed by a
/// repository. Every mutating operation awaits the persist before returning,
/// so persisted state is never behind what callers observe.
pub struct HistoryStore {
    repository: Arc<dyn HistoryRepository>,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    pub fn new(repository: Arc<dyn HistoryRepository>) -> Self {
        Self {
            repository,
            entries: Vec::new(),
        }
    }

    /// Read the persisted history. Failures degrade to an empty list.
    pub async fn load(&mut self) {
        self.entries = match self.repository.load().await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("failed to load calculation history: {e}");
                Vec::new()
            }
        };
        tracing::debug!("loaded {} history entries", self.entries.len());
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Read-side filter over customer name and area; the underlying list and
    /// its order are untouched. An empty term returns everything.
    pub fn search(&self, term: &str) -> Vec<&HistoryEntry> {
        self.entries.iter().filter(|e| e.matches(term)).collect()
    }

    /// Prepend a new entry and truncate to capacity. Returns the new id.
    pub async fn create(&mut self, snapshot: CalculationSnapshot) -> i64 {
        let now = Utc::now();
        let id = self.unique_id(now.timestamp_millis());
        self.entries.insert(0, HistoryEntry::new(id, now, snapshot));
        self.entries.truncate(HISTORY_CAPACITY);
        self.persist().await;
        tracing::debug!("saved calculation {id} ({} entries)", self.entries.len());
        id
    }

    /// Replace the entry with the given id in place: same id, same creation
    /// timestamp, same position, new content and `last_modified`. Returns
    /// false when the id is unknown.
    pub async fn update(&mut self, id: i64, snapshot: CalculationSnapshot) -> bool {
        let Some(existing) = self.entries.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        *existing = existing.with_update(snapshot, Utc::now());
        self.persist().await;
        tracing::debug!("updated calculation {id}");
        true
    }

    /// Remove by id. Unknown ids are a no-op.
    pub async fn delete(&mut self, id: i64) {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() != before {
            self.persist().await;
            tracing::debug!("deleted calculation {id}");
        }
    }

    /// Empty the list and remove the persisted record itself.
    pub async fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.repository.clear().await {
            tracing::warn!("failed to remove persisted history: {e}");
        }
        tracing::debug!("cleared calculation history");
    }

    async fn persist(&self) {
        if let Err(e) = self.repository.persist(&self.entries).await {
            tracing::error!("failed to persist calculation history: {e}");
        }
    }

    /// Ids are creation-millis-derived; bump past any collision so ids stay
    /// unique within the list even for saves inside the same millisecond.
    fn unique_id(&self, candidate: i64) -> i64 {
        let mut id = candidate;
        while self.entries.iter().any(|e| e.id == id) {
            id += 1;
        }
        id
    }
}
