//! Bounded, newest-first log of past analyses.
//!
//! The whole log lives under one storage key and is rewritten on every
//! change. Concurrent writers from other processes race last-write-wins.

pub mod storage;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::analysis::AnalysisPayload;

pub use storage::{FileStore, KeyValueStore, MemoryStore, StoreError};

/// Storage key holding the JSON array of entries.
pub const HISTORY_KEY: &str = "offenseHistory";
/// Maximum number of entries kept.
pub const HISTORY_CAPACITY: usize = 10;

/// One past analysis. Identified by its position in the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub text: String,
    pub data: AnalysisPayload,
    pub date: DateTime<Utc>,
}

pub struct HistoryStore<S> {
    storage: S,
    revision: watch::Sender<u64>,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(storage: S) -> Self {
        let (revision, _) = watch::channel(0);
        Self { storage, revision }
    }

    /// All entries, newest first. Missing or unreadable storage reads as empty;
    /// stored items that do not parse as entries are skipped.
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.raw_items()
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()
    }

    pub fn get(&self, index: usize) -> Option<HistoryEntry> {
        self.list().into_iter().nth(index)
    }

    /// Prepends a new entry stamped now and drops whatever falls past capacity.
    pub fn record(
        &mut self,
        text: impl Into<String>,
        data: AnalysisPayload,
    ) -> Result<HistoryEntry, StoreError> {
        let entry = HistoryEntry {
            text: text.into(),
            data,
            date: Utc::now(),
        };

        // Unparseable items are carried along untouched; only eviction drops them.
        let mut items = self.raw_items();
        items.insert(0, serde_json::to_value(&entry).map_err(encode_error)?);
        items.truncate(HISTORY_CAPACITY);
        self.write(&items)?;

        info!(len = items.len(), "Recorded analysis in history");
        self.bump();
        Ok(entry)
    }

    /// Removes every entry. Safe to call on an empty log.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.storage.remove(HISTORY_KEY)?;
        info!("Cleared history");
        self.bump();
        Ok(())
    }

    /// Receiver that changes whenever the log does, so views know to redraw.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// The stored array as raw JSON items, newest first.
    fn raw_items(&self) -> Vec<Value> {
        let raw = match self.storage.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("History storage unreadable, treating as empty: {e}");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("History is not a JSON array, treating as empty: {e}");
            Vec::new()
        })
    }

    fn write(&mut self, items: &[Value]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(items).map_err(encode_error)?;
        self.storage.set(HISTORY_KEY, &raw)
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }
}

fn encode_error(source: serde_json::Error) -> StoreError {
    StoreError::Encode {
        key: HISTORY_KEY.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(n: u8) -> AnalysisPayload {
        AnalysisPayload::from_value(json!({
            "racism": {"ai_score": n, "potential_score": n, "reason": format!("r{n}")},
            "other_minorities": [],
            "history_summary": "fine",
            "conversational_reception_score": 90
        }))
        .unwrap()
    }

    fn store() -> HistoryStore<MemoryStore> {
        HistoryStore::new(MemoryStore::new())
    }

    #[test]
    fn test_empty_when_key_absent() {
        assert!(store().list().is_empty());
    }

    #[test]
    fn test_record_then_list_round_trip() {
        let mut history = store();
        let data = payload(7);
        history.record("some text", data.clone()).unwrap();

        let entries = history.list();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "some text");
        assert_eq!(entries[0].data, data);
    }

    #[test]
    fn test_newest_first() {
        let mut history = store();
        history.record("first", payload(1)).unwrap();
        history.record("second", payload(2)).unwrap();
        let texts: Vec<_> = history.list().into_iter().map(|e| e.text).collect();
        assert_eq!(texts, vec!["second", "first"]);
    }

    #[test]
    fn test_eleventh_record_evicts_oldest() {
        let mut history = store();
        for i in 1..=11u8 {
            history.record(format!("text {i}"), payload(i)).unwrap();
        }

        let texts: Vec<_> = history.list().into_iter().map(|e| e.text).collect();
        assert_eq!(texts.len(), HISTORY_CAPACITY);
        let expected: Vec<_> = (2..=11u8).rev().map(|i| format!("text {i}")).collect();
        assert_eq!(texts, expected);
        assert!(!texts.contains(&"text 1".to_string()));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut history = store();
        history.clear().unwrap();
        history.record("x", payload(1)).unwrap();
        history.clear().unwrap();
        assert!(history.list().is_empty());
        history.clear().unwrap();
        assert!(history.list().is_empty());
        assert_eq!(history.storage.get(HISTORY_KEY).unwrap(), None);
    }

    #[test]
    fn test_corrupt_storage_reads_empty_and_recovers() {
        let mut storage = MemoryStore::new();
        storage.set(HISTORY_KEY, "{not json").unwrap();
        let mut history = HistoryStore::new(storage);
        assert!(history.list().is_empty());

        history.record("fresh", payload(3)).unwrap();
        assert_eq!(history.list().len(), 1);
    }

    #[test]
    fn test_non_array_and_bad_entries() {
        let mut storage = MemoryStore::new();
        storage.set(HISTORY_KEY, r#"{"text": "x"}"#).unwrap();
        assert!(HistoryStore::new(storage.clone()).list().is_empty());

        let raw = json!([
            {"text": "ok", "data": {"racism": {"ai_score": 1}}, "date": "2024-05-01T12:00:00.000Z"},
            {"text": "no date", "data": {}},
            42
        ]);
        storage.set(HISTORY_KEY, &raw.to_string()).unwrap();
        let entries = HistoryStore::new(storage).list();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "ok");
    }

    #[test]
    fn test_record_keeps_unreadable_items() {
        let mut storage = MemoryStore::new();
        let old = json!([
            {"text": "old", "data": {}, "date": 1714564800000u64}
        ]);
        storage.set(HISTORY_KEY, &old.to_string()).unwrap();
        let mut history = HistoryStore::new(storage);
        assert!(history.list().is_empty());

        history.record("new", payload(1)).unwrap();

        let raw: Vec<Value> =
            serde_json::from_str(&history.storage.get(HISTORY_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0]["text"], "new");
        assert_eq!(raw[1], old[0]);

        let texts: Vec<_> = history.list().into_iter().map(|e| e.text).collect();
        assert_eq!(texts, vec!["new"]);
    }

    #[test]
    fn test_unreadable_items_still_count_toward_capacity() {
        let mut storage = MemoryStore::new();
        let stale: Vec<Value> = (0..HISTORY_CAPACITY)
            .map(|i| json!({"text": format!("stale {i}"), "date": i}))
            .collect();
        storage.set(HISTORY_KEY, &json!(stale).to_string()).unwrap();
        let mut history = HistoryStore::new(storage);

        history.record("fresh", payload(2)).unwrap();
        let raw: Vec<Value> =
            serde_json::from_str(&history.storage.get(HISTORY_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(raw.len(), HISTORY_CAPACITY);
        assert_eq!(raw.last().unwrap()["text"], "stale 8");
        assert_eq!(history.list().len(), 1);
    }

    #[test]
    fn test_changes_are_signalled() {
        let mut history = store();
        let mut rx = history.subscribe();
        assert!(!rx.has_changed().unwrap());

        history.record("x", payload(1)).unwrap();
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        history.clear().unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow(), 2);
    }

    #[test]
    fn test_persists_through_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = HistoryStore::new(FileStore::new(dir.path()));
        history.record("kept", payload(4)).unwrap();

        let reopened = HistoryStore::new(FileStore::new(dir.path()));
        let entries = reopened.list();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0], history.list()[0]);
    }
}
