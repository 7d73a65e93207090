//! Result store port
//!
//! Defines the overwrite-by-key persistence contract for rating records.
//! At most one record exists per [`RecordKey`]; writing a record whose key is
//! already present replaces it in place of appending a duplicate.

use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;
use ttseval_domain::{RatingRecord, RecordKey};

/// Errors that can occur while reading or writing records
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt record in {} line {line}: {message}", path.display())]
    Corrupt {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Store {} is locked by another writer (waited {waited_ms}ms)", path.display())]
    PersistenceConflict { path: PathBuf, waited_ms: u64 },

    #[error("Invalid record key: {0}")]
    InvalidKey(String),
}

/// Durable, idempotent storage of rating records
pub trait ResultStore: Send + Sync {
    /// Insert or replace every record, as one atomic write
    fn upsert_batch(&self, records: &[RatingRecord]) -> Result<(), StoreError>;

    /// Every persisted record in write order
    fn load_all(&self) -> Result<Vec<RatingRecord>, StoreError>;

    fn upsert(&self, record: &RatingRecord) -> Result<(), StoreError> {
        self.upsert_batch(std::slice::from_ref(record))
    }

    /// Records written by `rater_id`, in write order
    fn load_for_rater(&self, rater_id: &str) -> Result<Vec<RatingRecord>, StoreError> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|r| r.rater_id == rater_id)
            .collect())
    }
}

/// Reject any record whose identity key has a blank component
pub fn validate_keys(records: &[RatingRecord]) -> Result<(), StoreError> {
    for record in records {
        record
            .key()
            .validate()
            .map_err(|e| StoreError::InvalidKey(e.to_string()))?;
    }
    Ok(())
}

/// Replace-or-append `incoming` into `existing`, keeping write order
///
/// A replaced record moves to the end, so the set reads as a write log with
/// duplicates removed.
pub fn merge_records(existing: &mut Vec<RatingRecord>, incoming: &[RatingRecord]) {
    for record in incoming {
        let key: RecordKey = record.key();
        existing.retain(|r| r.key() != key);
        existing.push(record.clone());
    }
}

/// Volatile store for tests and dry runs
#[derive(Default)]
pub struct InMemoryResultStore {
    records: Mutex<Vec<RatingRecord>>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<RatingRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResultStore for InMemoryResultStore {
    fn upsert_batch(&self, records: &[RatingRecord]) -> Result<(), StoreError> {
        validate_keys(records)?;
        let mut guard = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        merge_records(&mut guard, records);
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<RatingRecord>, StoreError> {
        let guard = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(guard.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttseval_domain::{RaterName, Score, ScoreScale, Subject};

    fn record(rater: &str, audio: &str, score: i64) -> RatingRecord {
        let rater = RaterName::try_new(rater).unwrap();
        let subject = Subject::new("tts_v1", audio, "hello", 0);
        RatingRecord::new(&rater, &subject, Score::new(score, ScoreScale::Percent).unwrap())
    }

    #[test]
    fn test_upsert_twice_keeps_latest() {
        let store = InMemoryResultStore::new();
        store.upsert(&record("Alex", "s1.wav", 72)).unwrap();
        store.upsert(&record("Alex", "s1.wav", 80)).unwrap();

        let all = store.load_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].score.value(), 80);
    }

    #[test]
    fn test_load_for_rater_filters() {
        let store = InMemoryResultStore::new();
        store
            .upsert_batch(&[
                record("Alex", "s1.wav", 72),
                record("Sam", "s1.wav", 30),
                record("Alex", "s2.wav", 60),
            ])
            .unwrap();

        let alex = store.load_for_rater("Alex").unwrap();
        assert_eq!(alex.len(), 2);
        assert_eq!(alex[0].audio_ref, "s1.wav");
        assert_eq!(alex[1].audio_ref, "s2.wav");
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_invalid_key_rejected_without_write() {
        let store = InMemoryResultStore::new();
        let mut bad = record("Alex", "s1.wav", 50);
        bad.model_id = " ".to_string();

        let err = store.upsert_batch(&[record("Alex", "s2.wav", 40), bad]);
        assert!(matches!(err, Err(StoreError::InvalidKey(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_merge_records_moves_replaced_to_end() {
        let mut existing = vec![record("Alex", "s1.wav", 10), record("Alex", "s2.wav", 20)];
        merge_records(&mut existing, &[record("Alex", "s1.wav", 90)]);
        let order: Vec<_> = existing.iter().map(|r| r.audio_ref.as_str()).collect();
        assert_eq!(order, vec!["s2.wav", "s1.wav"]);
        assert_eq!(existing[1].score.value(), 90);
    }
}
