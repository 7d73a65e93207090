//! JSON Lines result store.
//!
//! Each [`RatingRecord`] is one JSON object per line. An upsert rewrites the
//! whole file: read, merge by key, write a temp file in the same directory,
//! fsync, then rename over the original. Readers therefore always see either
//! the old or the new set, never a partial write.

use super::lock;
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::debug;
use ttseval_application::ports::result_store::{
    ResultStore, StoreError, merge_records, validate_keys,
};
use ttseval_domain::RatingRecord;

const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(30);

/// File-backed store shared by every rater of one workflow variant
///
/// Writers are serialized twice: a mutex for threads of this process and a
/// lock file for other processes.
pub struct JsonlResultStore {
    path: PathBuf,
    lock_timeout: Duration,
    stale_after: Duration,
    write_guard: Mutex<()>,
}

impl JsonlResultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            stale_after: DEFAULT_STALE_AFTER,
            write_guard: Mutex::new(()),
        }
    }

    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    pub fn with_stale_after(mut self, stale_after: Duration) -> Self {
        self.stale_after = stale_after;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_records(&self) -> Result<Vec<RatingRecord>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str(line).map_err(|e| StoreError::Corrupt {
                    path: self.path.clone(),
                    line: idx + 1,
                    message: e.to_string(),
                })
            })
            .collect()
    }

    fn write_records(&self, records: &[RatingRecord]) -> Result<(), StoreError> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;

        let tmp = NamedTempFile::new_in(parent).map_err(|e| self.io_error(e))?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            for record in records {
                let line = serde_json::to_string(record).map_err(|e| StoreError::Corrupt {
                    path: self.path.clone(),
                    line: 0,
                    message: e.to_string(),
                })?;
                writeln!(writer, "{}", line).map_err(|e| self.io_error(e))?;
            }
            writer.flush().map_err(|e| self.io_error(e))?;
        }
        tmp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;
        Ok(())
    }
}

impl ResultStore for JsonlResultStore {
    fn upsert_batch(&self, records: &[RatingRecord]) -> Result<(), StoreError> {
        validate_keys(records)?;
        if records.is_empty() {
            return Ok(());
        }

        let _guard = self
            .write_guard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let _lock = lock::acquire(&self.path, self.lock_timeout, self.stale_after)?;

        let mut existing = self.read_records()?;
        merge_records(&mut existing, records);
        self.write_records(&existing)?;

        debug!(
            "Upserted {} records into {} ({} total)",
            records.len(),
            self.path.display(),
            existing.len()
        );
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<RatingRecord>, StoreError> {
        self.read_records()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use ttseval_domain::{Preference, RaterName, Score, ScoreScale, Subject};

    fn record(rater: &str, audio: &str, score: i64) -> RatingRecord {
        let rater = RaterName::try_new(rater).unwrap();
        let subject = Subject::new("tts_v1", audio, "hello", 0);
        RatingRecord::new(&rater, &subject, Score::new(score, ScoreScale::Percent).unwrap())
            .with_timestamp("2025-01-01T00:00:00.000Z")
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlResultStore::new(dir.path().join("single_eval_log.jsonl"));
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("single_eval_log.jsonl");
        let store = JsonlResultStore::new(&path);

        store.upsert(&record("Alex", "s1.wav", 72)).unwrap();
        store.upsert(&record("Alex", "s1.wav", 80)).unwrap();

        let records = store.load_for_rater("Alex").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].score.value(), 80);
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_records_survive_a_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.jsonl");
        JsonlResultStore::new(&path)
            .upsert_batch(&[record("Alex", "s1.wav", 72), record("Sam", "s1.wav", 40)])
            .unwrap();

        let reopened = JsonlResultStore::new(&path);
        let alex = reopened.load_for_rater("Alex").unwrap();
        assert_eq!(alex.len(), 1);
        assert_eq!(alex[0].score.value(), 72);
        assert_eq!(reopened.load_all().unwrap().len(), 2);
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.jsonl");
        let store = JsonlResultStore::new(&path);
        store.upsert(&record("Alex", "s1.wav", 72)).unwrap();

        let line = fs::read_to_string(&path).unwrap();
        assert!(!line.contains("preference"));
        assert!(!line.contains("remarks"));
        assert!(line.contains("\"score\":72"));

        let annotated = record("Alex", "s1.wav", 72).with_preference(Preference::Tie, None);
        store.upsert(&annotated).unwrap();
        let line = fs::read_to_string(&path).unwrap();
        assert!(line.contains("\"preference\":\"tie\""));
        assert!(!line.contains("consistent"));
    }

    #[test]
    fn test_invalid_key_is_rejected_before_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.jsonl");
        let store = JsonlResultStore::new(&path);

        let err = store.upsert(&record("Alex", " ", 50)).unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_line_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.jsonl");
        let good = serde_json::to_string(&record("Alex", "s1.wav", 72)).unwrap();
        fs::write(&path, format!("{}\nnot json\n", good)).unwrap();

        let store = JsonlResultStore::new(&path);
        assert!(matches!(
            store.load_all(),
            Err(StoreError::Corrupt { line: 2, .. })
        ));
        // a corrupt file is never overwritten
        assert!(store.upsert(&record("Alex", "s2.wav", 10)).is_err());
        assert!(fs::read_to_string(&path).unwrap().contains("not json"));
    }

    #[test]
    fn test_held_lock_surfaces_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.jsonl");
        fs::write(lock::lock_path_for(&path), "{}").unwrap();

        let store = JsonlResultStore::new(&path)
            .with_lock_timeout(Duration::from_millis(50))
            .with_stale_after(Duration::from_secs(3600));
        let err = store.upsert(&record("Alex", "s1.wav", 72)).unwrap_err();
        assert!(matches!(err, StoreError::PersistenceConflict { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_concurrent_writers_lose_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = Arc::new(dir.path().join("log.jsonl"));

        let handles: Vec<_> = (0..4)
            .map(|writer| {
                let path = Arc::clone(&path);
                thread::spawn(move || {
                    // separate instances stand in for separate processes
                    let store = JsonlResultStore::new(path.as_path())
                        .with_lock_timeout(Duration::from_secs(30));
                    for i in 0..10 {
                        let rater = format!("rater{}", writer);
                        store
                            .upsert(&record(&rater, &format!("s{}.wav", i), 50))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let store = JsonlResultStore::new(path.as_path());
        let records = store.load_all().unwrap();
        assert_eq!(records.len(), 40);
        let keys: std::collections::HashSet<_> = records.iter().map(|r| r.key()).collect();
        assert_eq!(keys.len(), 40);
    }
}
