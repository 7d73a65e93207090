//! Cross-process lock file for store writers.
//!
//! The lock is a sibling file created with `create_new`, so exactly one
//! writer (in any process) holds it at a time. It is removed on drop. A lock
//! file older than the stale threshold is assumed to belong to a crashed
//! writer and is reclaimed.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use ttseval_application::ports::result_store::StoreError;

const INITIAL_BACKOFF: Duration = Duration::from_millis(10);
const MAX_BACKOFF: Duration = Duration::from_millis(100);

/// Held lock; released when dropped
#[derive(Debug)]
pub(crate) struct StoreLock {
    path: PathBuf,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

/// `<store>.lock` next to the store file
pub(crate) fn lock_path_for(store: &Path) -> PathBuf {
    let mut name = store.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

/// Acquire the lock for `store`, retrying with backoff until `timeout`
pub(crate) fn acquire(
    store: &Path,
    timeout: Duration,
    stale_after: Duration,
) -> Result<StoreLock, StoreError> {
    let lock_path = lock_path_for(store);
    let started = Instant::now();
    let mut backoff = INITIAL_BACKOFF;

    loop {
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)
        {
            Ok(mut file) => {
                let payload = format!(
                    "{{\"pid\":{},\"acquired_at\":\"{}\"}}\n",
                    std::process::id(),
                    chrono::Utc::now().to_rfc3339()
                );
                let _ = file.write_all(payload.as_bytes());
                debug!("Acquired store lock {}", lock_path.display());
                return Ok(StoreLock { path: lock_path });
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                if is_stale(&lock_path, stale_after) {
                    warn!("Reclaiming stale store lock {}", lock_path.display());
                    let _ = fs::remove_file(&lock_path);
                    continue;
                }

                let waited = started.elapsed();
                if waited >= timeout {
                    return Err(StoreError::PersistenceConflict {
                        path: store.to_path_buf(),
                        waited_ms: waited.as_millis() as u64,
                    });
                }
                thread::sleep(backoff.min(timeout - waited));
                backoff = (backoff * 2).min(MAX_BACKOFF);
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: lock_path,
                    source,
                });
            }
        }
    }
}

fn is_stale(lock_path: &Path, stale_after: Duration) -> bool {
    fs::metadata(lock_path)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|modified| modified.elapsed().ok())
        .is_some_and(|age| age >= stale_after)
}
