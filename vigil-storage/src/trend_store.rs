//! Trend store: a bounded, day-keyed time series persisted as one JSON file.
//!
//! A run's read-modify-write happens under one exclusive [`TrendGuard`]:
//! the read, any move of a corrupt document and the atomic write all
//! require it, so overlapping runs serialize instead of losing entries.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use fd_lock::{RwLock, RwLockWriteGuard};

use vigil_core::errors::StorageError;
use vigil_core::tracing::metrics::TREND_SPAN;

use crate::atomic::atomic_write;
use crate::retention::{apply_retention, RetentionPolicy};
use crate::trend_entry::{TrendEntry, TrendFile};

/// A corrupt store found on load and moved out of the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorruptionNotice {
    /// Where the unreadable document now lives.
    pub moved_to: PathBuf,
    /// Parser message for the original document.
    pub message: String,
}

/// Advisory lock on the `<store>.lock` sidecar.
pub struct TrendLock {
    store_path: PathBuf,
    lock_path: PathBuf,
    lock: RwLock<File>,
}

impl TrendLock {
    /// Open (creating if needed) the sidecar for the store at `store_path`.
    pub fn open(store_path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let store_path = store_path.into();
        let lock_path = lock_path(&store_path);
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&lock_path)
            .map_err(|e| StorageError::Io {
                path: lock_path.clone(),
                source: e,
            })?;
        Ok(Self {
            store_path,
            lock_path,
            lock: RwLock::new(file),
        })
    }

    /// Block until the exclusive lock is held.
    pub fn acquire(&mut self) -> Result<TrendGuard<'_>, StorageError> {
        let Self {
            store_path,
            lock_path,
            lock,
        } = self;
        let guard = lock.write().map_err(|e| StorageError::LockFailed {
            path: lock_path.clone(),
            message: e.to_string(),
        })?;
        tracing::debug!(lock = %lock_path.display(), "trend store locked");
        Ok(TrendGuard {
            store_path: store_path.as_path(),
            _guard: guard,
        })
    }
}

/// Proof that the exclusive lock for one store is held. Released on drop.
pub struct TrendGuard<'a> {
    store_path: &'a Path,
    _guard: RwLockWriteGuard<'a, File>,
}

impl fmt::Debug for TrendLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrendLock")
            .field("lock_path", &self.lock_path)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for TrendGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrendGuard")
            .field("store_path", &self.store_path)
            .finish_non_exhaustive()
    }
}

impl TrendGuard<'_> {
    pub fn store_path(&self) -> &Path {
        self.store_path
    }
}

/// In-memory view of the trend series plus where it persists.
///
/// Entries are kept ascending by date with at most one entry per date.
#[derive(Debug)]
pub struct TrendStore {
    path: PathBuf,
    policy: RetentionPolicy,
    entries: Vec<TrendEntry>,
    recovered: Option<CorruptionNotice>,
}

impl TrendStore {
    /// An empty store that will persist to `path`.
    pub fn empty(path: impl Into<PathBuf>, policy: RetentionPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
            entries: Vec::new(),
            recovered: None,
        }
    }

    /// Load the store the guard protects.
    ///
    /// A missing or blank file yields an empty series. A document that fails
    /// to parse is renamed to `<file>.corrupt` and the store starts fresh; the
    /// move is reported through [`TrendStore::corruption`].
    pub fn load(guard: &TrendGuard<'_>, policy: RetentionPolicy) -> Result<Self, StorageError> {
        let path = guard.store_path().to_path_buf();
        let _span = tracing::info_span!(TREND_SPAN, path = %path.display()).entered();
        let mut store = Self::empty(path.clone(), policy);

        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no trend store yet, starting a new series");
                return Ok(store);
            }
            Err(e) => return Err(StorageError::Io { path, source: e }),
        };
        if content.trim().is_empty() {
            return Ok(store);
        }

        match serde_json::from_str::<TrendFile>(&content) {
            Ok(file) => {
                store.entries = file.entries;
                store.normalize();
                tracing::debug!(entries = store.entries.len(), "trend store loaded");
            }
            Err(e) => {
                let moved_to = corrupt_path(&path);
                fs::rename(&path, &moved_to).map_err(|source| StorageError::Io {
                    path: path.clone(),
                    source,
                })?;
                tracing::warn!(
                    moved_to = %moved_to.display(),
                    error = %e,
                    "trend store is corrupt, moved aside"
                );
                store.recovered = Some(CorruptionNotice {
                    moved_to,
                    message: e.to_string(),
                });
            }
        }
        Ok(store)
    }

    /// Lock, load and release: a read-only snapshot of the series.
    pub fn read(path: impl Into<PathBuf>, policy: RetentionPolicy) -> Result<Self, StorageError> {
        let mut lock = TrendLock::open(path)?;
        let guard = lock.acquire()?;
        Self::load(&guard, policy)
    }

    /// One locked read-modify-write: load, apply `f`, save.
    pub fn update<T>(
        path: impl Into<PathBuf>,
        policy: RetentionPolicy,
        f: impl FnOnce(&mut TrendStore) -> T,
    ) -> Result<T, StorageError> {
        let mut lock = TrendLock::open(path)?;
        let guard = lock.acquire()?;
        let mut store = Self::load(&guard, policy)?;
        let out = f(&mut store);
        store.save(&guard)?;
        Ok(out)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries, ascending by date.
    pub fn entries(&self) -> &[TrendEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Set when load found a corrupt document.
    pub fn corruption(&self) -> Option<&CorruptionNotice> {
        self.recovered.as_ref()
    }

    /// Entry for exactly `date`.
    pub fn get(&self, date: NaiveDate) -> Option<&TrendEntry> {
        self.entries.iter().find(|e| e.date == date)
    }

    /// Latest entry dated strictly before `date`.
    pub fn latest_before(&self, date: NaiveDate) -> Option<&TrendEntry> {
        self.entries.iter().rev().find(|e| e.date < date)
    }

    /// The trailing `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> &[TrendEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// Insert `entry`, replacing any entry with the same date, then apply the
    /// retention cap.
    pub fn upsert(&mut self, entry: TrendEntry) {
        match self.entries.binary_search_by_key(&entry.date, |e| e.date) {
            Ok(idx) => self.entries[idx] = entry,
            Err(idx) => self.entries.insert(idx, entry),
        }
        apply_retention(&mut self.entries, &self.policy);
    }

    /// Persist the series. `guard` must be the lock this store was loaded under.
    pub fn save(&self, guard: &TrendGuard<'_>) -> Result<(), StorageError> {
        let _span = tracing::info_span!(TREND_SPAN, path = %self.path.display()).entered();
        if guard.store_path() != self.path.as_path() {
            return Err(StorageError::LockFailed {
                path: lock_path(&self.path),
                message: format!("guard is held for {}", guard.store_path().display()),
            });
        }
        let file = TrendFile {
            entries: self.entries.clone(),
        };
        let json = serde_json::to_vec_pretty(&file).map_err(|e| StorageError::Serialization {
            message: e.to_string(),
        })?;
        atomic_write(&self.path, &json)?;
        tracing::debug!(entries = self.entries.len(), "trend store saved");
        Ok(())
    }

    /// Sort, drop duplicate dates (last one wins) and cap.
    fn normalize(&mut self) {
        self.entries.sort_by_key(|e| e.date);
        let mut deduped: Vec<TrendEntry> = Vec::with_capacity(self.entries.len());
        for entry in self.entries.drain(..) {
            match deduped.last_mut() {
                Some(last) if last.date == entry.date => *last = entry,
                _ => deduped.push(entry),
            }
        }
        self.entries = deduped;
        apply_retention(&mut self.entries, &self.policy);
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// `trends.json` -> `trends.json.corrupt`.
pub fn corrupt_path(path: &Path) -> PathBuf {
    with_suffix(path, ".corrupt")
}

/// `trends.json` -> `trends.json.lock`.
pub fn lock_path(path: &Path) -> PathBuf {
    with_suffix(path, ".lock")
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_core::types::Grade;

    fn entry(day: u32, critical: u32) -> TrendEntry {
        TrendEntry {
            date: NaiveDate::from_ymd_opt(2026, 5, day).unwrap(),
            kb_file_count: 10,
            kb_size_bytes: 1000,
            memory_file_count: 1,
            memory_size_bytes: 10,
            script_count: 2,
            critical_count: critical,
            warning_count: 0,
            grade: Grade::from_counts(critical, 0),
        }
    }

    #[test]
    fn upsert_keeps_order_and_replaces_same_day() {
        let mut store = TrendStore::empty("unused.json", RetentionPolicy::default());
        store.upsert(entry(3, 0));
        store.upsert(entry(1, 0));
        store.upsert(entry(2, 0));
        store.upsert(entry(2, 4));
        let days: Vec<u32> = store
            .entries()
            .iter()
            .map(|e| chrono::Datelike::day(&e.date))
            .collect();
        assert_eq!(days, vec![1, 2, 3]);
        assert_eq!(store.entries()[1].critical_count, 4);
    }

    #[test]
    fn latest_before_is_strict() {
        let mut store = TrendStore::empty("unused.json", RetentionPolicy::default());
        store.upsert(entry(1, 0));
        store.upsert(entry(4, 1));
        let today = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();
        assert_eq!(store.latest_before(today).map(|e| e.date.to_string()), Some("2026-05-01".into()));
        let first = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        assert!(store.latest_before(first).is_none());
    }

    #[test]
    fn recent_returns_tail() {
        let mut store = TrendStore::empty("unused.json", RetentionPolicy::default());
        for d in 1..=9 {
            store.upsert(entry(d, 0));
        }
        assert_eq!(store.recent(7).len(), 7);
        assert_eq!(chrono::Datelike::day(&store.recent(7)[0].date), 3);
        assert_eq!(store.recent(50).len(), 9);
    }

    #[test]
    fn save_refuses_a_guard_for_another_store() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut other = TrendLock::open(dir.path().join("other.json")).unwrap();
        let guard = other.acquire().unwrap();
        let store = TrendStore::empty(dir.path().join("trends.json"), RetentionPolicy::default());
        assert!(matches!(store.save(&guard), Err(StorageError::LockFailed { .. })));
        assert!(!dir.path().join("trends.json").exists());
    }

    #[test]
    fn suffix_paths() {
        let p = Path::new("/state/trends.json");
        assert_eq!(corrupt_path(p), PathBuf::from("/state/trends.json.corrupt"));
        assert_eq!(lock_path(p), PathBuf::from("/state/trends.json.lock"));
    }
}
