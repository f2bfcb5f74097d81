//! Trend store persistence tests.

use std::sync::mpsc;
use std::thread;
use std::time::Duration as StdDuration;

use chrono::{Duration, NaiveDate};
use tempfile::TempDir;
use vigil_core::types::Grade;
use vigil_storage::{RetentionPolicy, TrendEntry, TrendLock, TrendStore};

fn day(n: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap() + Duration::days(n)
}

fn entry(date: NaiveDate, critical: u32, warning: u32) -> TrendEntry {
    TrendEntry {
        date,
        kb_file_count: 12,
        kb_size_bytes: 40_960,
        memory_file_count: 4,
        memory_size_bytes: 8_192,
        script_count: 3,
        critical_count: critical,
        warning_count: warning,
        grade: Grade::from_counts(critical, warning),
    }
}

#[test]
fn missing_store_loads_empty() {
    let dir = TempDir::new().unwrap();
    let store = TrendStore::read(dir.path().join("trends.json"), RetentionPolicy::default()).unwrap();
    assert!(store.is_empty());
    assert!(store.corruption().is_none());
}

#[test]
fn save_then_load_is_lossless() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state").join("trends.json");

    let written = TrendStore::update(&path, RetentionPolicy::default(), |store| {
        for i in 0..5 {
            store.upsert(entry(day(i), i as u32 % 2, i as u32));
        }
        store.entries().to_vec()
    })
    .unwrap();

    let reloaded = TrendStore::read(&path, RetentionPolicy::default()).unwrap();
    assert_eq!(reloaded.entries(), written.as_slice());

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"entries\""));
    assert!(raw.contains("\"criticalCount\""));
}

#[test]
fn same_day_rerun_overwrites() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trends.json");

    for warnings in [1, 2] {
        TrendStore::update(&path, RetentionPolicy::default(), |store| {
            store.upsert(entry(day(0), 0, warnings))
        })
        .unwrap();
    }

    let store = TrendStore::read(&path, RetentionPolicy::default()).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.entries()[0].warning_count, 2);
}

#[test]
fn cap_evicts_oldest_on_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trends.json");

    TrendStore::update(&path, RetentionPolicy::default(), |store| {
        for i in 0..100 {
            store.upsert(entry(day(i), 0, 0));
        }
    })
    .unwrap();

    let store = TrendStore::read(&path, RetentionPolicy::default()).unwrap();
    assert_eq!(store.len(), 90);
    assert_eq!(store.entries()[0].date, day(10));
    assert_eq!(store.entries()[89].date, day(99));
}

#[test]
fn corrupt_store_is_moved_aside() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trends.json");
    std::fs::write(&path, "{ \"entries\": [ {\"date\": ").unwrap();

    let store = TrendStore::read(&path, RetentionPolicy::default()).unwrap();
    assert!(store.is_empty());
    let notice = store.corruption().unwrap();
    assert_eq!(notice.moved_to, dir.path().join("trends.json.corrupt"));
    assert!(notice.moved_to.exists());
    assert!(!path.exists());
}

#[test]
fn unsorted_and_duplicate_dates_are_normalized_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trends.json");
    let file = serde_json::json!({
        "entries": [
            serde_json::to_value(entry(day(2), 0, 0)).unwrap(),
            serde_json::to_value(entry(day(0), 0, 0)).unwrap(),
            serde_json::to_value(entry(day(2), 1, 0)).unwrap(),
        ]
    });
    std::fs::write(&path, file.to_string()).unwrap();

    let store = TrendStore::read(&path, RetentionPolicy::default()).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.entries()[0].date, day(0));
    assert_eq!(store.entries()[1].critical_count, 1);
}

#[test]
fn overlapping_updates_keep_both_entries() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trends.json");
    TrendStore::update(&path, RetentionPolicy::default(), |store| {
        for i in 0..6 {
            store.upsert(entry(day(i), 0, 0));
        }
    })
    .unwrap();

    let (locked_tx, locked_rx) = mpsc::channel();
    let first_path = path.clone();
    let first = thread::spawn(move || {
        let mut lock = TrendLock::open(&first_path).unwrap();
        let guard = lock.acquire().unwrap();
        let mut store = TrendStore::load(&guard, RetentionPolicy::default()).unwrap();
        locked_tx.send(()).unwrap();
        // Give the second writer time to queue on the lock.
        thread::sleep(StdDuration::from_millis(200));
        store.upsert(entry(day(6), 1, 0));
        store.save(&guard).unwrap();
    });

    locked_rx.recv().unwrap();
    TrendStore::update(&path, RetentionPolicy::default(), |store| {
        store.upsert(entry(day(7), 0, 2))
    })
    .unwrap();
    first.join().unwrap();

    let store = TrendStore::read(&path, RetentionPolicy::default()).unwrap();
    assert_eq!(store.len(), 8);
    assert_eq!(store.get(day(6)).unwrap().critical_count, 1);
    assert_eq!(store.get(day(7)).unwrap().warning_count, 2);
}
