//! Integration tests for widener-config.
//!
//! These tests verify end-to-end functionality across modules.

use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tempfile::TempDir;
use widener_config::{
    ConfigBus, ConfigStore, ENABLE_KEY, FileStore, MemoryStore, WIDTH_KEY, WidenerSettings,
};

/// A hand-edited file is readable through the store and the typed section.
#[test]
fn test_hand_written_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(
        &path,
        "# user settings\n[stereo_widener]\nenable = true\nwidth = \"-20\"\n\n[other]\nkeep = 3\n",
    )
    .unwrap();

    let store = FileStore::open(&path).unwrap();
    assert_eq!(store.get_int(ENABLE_KEY, 0), 1);
    assert_eq!(store.get_float(WIDTH_KEY, 0.0), -20.0);

    let settings = WidenerSettings::load(&store);
    assert!(settings.is_enabled());
    assert_eq!(settings.width, -20.0);
}

/// Saving preserves sections that belong to other consumers.
#[test]
fn test_save_preserves_foreign_sections() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "[other]\nkeep = 3\n").unwrap();

    let store = FileStore::open(&path).unwrap();
    WidenerSettings {
        enable: 1,
        width: 100.0,
    }
    .save(&store);
    store.save().unwrap();

    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(reopened.get_int("other.keep", 0), 3);
    assert_eq!(reopened.get_float(WIDTH_KEY, 0.0), 100.0);
}

/// Store writes followed by a bus notification reach a listener that re-reads.
#[test]
fn test_bus_drives_rereads() {
    let store: Arc<dyn ConfigStore> = Arc::new(MemoryStore::new());
    let bus = ConfigBus::new();

    let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let reader_store = Arc::clone(&store);
    let reader_seen = Arc::clone(&seen);
    let id = bus.subscribe(Arc::new(move || {
        reader_seen
            .lock()
            .push(reader_store.get_float(WIDTH_KEY, 0.0));
    }));

    store.set_float(WIDTH_KEY, 10.0);
    bus.notify();
    store.set_float(WIDTH_KEY, -30.0);
    bus.notify();
    bus.unsubscribe(id);
    store.set_float(WIDTH_KEY, 99.0);
    bus.notify();

    assert_eq!(*seen.lock(), vec![10.0, -30.0]);
}

/// Concurrent writers and readers never observe a partially written table.
#[test]
fn test_concurrent_access() {
    let store = Arc::new(MemoryStore::new());
    let reads = Arc::new(AtomicUsize::new(0));

    let writers: Vec<_> = (0..4)
        .map(|t| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..200 {
                    store.set_float(WIDTH_KEY, (t * 200 + i) as f32);
                    store.set_int(ENABLE_KEY, i64::from(i % 2 == 0));
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..2)
        .map(|_| {
            let store = Arc::clone(&store);
            let reads = Arc::clone(&reads);
            std::thread::spawn(move || {
                for _ in 0..500 {
                    let w = store.get_float(WIDTH_KEY, 0.0);
                    assert!((0.0..800.0).contains(&w));
                    let e = store.get_int(ENABLE_KEY, 0);
                    assert!(e == 0 || e == 1);
                    reads.fetch_add(1, Ordering::Relaxed);
                }
            })
        })
        .collect();

    for h in writers.into_iter().chain(readers) {
        h.join().unwrap();
    }
    assert_eq!(reads.load(Ordering::Relaxed), 1000);
}
