//! Integration tests for widener-plugin.
//!
//! Drives the plugin the way a host would: persisted settings, bus
//! notifications, enable toggles and concurrent audio processing.

use std::sync::Arc;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};

use tempfile::TempDir;
use widener_config::{ConfigBus, ConfigStore, ENABLE_KEY, FileStore, MemoryStore, WIDTH_KEY};
use widener_core::{Effect, Narrowing, WidthLaw};
use widener_plugin::{PLUGIN_ID, PLUGIN_NAME, StereoWidenerPlugin};

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

fn setup(toml: &str) -> (Arc<MemoryStore>, Arc<ConfigBus>, StereoWidenerPlugin) {
    init_tracing();
    let store = Arc::new(MemoryStore::from_toml(toml).unwrap());
    let bus = Arc::new(ConfigBus::new());
    let plugin = StereoWidenerPlugin::new(store.clone(), bus.clone());
    (store, bus, plugin)
}

#[test]
fn test_metadata() {
    assert_eq!(PLUGIN_ID, "stereo_widener");
    assert_eq!(PLUGIN_NAME, "Stereo widener");
}

/// `start()` reads both keys and subscribes.
#[test]
fn test_start_reads_settings() {
    let (_, bus, plugin) = setup("[stereo_widener]\nenable = 1\nwidth = -100.0\n");
    plugin.start();

    assert!(plugin.is_enabled());
    assert_eq!(plugin.width_percent(), -100.0);
    assert_eq!(bus.len(), 1);

    let mut frames = [3000i16, -2000, 12000, 4000];
    plugin.process_int16(&mut frames, 2, 2, 16, 48000);
    assert_eq!(frames, [500, 500, 8000, 8000]);
}

/// Missing settings start disabled at bypass width.
#[test]
fn test_start_with_empty_config() {
    let (store, _, plugin) = setup("");
    plugin.start();

    assert!(!plugin.is_enabled());
    assert!(plugin.coefficients().is_bypass());
    assert!(store.snapshot().is_empty(), "nothing should be written");
}

/// Out-of-range stored widths are clamped and the store corrected.
#[test]
fn test_start_clamps_and_writes_back() {
    let (store, _, plugin) = setup("[stereo_widener]\nwidth = -150.0\n");
    plugin.start();

    assert_eq!(plugin.width_percent(), -100.0);
    assert_eq!(plugin.coefficients().width, -1.0);
    assert_eq!(store.get_float(WIDTH_KEY, 0.0), -100.0);
}

/// Store edits take effect after a bus notification, and only while started.
#[test]
fn test_config_change_via_bus() {
    let (store, bus, plugin) = setup("");
    plugin.start();

    store.set_float(WIDTH_KEY, 100.0);
    assert!(plugin.coefficients().is_bypass(), "no change before notify");
    bus.notify();
    assert_eq!(plugin.width_percent(), 100.0);

    let mut frames = [1000i16, 0];
    plugin.process_int16(&mut frames, 1, 2, 16, 44100);
    assert_eq!(frames, [700, -300]);

    plugin.stop();
    store.set_float(WIDTH_KEY, 0.0);
    bus.notify();
    assert_eq!(plugin.width_percent(), 100.0, "stopped plugin ignores changes");

    plugin.on_config_changed();
    assert_eq!(plugin.width_percent(), 0.0, "direct call still reloads");
}

/// Notifications carrying an out-of-range width also write back.
#[test]
fn test_config_change_clamps() {
    let (store, bus, plugin) = setup("");
    plugin.start();

    store.set_float(WIDTH_KEY, 400.0);
    bus.notify();
    assert_eq!(plugin.width_percent(), 100.0);
    assert_eq!(store.get_float(WIDTH_KEY, 0.0), 100.0);
}

/// Enable flag follows the store on notification without re-persisting.
#[test]
fn test_enable_via_bus() {
    let (store, bus, plugin) = setup("");
    plugin.start();

    store.set_int(ENABLE_KEY, 1);
    bus.notify();
    assert!(plugin.is_enabled());

    store.set_int(ENABLE_KEY, 0);
    bus.notify();
    assert!(!plugin.is_enabled());
}

/// `enable()` round-trips through the store and back via notification.
#[test]
fn test_enable_persists() {
    let (store, bus, plugin) = setup("");
    plugin.start();

    plugin.enable(true);
    assert_eq!(store.get_int(ENABLE_KEY, 0), 1);
    bus.notify();
    assert!(plugin.is_enabled());

    plugin.enable(false);
    assert_eq!(store.get_int(ENABLE_KEY, 1), 0);
    bus.notify();
    assert!(!plugin.is_enabled());
}

/// Non-stereo buffers pass through regardless of width.
#[test]
fn test_non_stereo_passthrough() {
    let (_, _, plugin) = setup("[stereo_widener]\nwidth = 100.0\n");
    plugin.start();

    let original: Vec<i16> = (0..12).map(|i| i * 1000 - 6000).collect();
    for channels in [1usize, 4, 6] {
        let mut buffer = original.clone();
        let frames = buffer.len() / channels;
        assert_eq!(
            plugin.process_int16(&mut buffer, frames, channels, 16, 44100),
            frames
        );
        assert_eq!(buffer, original, "{channels} channels");
    }
}

/// Settings survive a save and a fresh plugin instance.
#[test]
fn test_file_backed_session() {
    init_tracing();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");

    {
        let store = Arc::new(FileStore::open(&path).unwrap());
        let plugin = StereoWidenerPlugin::new(store.clone(), Arc::new(ConfigBus::new()));
        plugin.start();
        plugin.enable(true);
        plugin.set_width_percent(250.0);
        store.save().unwrap();
    }

    let store = Arc::new(FileStore::open(&path).unwrap());
    assert_eq!(store.get_int(ENABLE_KEY, 0), 1);
    assert_eq!(store.get_float(WIDTH_KEY, 0.0), 100.0);

    let plugin = StereoWidenerPlugin::new(store, Arc::new(ConfigBus::new()));
    plugin.start();
    assert!(plugin.is_enabled());
    assert_eq!(plugin.width_percent(), 100.0);
}

/// Classic law with saturating narrowing keeps full-scale input in range.
#[test]
fn test_classic_law_saturates() {
    init_tracing();
    let plugin = StereoWidenerPlugin::builder()
        .law(WidthLaw::Classic)
        .narrowing(Narrowing::Saturate)
        .build(Arc::new(MemoryStore::new()), Arc::new(ConfigBus::new()));
    plugin.set_width_percent(100.0);

    let mut frames = [i16::MAX, i16::MIN];
    plugin.process_int16(&mut frames, 1, 2, 16, 44100);
    assert_eq!(frames, [i16::MAX, i16::MIN]);
}

/// The audio thread never sees weights from two different widths in one buffer.
#[test]
fn test_concurrent_width_changes() {
    let (_, _, plugin) = setup("");
    plugin.set_width_percent(100.0);

    let mut processor = plugin.processor();
    let stop = Arc::new(AtomicBool::new(false));

    let audio_stop = Arc::clone(&stop);
    let audio = std::thread::spawn(move || {
        let mut buffers = 0usize;
        let mut frames = vec![0i16; 512];
        while !audio_stop.load(Ordering::Relaxed) || buffers < 100 {
            for pair in frames.chunks_exact_mut(2) {
                pair[0] = 1000;
                pair[1] = 0;
            }
            Effect::process_int16(&mut processor, &mut frames, 256, 2);

            let first = [frames[0], frames[1]];
            assert!(
                first == [700, -300] || first == [500, 500],
                "unexpected output {first:?}"
            );
            assert!(
                frames.chunks_exact(2).all(|p| p == first),
                "mixed coefficients inside one buffer"
            );
            buffers += 1;
        }
        buffers
    });

    for i in 0..2000 {
        plugin.set_width_percent(if i % 2 == 0 { -100.0 } else { 100.0 });
    }
    stop.store(true, Ordering::Relaxed);

    let buffers = audio.join().unwrap();
    assert!(buffers >= 100);
}
