//! Named numeric configuration values.
//!
//! [`ConfigStore`] is the narrow interface the widener uses to read and write
//! its persisted settings. Keys are dotted paths (`stereo_widener.width`) that
//! address nested TOML tables.
//!
//! Reads never fail: a missing or unreadable value yields the caller's
//! default. Stored values are coerced between types the way a loosely typed
//! host configuration would:
//!
//! | stored | `get_int` | `get_float` |
//! |---|---|---|
//! | integer | as-is | converted |
//! | float | truncated toward zero | as-is |
//! | boolean | `0` / `1` | `0.0` / `1.0` |
//! | numeric string | parsed | parsed |
//! | anything else | default | default |

use parking_lot::RwLock;
use toml::{Table, Value};

use crate::error::ConfigError;

/// Read/write access to persisted configuration values.
///
/// Implementations use interior mutability so a single store can be shared
/// (behind an `Arc`) between the host and the effect.
pub trait ConfigStore: Send + Sync {
    /// Read an integer value, or `default` when missing or unreadable.
    fn get_int(&self, key: &str, default: i64) -> i64;

    /// Read a float value, or `default` when missing or unreadable.
    fn get_float(&self, key: &str, default: f32) -> f32;

    /// Store an integer value.
    fn set_int(&self, key: &str, value: i64);

    /// Store a float value.
    fn set_float(&self, key: &str, value: f32);

    /// Remove a value. Returns `true` if something was removed.
    fn remove(&self, key: &str) -> bool;
}

/// Split a dotted key into its segments, rejecting empty ones.
pub fn split_key(key: &str) -> Result<Vec<&str>, ConfigError> {
    if key.is_empty() {
        return Err(ConfigError::invalid_key(key, "key is empty"));
    }
    let segments: Vec<&str> = key.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(ConfigError::invalid_key(key, "empty key segment"));
    }
    Ok(segments)
}

fn lookup<'a>(table: &'a Table, key: &str) -> Option<&'a Value> {
    let segments = split_key(key).ok()?;
    let (last, parents) = segments.split_last()?;

    let mut current = table;
    for segment in parents {
        current = current.get(*segment)?.as_table()?;
    }
    current.get(*last)
}

fn insert(table: &mut Table, key: &str, value: Value) -> Result<(), ConfigError> {
    let segments = split_key(key)?;
    let Some((last, parents)) = segments.split_last() else {
        return Err(ConfigError::invalid_key(key, "key is empty"));
    };

    let mut current = table;
    for segment in parents {
        let entry = current
            .entry((*segment).to_string())
            .or_insert_with(|| Value::Table(Table::new()));
        current = entry.as_table_mut().ok_or_else(|| {
            ConfigError::invalid_key(key, format!("'{segment}' already holds a non-table value"))
        })?;
    }
    current.insert((*last).to_string(), value);
    Ok(())
}

fn delete(table: &mut Table, key: &str) -> bool {
    let Ok(segments) = split_key(key) else {
        return false;
    };
    let Some((last, parents)) = segments.split_last() else {
        return false;
    };

    let mut current = table;
    for segment in parents {
        match current.get_mut(*segment).and_then(Value::as_table_mut) {
            Some(next) => current = next,
            None => return false,
        }
    }
    current.remove(*last).is_some()
}

/// Interpret a stored value as an integer.
pub fn value_as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(i) => Some(*i),
        Value::Float(f) if f.is_finite() => Some(*f as i64),
        Value::Boolean(b) => Some(i64::from(*b)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
        }
        _ => None,
    }
}

/// Interpret a stored value as a float.
pub fn value_as_float(value: &Value) -> Option<f32> {
    match value {
        Value::Integer(i) => Some(*i as f32),
        Value::Float(f) => Some(*f as f32),
        Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f32>().ok(),
        _ => None,
    }
}

/// Widen an `f32` to the `f64` TOML stores, keeping its shortest decimal form.
///
/// `0.1f32` is stored as `0.1` rather than `0.10000000149011612`.
fn float_value(value: f32) -> Value {
    let widened = value
        .to_string()
        .parse::<f64>()
        .unwrap_or_else(|_| f64::from(value));
    Value::Float(widened)
}

/// In-memory configuration store backed by a TOML table.
///
/// # Example
///
/// ```rust
/// use widener_config::{ConfigStore, MemoryStore};
///
/// let store = MemoryStore::new();
/// store.set_float("stereo_widener.width", 40.0);
///
/// assert_eq!(store.get_float("stereo_widener.width", 0.0), 40.0);
/// assert_eq!(store.get_int("stereo_widener.width", 0), 40);
/// assert_eq!(store.get_int("stereo_widener.enable", 0), 0);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: RwLock<Table>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding an existing table.
    pub fn from_table(table: Table) -> Self {
        Self {
            table: RwLock::new(table),
        }
    }

    /// Parse a store from TOML text.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(Self::from_table(toml::from_str(toml_str)?))
    }

    /// Serialize the current contents as pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&*self.table.read())?)
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> Table {
        self.table.read().clone()
    }

    /// Replace the whole contents.
    pub fn replace(&self, table: Table) {
        *self.table.write() = table;
    }

    /// Read a raw value.
    pub fn get_value(&self, key: &str) -> Option<Value> {
        lookup(&self.table.read(), key).cloned()
    }

    /// Store a raw value, creating intermediate tables as needed.
    pub fn try_set_value(&self, key: &str, value: Value) -> Result<(), ConfigError> {
        insert(&mut self.table.write(), key, value)
    }

    /// Returns `true` if a value exists at `key`.
    pub fn contains(&self, key: &str) -> bool {
        lookup(&self.table.read(), key).is_some()
    }

    fn set_logged(&self, key: &str, value: Value) {
        if let Err(err) = self.try_set_value(key, value) {
            tracing::warn!(%key, error = %err, "ignoring configuration write");
        }
    }
}

impl ConfigStore for MemoryStore {
    fn get_int(&self, key: &str, default: i64) -> i64 {
        lookup(&self.table.read(), key)
            .and_then(value_as_int)
            .unwrap_or(default)
    }

    fn get_float(&self, key: &str, default: f32) -> f32 {
        lookup(&self.table.read(), key)
            .and_then(value_as_float)
            .unwrap_or(default)
    }

    fn set_int(&self, key: &str, value: i64) {
        self.set_logged(key, Value::Integer(value));
    }

    fn set_float(&self, key: &str, value: f32) {
        self.set_logged(key, float_value(value));
    }

    fn remove(&self, key: &str) -> bool {
        delete(&mut self.table.write(), key)
    }
}
