//! Configuration store persisted to a TOML file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use toml::Table;

use crate::error::ConfigError;
use crate::paths;
use crate::store::{ConfigStore, MemoryStore};

/// A [`MemoryStore`] bound to a file on disk.
///
/// Reads and writes go to memory. Call [`save`](Self::save) to persist.
///
/// # Example
///
/// ```rust,no_run
/// use widener_config::{ConfigStore, FileStore, WIDTH_KEY};
///
/// let store = FileStore::open_default()?;
/// store.set_float(WIDTH_KEY, 25.0);
/// store.save()?;
/// # Ok::<(), widener_config::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl FileStore {
    /// Open the store at `path`. A missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let table = read_table(&path)?;
        tracing::debug!(path = %path.display(), keys = table.len(), "opened config file");
        Ok(Self {
            path,
            inner: MemoryStore::from_table(table),
        })
    }

    /// Open the store at [`paths::default_config_path`].
    pub fn open_default() -> Result<Self, ConfigError> {
        Self::open(paths::default_config_path())
    }

    /// Create a store bound to `path` from TOML text, without touching disk.
    pub fn from_toml(path: impl Into<PathBuf>, toml_str: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            path: path.into(),
            inner: MemoryStore::from_toml(toml_str)?,
        })
    }

    /// Serialize the current contents as pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        self.inner.to_toml()
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// In-memory view of the contents.
    pub fn memory(&self) -> &MemoryStore {
        &self.inner
    }

    /// Discard in-memory changes and re-read the file.
    pub fn reload(&self) -> Result<(), ConfigError> {
        self.inner.replace(read_table(&self.path)?);
        Ok(())
    }

    /// Write the contents to disk.
    ///
    /// Parent directories are created as needed. The file is written to a
    /// sibling temporary file first and renamed into place.
    pub fn save(&self) -> Result<(), ConfigError> {
        let content = self.inner.to_toml()?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            paths::ensure_dir(parent)?;
        }

        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, content).map_err(|e| ConfigError::write_file(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            ConfigError::write_file(&self.path, e)
        })?;

        tracing::debug!(path = %self.path.display(), "saved config file");
        Ok(())
    }
}

fn read_table(path: &Path) -> Result<Table, ConfigError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Table::new()),
        Err(e) => Err(ConfigError::read_file(path, e)),
    }
}

impl ConfigStore for FileStore {
    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.inner.get_int(key, default)
    }

    fn get_float(&self, key: &str, default: f32) -> f32 {
        self.inner.get_float(key, default)
    }

    fn set_int(&self, key: &str, value: i64) {
        self.inner.set_int(key, value);
    }

    fn set_float(&self, key: &str, value: f32) {
        self.inner.set_float(key, value);
    }

    fn remove(&self, key: &str) -> bool {
        self.inner.remove(key)
    }
}
