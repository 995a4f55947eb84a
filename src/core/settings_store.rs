use crate::error::ShellResult;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const CURRENT_STORE_VERSION: u32 = 1;

fn default_store_version() -> u32 {
    1
}

/// Process-wide durable key/value area for small string values.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> ShellResult<()>;
}

#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> ShellResult<()> {
        self.insert_raw(key, value);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PersistedSettings {
    #[serde(default = "default_store_version")]
    version: u32,
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// JSON file backed store. Every write goes to disk before `set` returns.
#[derive(Debug)]
pub struct JsonSettingsStore {
    path: PathBuf,
    state: Mutex<PersistedSettings>,
}

impl JsonSettingsStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = match load(&path) {
            Ok(Some(state)) => state,
            Ok(None) => PersistedSettings::default(),
            Err(e) => {
                log::warn!(
                    "ignoring unreadable settings file {}: {}",
                    path.display(),
                    e
                );
                PersistedSettings::default()
            }
        };
        Self {
            path,
            state: Mutex::new(state),
        }
    }
}

impl SettingsStore for JsonSettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.state.lock().entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> ShellResult<()> {
        let mut state = self.state.lock();
        if state.entries.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }

        let previous = state.entries.insert(key.to_string(), value.to_string());
        state.version = CURRENT_STORE_VERSION;
        if let Err(e) = write_state_atomically(&self.path, &state) {
            // keep memory and disk in agreement
            match previous {
                Some(prev) => state.entries.insert(key.to_string(), prev),
                None => state.entries.remove(key),
            };
            return Err(e.into());
        }
        Ok(())
    }
}

fn load(path: &Path) -> io::Result<Option<PersistedSettings>> {
    if !path.exists() {
        return Ok(None);
    }

    let bytes = fs::read(path)?;
    let state: PersistedSettings = serde_json::from_slice(&bytes)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(Some(state))
}

fn write_state_atomically(path: &Path, state: &PersistedSettings) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp = path.with_extension("tmp");
    let mut file = fs::File::create(&tmp)?;
    serde_json::to_writer(&mut file, state).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    file.write_all(b"\n")?;
    file.sync_all()?;

    fs::rename(tmp, path)?;
    Ok(())
}
