//=========================================================================
// High Score Store
//=========================================================================
//
// `Persistence` implementations.
//
// - `RonStore`: key → f32 map in a RON file, written through on every set
// - `MemoryStore`: process-lifetime map, for demos and tests
//
// File layout:
// ```ron
// {
//     "hiscore": 412.7,
// }
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::game::Persistence;

//=== StoreError ==========================================================

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("save file I/O failed")]
    Io(#[from] std::io::Error),
    #[error("save file is corrupt: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("could not encode save data: {0}")]
    Serialize(#[from] ron::Error),
}

//=== RonStore ============================================================

/// File-backed store. A missing file is an empty store, not an error.
#[derive(Debug)]
pub struct RonStore {
    path: PathBuf,
    values: BTreeMap<String, f32>,
}

impl RonStore {
    /// Opens the store at `path`.
    ///
    /// # Errors
    ///
    /// [`StoreError`] if the file exists but cannot be read or parsed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let values = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            ron::from_str(&contents)?
        } else {
            debug!(target: "store", "No save file at {}, starting empty", path.display());
            BTreeMap::new()
        };

        Ok(Self { path, values })
    }

    /// Like [`open`](Self::open) but falls back to an empty store.
    ///
    /// The broken file is left in place until the next successful write.
    pub fn open_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::open(path) {
            Ok(store) => store,
            Err(e) => {
                warn!(target: "store", "Ignoring unreadable save file {}: {}", path.display(), e);
                Self {
                    path: path.to_path_buf(),
                    values: BTreeMap::new(),
                }
            }
        }
    }

    /// Writes every value to disk, creating parent directories.
    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let text = ron::ser::to_string_pretty(&self.values, ron::ser::PrettyConfig::new())?;
        fs::write(&self.path, text)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persistence for RonStore {
    fn get_float(&self, key: &str, default: f32) -> f32 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn set_float(&mut self, key: &str, value: f32) {
        self.values.insert(key.to_string(), value);

        match self.save() {
            Ok(()) => debug!(target: "store", "Saved {} = {}", key, value),
            Err(e) => warn!(target: "store", "Could not save {}: {}", self.path.display(), e),
        }
    }
}

//=== MemoryStore =========================================================

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, f32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Persistence for MemoryStore {
    fn get_float(&self, key: &str, default: f32) -> f32 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn set_float(&mut self, key: &str, value: f32) {
        self.values.insert(key.to_string(), value);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
