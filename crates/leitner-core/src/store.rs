//! Session stores: a JSON file on disk and an in-memory store for tests.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use crate::error::PersistenceError;
use crate::model::SessionState;
use crate::traits::SessionStore;

/// Stores session state as a pretty-printed JSON document.
///
/// Writes go to a sibling temporary file that is renamed over the target,
/// so a failed save leaves the previous state readable.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "session".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_err(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl SessionStore for JsonFileStore {
    fn load(&self) -> Result<Option<SessionState>, PersistenceError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| PersistenceError::Malformed {
                path: self.path.clone(),
                source,
            })
    }

    fn save(&self, state: &SessionState) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(state).map_err(PersistenceError::Serialize)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.write_err(e))?;
        }

        let temp = self.temp_path();
        std::fs::write(&temp, json).map_err(|e| self.write_err(e))?;
        std::fs::rename(&temp, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&temp);
            self.write_err(e)
        })
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory store with failure injection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<Option<SessionState>>,
    saves: AtomicU32,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    /// A store with no prior state.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `state`.
    pub fn with_state(state: SessionState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
            ..Self::default()
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::Relaxed);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// Number of successful saves.
    pub fn saves(&self) -> u32 {
        self.saves.load(Ordering::Relaxed)
    }

    /// Currently stored state.
    pub fn state(&self) -> Option<SessionState> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<SessionState>> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<Option<SessionState>, PersistenceError> {
        if self.fail_reads.load(Ordering::Relaxed) {
            return Err(PersistenceError::Unavailable("memory store read disabled".into()));
        }
        Ok(self.lock().clone())
    }

    fn save(&self, state: &SessionState) -> Result<(), PersistenceError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(PersistenceError::Unavailable("memory store write disabled".into()));
        }
        *self.lock() = Some(state.clone());
        self.saves.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
