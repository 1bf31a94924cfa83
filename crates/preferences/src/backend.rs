//! Storage backends for the preference store worker.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::error::{PreferenceError, PreferenceResult};
use crate::preferences::Preferences;

/// Durable storage for a preference snapshot.
///
/// Backends are driven from the store's dedicated blocking worker, so
/// implementations may perform synchronous I/O.
pub trait PreferenceBackend: Send + 'static {
    fn load(&mut self) -> PreferenceResult<Preferences>;
    fn persist(&mut self, preferences: &Preferences) -> PreferenceResult<()>;
}

/// JSON file on disk, replaced atomically on every write.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PreferenceError {
        PreferenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl PreferenceBackend for FileBackend {
    fn load(&mut self) -> PreferenceResult<Preferences> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no preference file yet, starting empty");
                return Ok(Preferences::new());
            }
            Err(error) => return Err(self.io_error(error)),
        };

        serde_json::from_slice(&bytes).map_err(|source| PreferenceError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn persist(&mut self, preferences: &Preferences) -> PreferenceResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|error| self.io_error(error))?;
            }
        }

        let encoded =
            serde_json::to_vec_pretty(preferences).map_err(|source| PreferenceError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);

        fs::write(&staging, encoded).map_err(|error| self.io_error(error))?;
        fs::rename(&staging, &self.path).map_err(|error| self.io_error(error))?;

        debug!(path = %self.path.display(), entries = preferences.len(), "preferences persisted");
        Ok(())
    }
}

/// In-process backend. Clones share the same snapshot, which lets tests
/// inspect what was persisted and simulate an unavailable store.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    stored: Arc<Mutex<Preferences>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: Preferences) -> Self {
        Self {
            stored: Arc::new(Mutex::new(preferences)),
            fail_writes: Arc::default(),
        }
    }

    /// Make subsequent writes fail with [`PreferenceError::Unavailable`].
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// What has been persisted so far.
    pub fn stored(&self) -> Preferences {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Preferences> {
        self.stored
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PreferenceBackend for MemoryBackend {
    fn load(&mut self) -> PreferenceResult<Preferences> {
        Ok(self.lock().clone())
    }

    fn persist(&mut self, preferences: &Preferences) -> PreferenceResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PreferenceError::Unavailable(
                "memory backend rejects writes".to_string(),
            ));
        }
        *self.lock() = preferences.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::keys;
    use tempfile::TempDir;

    #[test]
    fn file_backend_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let mut backend = FileBackend::new(dir.path().join("absent.json"));

        assert!(backend.load().unwrap().is_empty());
        assert!(!backend.path().exists());
    }

    #[test]
    fn file_backend_creates_parent_directories_on_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("prefs.json");
        let mut backend = FileBackend::new(&path);

        let mut prefs = Preferences::new();
        prefs.set(&keys::PLATE_ON, true);
        backend.persist(&prefs).unwrap();

        assert!(path.exists());
        assert_eq!(backend.load().unwrap(), prefs);
    }

    #[test]
    fn file_backend_reports_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, b"{ not json").unwrap();

        let error = FileBackend::new(&path).load().unwrap_err();
        assert!(matches!(error, PreferenceError::Corrupt { .. }));
    }

    #[test]
    fn memory_backend_can_refuse_writes() {
        let backend = MemoryBackend::new();
        backend.set_fail_writes(true);

        let mut writer = backend.clone();
        let error = writer.persist(&Preferences::new()).unwrap_err();
        assert!(matches!(error, PreferenceError::Unavailable(_)));
    }
}
