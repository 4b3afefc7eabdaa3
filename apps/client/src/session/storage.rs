use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::Principal;

/// Durable home for at most one principal record.
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> Result<Option<Principal>, AppError>;
    fn save(&self, principal: &Principal) -> Result<(), AppError>;
    fn remove(&self) -> Result<(), AppError>;
}

/// On-disk layout: the principal under the single well-known `user` key.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    user: Principal,
}

/// JSON file storage. Writes go through a temp file in the same directory and are
/// renamed into place, so a crash mid-write never leaves a truncated session.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> Result<Option<Principal>, AppError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::Session(format!(
                    "cannot read {}: {e}",
                    self.path.display()
                )))
            }
        };

        serde_json::from_str::<PersistedSession>(&raw)
            .map(|persisted| Some(persisted.user))
            .map_err(|e| AppError::Session(format!("corrupt {}: {e}", self.path.display())))
    }

    fn save(&self, principal: &Principal) -> Result<(), AppError> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir)
            .map_err(|e| AppError::Session(format!("cannot create {}: {e}", dir.display())))?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .map_err(|e| AppError::Session(format!("cannot stage session file: {e}")))?;
        let persisted = PersistedSession {
            user: principal.clone(),
        };
        serde_json::to_writer_pretty(&mut tmp, &persisted)
            .map_err(|e| AppError::Session(format!("cannot encode session: {e}")))?;
        tmp.persist(&self.path).map_err(|e| {
            AppError::Session(format!("cannot write {}: {}", self.path.display(), e.error))
        })?;
        Ok(())
    }

    fn remove(&self) -> Result<(), AppError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Session(format!(
                "cannot remove {}: {e}",
                self.path.display()
            ))),
        }
    }
}

/// Process-local storage, used by tests and one-shot sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<Principal>>,
}

impl MemoryStorage {
    pub fn with(principal: Principal) -> Self {
        Self {
            slot: Mutex::new(Some(principal)),
        }
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Principal>, AppError> {
        Ok(self.slot.lock().map_err(poisoned)?.clone())
    }

    fn save(&self, principal: &Principal) -> Result<(), AppError> {
        *self.slot.lock().map_err(poisoned)? = Some(principal.clone());
        Ok(())
    }

    fn remove(&self) -> Result<(), AppError> {
        *self.slot.lock().map_err(poisoned)? = None;
        Ok(())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> AppError {
    AppError::Session("session slot lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_file_storage_roundtrip_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("session.json"));

        assert_eq!(storage.load().unwrap(), None);

        let principal = Principal::new("ada", Role::User);
        storage.save(&principal).unwrap();
        assert_eq!(storage.load().unwrap(), Some(principal));

        let raw = fs::read_to_string(storage.path()).unwrap();
        assert!(raw.contains("\"user\""));

        storage.remove().unwrap();
        assert_eq!(storage.load().unwrap(), None);
        // removing twice is fine
        storage.remove().unwrap();
    }

    #[test]
    fn test_file_storage_reports_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let err = FileStorage::new(&path).load().unwrap_err();
        assert!(matches!(err, AppError::Session(_)));
    }

    #[test]
    fn test_file_storage_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("session.json"));
        storage.save(&Principal::new("admin", Role::Admin)).unwrap();
        assert!(storage.load().unwrap().is_some());
    }
}
