//! Session store: the one piece of process-wide mutable state.
//!
//! Holds at most one [`Principal`]. Transitions are synchronous, so the access gate sees the
//! new state on the very next read. Restoration from durable storage happens once, in
//! [`SessionStore::restore`], before any view is built and without touching the network.

pub mod storage;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::Principal;

pub use storage::{FileStorage, MemoryStorage, SessionStorage};

pub struct SessionStore {
    principal: Option<Principal>,
    storage: Box<dyn SessionStorage>,
}

impl SessionStore {
    /// Builds the store, adopting any principal already persisted in `storage`.
    /// Unreadable storage is logged and treated as "no session".
    pub fn restore(storage: Box<dyn SessionStorage>) -> Self {
        let principal = match storage.load() {
            Ok(principal) => principal,
            Err(e) => {
                warn!("Ignoring stored session: {e}");
                None
            }
        };

        if let Some(p) = &principal {
            info!("Restored session for {} ({})", p.username, p.role);
        }

        Self { principal, storage }
    }

    /// Makes `principal` current and persists it.
    ///
    /// The in-memory transition always happens; a persistence failure is returned so the
    /// caller can tell the user that the session will not survive a restart.
    pub fn set_principal(&mut self, principal: Principal) -> Result<(), AppError> {
        info!("Session active for {} ({})", principal.username, principal.role);
        let result = self.storage.save(&principal);
        self.principal = Some(principal);
        result
    }

    /// Drops the current principal and its persisted copy.
    pub fn clear(&mut self) -> Result<Option<Principal>, AppError> {
        let previous = self.principal.take();
        if let Some(p) = &previous {
            info!("Session cleared for {}", p.username);
        }
        self.storage.remove()?;
        Ok(previous)
    }

    pub fn current(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.principal.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    struct FailingStorage;

    impl SessionStorage for FailingStorage {
        fn load(&self) -> Result<Option<Principal>, AppError> {
            Err(AppError::Session("disk on fire".to_string()))
        }
        fn save(&self, _: &Principal) -> Result<(), AppError> {
            Err(AppError::Session("read-only".to_string()))
        }
        fn remove(&self) -> Result<(), AppError> {
            Ok(())
        }
    }

    #[test]
    fn test_starts_absent_with_empty_storage() {
        let store = SessionStore::restore(Box::new(MemoryStorage::default()));
        assert!(store.current().is_none());
        assert!(!store.is_active());
    }

    #[test]
    fn test_restores_persisted_principal() {
        let principal = Principal::new("viviyan", Role::Admin);
        let store = SessionStore::restore(Box::new(MemoryStorage::with(principal.clone())));
        assert_eq!(store.current(), Some(&principal));
    }

    #[test]
    fn test_transitions_are_visible_immediately() {
        let mut store = SessionStore::restore(Box::new(MemoryStorage::default()));

        store.set_principal(Principal::new("ada", Role::User)).unwrap();
        assert_eq!(store.current().map(|p| p.username.as_str()), Some("ada"));

        let previous = store.clear().unwrap();
        assert_eq!(previous.map(|p| p.username), Some("ada".to_string()));
        assert!(store.current().is_none());
    }

    #[test]
    fn test_set_principal_replaces_existing() {
        let mut store = SessionStore::restore(Box::new(MemoryStorage::default()));
        store.set_principal(Principal::new("ada", Role::User)).unwrap();
        store.set_principal(Principal::new("admin", Role::Admin)).unwrap();
        assert!(store.current().unwrap().is_admin());
    }

    #[test]
    fn test_persistence_survives_a_new_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut first = SessionStore::restore(Box::new(FileStorage::new(&path)));
        first.set_principal(Principal::new("ada", Role::User)).unwrap();

        let second = SessionStore::restore(Box::new(FileStorage::new(&path)));
        assert_eq!(second.current().map(|p| p.role), Some(Role::User));

        let mut second = second;
        second.clear().unwrap();
        let third = SessionStore::restore(Box::new(FileStorage::new(&path)));
        assert!(third.current().is_none());
    }

    #[test]
    fn test_unreadable_storage_degrades_to_absent() {
        let mut store = SessionStore::restore(Box::new(FailingStorage));
        assert!(store.current().is_none());

        // still transitions in memory even though persistence fails
        let err = store
            .set_principal(Principal::new("ada", Role::User))
            .unwrap_err();
        assert!(matches!(err, AppError::Session(_)));
        assert!(store.is_active());
    }
}
