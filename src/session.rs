//! Session State
//!
//! Auth state is three plain strings in a key/value store: token, username and role.
//! A stored token means "logged in"; there is no expiry. A stale token only shows up
//! when an authenticated request fails.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use crate::config::SessionConfig;
use crate::error::{DashboardError, DashboardResult};

/// The logged-in user's session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub role: String,
}

/// Key/value store shaped like the Web Storage API
pub trait SessionStore {
    fn get_item(&self, key: &str) -> DashboardResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> DashboardResult<()>;
    /// Remove every key, not just ours
    fn clear(&self) -> DashboardResult<()>;
}

impl<S: SessionStore + ?Sized> SessionStore for Rc<S> {
    fn get_item(&self, key: &str) -> DashboardResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> DashboardResult<()> {
        (**self).set_item(key, value)
    }

    fn clear(&self) -> DashboardResult<()> {
        (**self).clear()
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    fn get_item(&self, key: &str) -> DashboardResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> DashboardResult<()> {
        (**self).set_item(key, value)
    }

    fn clear(&self) -> DashboardResult<()> {
        (**self).clear()
    }
}

/// Process-local store, lost on exit
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> DashboardResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.items
            .lock()
            .map_err(|e| DashboardError::Storage(format!("lock poisoned: {}", e)))
    }
}

impl SessionStore for MemoryStorage {
    fn get_item(&self, key: &str) -> DashboardResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> DashboardResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self) -> DashboardResult<()> {
        self.lock()?.clear();
        Ok(())
    }
}

/// JSON file store, so a CLI session outlives one invocation
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

    fn read_all(&self) -> DashboardResult<HashMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(HashMap::new()),
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| DashboardError::Storage(format!("{:?}: {}", self.path, e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, items: &HashMap<String, String>) -> DashboardResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(items)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl SessionStore for FileStorage {
    fn get_item(&self, key: &str) -> DashboardResult<Option<String>> {
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> DashboardResult<()> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    fn clear(&self) -> DashboardResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Typed view over a [`SessionStore`] using the configured keys
#[derive(Debug, Clone)]
pub struct SessionState<S> {
    store: S,
    keys: SessionConfig,
}

impl<S: SessionStore> SessionState<S> {
    pub fn new(store: S, keys: SessionConfig) -> Self {
        Self { store, keys }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist a freshly issued session
    pub fn save(&self, session: &Session) -> DashboardResult<()> {
        self.store.set_item(&self.keys.token_key, &session.token)?;
        self.store.set_item(&self.keys.user_key, &session.username)?;
        self.store.set_item(&self.keys.role_key, &session.role)?;
        Ok(())
    }

    /// Drop all stored state
    pub fn clear(&self) -> DashboardResult<()> {
        self.store.clear()
    }

    pub fn token(&self) -> DashboardResult<Option<String>> {
        self.store.get_item(&self.keys.token_key)
    }

    pub fn username(&self) -> DashboardResult<Option<String>> {
        self.store.get_item(&self.keys.user_key)
    }

    pub fn role(&self) -> DashboardResult<Option<String>> {
        self.store.get_item(&self.keys.role_key)
    }

    /// The stored session, if a token is present
    pub fn current(&self) -> DashboardResult<Option<Session>> {
        let Some(token) = self.token()? else {
            return Ok(None);
        };
        Ok(Some(Session {
            token,
            username: self.username()?.unwrap_or_default(),
            role: self.role()?.unwrap_or_default(),
        }))
    }

    /// True iff a token is stored. Unreadable storage counts as logged out.
    pub fn is_logged_in(&self) -> bool {
        match self.token() {
            Ok(token) => token.is_some(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read session token");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            token: "tok-1".to_string(),
            username: "ikey".to_string(),
            role: "admin".to_string(),
        }
    }

    #[test]
    fn test_save_and_clear() {
        let state = SessionState::new(MemoryStorage::new(), SessionConfig::default());
        assert!(!state.is_logged_in());
        assert_eq!(state.current().unwrap(), None);

        state.save(&session()).unwrap();
        assert!(state.is_logged_in());
        assert_eq!(state.current().unwrap(), Some(session()));
        assert_eq!(
            state.store().get_item("AVALANCHE_USER").unwrap().as_deref(),
            Some("ikey")
        );

        state.clear().unwrap();
        assert!(!state.is_logged_in());
        assert_eq!(state.username().unwrap(), None);
    }

    #[test]
    fn test_clear_removes_foreign_keys() {
        let store = Rc::new(MemoryStorage::new());
        store.set_item("unrelated", "x").unwrap();
        let state = SessionState::new(Rc::clone(&store), SessionConfig::default());
        state.clear().unwrap();
        assert_eq!(store.get_item("unrelated").unwrap(), None);
    }

    #[test]
    fn test_file_storage_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let state = SessionState::new(FileStorage::new(&path), SessionConfig::default());
        state.save(&session()).unwrap();
        assert!(path.exists());

        let reopened = SessionState::new(FileStorage::new(&path), SessionConfig::default());
        assert_eq!(reopened.current().unwrap(), Some(session()));

        reopened.clear().unwrap();
        assert!(!path.exists());
        assert!(!reopened.is_logged_in());
        // Clearing twice is fine
        reopened.clear().unwrap();
    }

    #[test]
    fn test_file_storage_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let state = SessionState::new(FileStorage::new(&path), SessionConfig::default());
        assert!(matches!(state.token(), Err(DashboardError::Storage(_))));
        assert!(!state.is_logged_in());
    }
}
