use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

use crate::modules::auth::model::Session;

#[derive(Error, Debug)]
pub enum SessionStoreError {
    #[error("Session file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Corrupt session file: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Where the session lives between calls. Implementations must not cache:
/// every `load` reflects the latest `save`, including ones made by another
/// process sharing the same backing file.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Session, SessionStoreError>;

    fn save(&self, session: &Session) -> Result<(), SessionStoreError>;

    /// Drops the token and keeps the rest of the profile.
    fn invalidate(&self) -> Result<(), SessionStoreError> {
        let mut session = self.load()?;
        if session.token.take().is_some() {
            self.save(&session)?;
        }
        Ok(())
    }

    /// Logout: forgets everything.
    fn clear(&self) -> Result<(), SessionStoreError> {
        self.save(&Session::default())
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<Session>,
}

impl MemorySessionStore {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Session, SessionStoreError> {
        let guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }

    fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *guard = session.clone();
        Ok(())
    }
}

/// JSON file on disk; read on every `load`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Session, SessionStoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Session::default()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Session::default());
        }

        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write-then-rename so a concurrent reader never sees half a file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(session)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logged_in() -> Session {
        Session {
            token: Some("abc".to_string()),
            email: Some("kim@example.com".to_string()),
            username: Some("kim".to_string()),
            user_id: Some("u1".to_string()),
            style_profile: None,
        }
    }

    #[test]
    fn memory_store_invalidate_keeps_profile() {
        let store = MemorySessionStore::new(logged_in());
        store.invalidate().unwrap();

        let session = store.load().unwrap();
        assert_eq!(session.token, None);
        assert_eq!(session.email.as_deref(), Some("kim@example.com"));
    }

    #[test]
    fn memory_store_clear_forgets_everything() {
        let store = MemorySessionStore::new(logged_in());
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), Session::default());
    }

    #[test]
    fn file_store_missing_file_is_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));
        assert_eq!(store.load().unwrap(), Session::default());
    }

    #[test]
    fn file_store_sees_external_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::new(&path);
        store.save(&logged_in()).unwrap();

        // Another process logs out.
        let other = FileSessionStore::new(&path);
        other.invalidate().unwrap();

        assert!(!store.load().unwrap().is_authenticated());
    }

    #[test]
    fn file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let err = FileSessionStore::new(&path).load().unwrap_err();
        assert!(matches!(err, SessionStoreError::Serde(_)));
    }
}
