//! Local key/value storage.
//!
//! Each key is one file under the store root. The values are the same JSON
//! strings a browser would keep in local storage, so saved projects and the
//! API key survive between runs.

mod credentials;
mod projects;

pub use credentials::{mask_key, CredentialStore};
pub use projects::{ProjectDraft, ProjectStore};

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No platform data directory available; set general.data_dir in the config")]
    NoDataDir,

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Stored value for {key} is not valid JSON: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No saved project matches {0:?}")]
    ProjectNotFound(String),
}

/// Directory-backed string store.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Opens a store rooted at `root`. The directory is created on first write.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<data dir>/seolens`, or `override_root` when given.
    pub fn open_default(override_root: Option<&Path>) -> Result<Self, StoreError> {
        match override_root {
            Some(root) => Ok(Self::open(root)),
            None => {
                let base = dirs::data_dir().ok_or(StoreError::NoDataDir)?;
                Ok(Self::open(base.join("seolens")))
            }
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;
        std::fs::write(&path, value).map_err(|source| StoreError::Io { path: path.clone(), source })?;
        debug!("Stored {} ({} bytes)", path.display(), value.len());
        Ok(())
    }

    /// Removing a missing key is not an error.
    pub fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_missing_key() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path());
        assert_eq!(store.get_item("nothing-here").unwrap(), None);
    }

    #[test]
    fn test_set_get_remove() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path().join("nested"));
        store.set_item("greeting", "hello").unwrap();
        assert_eq!(store.get_item("greeting").unwrap().as_deref(), Some("hello"));

        store.remove_item("greeting").unwrap();
        assert_eq!(store.get_item("greeting").unwrap(), None);
        store.remove_item("greeting").unwrap();
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path());
        assert!(matches!(store.get_item("../escape"), Err(StoreError::InvalidKey(_))));
        assert!(matches!(store.set_item("", "x"), Err(StoreError::InvalidKey(_))));
    }

    #[test]
    fn test_open_default_honours_override() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open_default(Some(dir.path())).unwrap();
        assert_eq!(store.root(), dir.path());
    }
}
