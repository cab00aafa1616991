//! The stored API key.

use super::{LocalStore, StoreError};

const API_KEY_KEY: &str = "openai_api_key";

pub struct CredentialStore<'a> {
    store: &'a LocalStore,
}

impl<'a> CredentialStore<'a> {
    pub fn new(store: &'a LocalStore) -> Self {
        Self { store }
    }

    /// The saved key, ignoring blank values.
    pub fn api_key(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .store
            .get_item(API_KEY_KEY)?
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty()))
    }

    pub fn set_api_key(&self, key: &str) -> Result<(), StoreError> {
        self.store.set_item(API_KEY_KEY, key.trim())
    }

    pub fn clear_api_key(&self) -> Result<(), StoreError> {
        self.store.remove_item(API_KEY_KEY)
    }
}

/// Keeps the first and last four characters of a key visible.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 8), tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_key_lifecycle() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path());
        let credentials = CredentialStore::new(&store);

        assert_eq!(credentials.api_key().unwrap(), None);
        credentials.set_api_key("  sk-test-123456  ").unwrap();
        assert_eq!(credentials.api_key().unwrap().as_deref(), Some("sk-test-123456"));
        credentials.clear_api_key().unwrap();
        assert_eq!(credentials.api_key().unwrap(), None);
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path());
        store.set_item("openai_api_key", "   ").unwrap();
        assert_eq!(CredentialStore::new(&store).api_key().unwrap(), None);
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("sk-abcdefgh1234"), "sk-a*******1234");
        assert_eq!(mask_key("short"), "*****");
    }
}
