//! Session
//!
//! Process-wide login state backed by persistent key-value storage.
//! The token is written at login and removed at logout; everything else
//! only reads it.

use std::sync::Arc;

use crate::models::ComponentKind;

/// Key of the last selected group detail tab
const LAST_TAB_KEY: &str = "desa_prima.last_tab";

/// Minimal storage contract, satisfied by `localStorage` and by a map in tests
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Browser `localStorage`. Silently inert when storage is unavailable
/// (private mode, non-browser targets).
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(key, value).is_err() {
                log::warn!("[Session] Could not persist {}", key);
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
    token_key: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token_key", &self.token_key)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl Session {
    pub fn new(store: impl KeyValueStore + 'static, token_key: impl Into<String>) -> Self {
        Self {
            store: Arc::new(store),
            token_key: token_key.into(),
        }
    }

    pub fn browser(token_key: impl Into<String>) -> Self {
        Self::new(BrowserStorage, token_key)
    }

    pub fn token(&self) -> Option<String> {
        self.store
            .get(&self.token_key)
            .filter(|token| !token.trim().is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Login
    pub fn set_token(&self, token: &str) {
        self.store.set(&self.token_key, token.trim());
    }

    /// Logout
    pub fn clear(&self) {
        self.store.remove(&self.token_key);
        self.store.remove(LAST_TAB_KEY);
    }

    pub fn last_tab(&self) -> Option<ComponentKind> {
        self.store
            .get(LAST_TAB_KEY)
            .and_then(|value| ComponentKind::from_resource(&value))
    }

    pub fn set_last_tab(&self, tab: ComponentKind) {
        self.store.set(LAST_TAB_KEY, tab.resource());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory storage
    #[derive(Clone, Debug, Default)]
    struct MemoryStorage {
        entries: Arc<Mutex<HashMap<String, String>>>,
    }

    impl KeyValueStore for MemoryStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.lock().ok()?.get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            if let Ok(mut entries) = self.entries.lock() {
                entries.insert(key.to_string(), value.to_string());
            }
        }

        fn remove(&self, key: &str) {
            if let Ok(mut entries) = self.entries.lock() {
                entries.remove(key);
            }
        }
    }

    #[test]
    fn test_login_logout_lifecycle() {
        let session = Session::new(MemoryStorage::default(), "token");
        assert!(!session.is_authenticated());

        session.set_token(" abc.def.ghi ");
        assert_eq!(session.token().as_deref(), Some("abc.def.ghi"));

        session.set_last_tab(ComponentKind::Kas);
        session.clear();
        assert!(session.token().is_none());
        assert!(session.last_tab().is_none());
    }

    #[test]
    fn test_blank_token_is_not_a_session() {
        let storage = MemoryStorage::default();
        storage.set("token", "   ");
        let session = Session::new(storage, "token");
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_last_tab_round_trip_and_garbage() {
        let storage = MemoryStorage::default();
        let session = Session::new(storage.clone(), "token");
        session.set_last_tab(ComponentKind::Kegiatan);
        assert_eq!(session.last_tab(), Some(ComponentKind::Kegiatan));

        storage.set(LAST_TAB_KEY, "tidak-ada");
        assert_eq!(session.last_tab(), None);
    }
}
