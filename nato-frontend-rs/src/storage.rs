//! The key-value settings store the session persists itself into.
//!
//! Production uses the browser's `localStorage`; tests use an in-memory map.
//! Writes are best effort: a failed write is logged and otherwise ignored,
//! since the worst case is stale persisted state, recoverable via full reset.

pub(crate) trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// `localStorage`, when the browser grants access to it.
pub(crate) struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// `None` outside a browser window or when storage access is denied.
    pub(crate) fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

impl SettingsStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if self.storage.set_item(key, value).is_err() {
            log::warn!("failed to persist {key:?}; continuing with in-memory state");
        }
    }

    fn remove(&mut self, key: &str) {
        if self.storage.remove_item(key).is_err() {
            log::warn!("failed to remove persisted {key:?}");
        }
    }
}

/// A missing store (storage unavailable) reads nothing and drops writes, so
/// the session still runs, just without persistence.
impl<S: SettingsStore> SettingsStore for Option<S> {
    fn get(&self, key: &str) -> Option<String> {
        self.as_ref().and_then(|store| store.get(key))
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(store) = self {
            store.set(key, value);
        }
    }

    fn remove(&mut self, key: &str) {
        if let Some(store) = self {
            store.remove(key);
        }
    }
}
