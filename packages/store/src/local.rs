//! # localStorage-backed session persistence — browser side
//!
//! [`LocalStorage`] is the [`SessionStorage`] implementation used on the
//! **web platform**. The session is two flat string entries, so the
//! browser's synchronous `localStorage` is the right fit (no IndexedDB
//! machinery needed).
//!
//! A missing `window` or a denied storage (private browsing, quota) degrades
//! to "no durable session" rather than crashing: reads return `None`,
//! removes are best-effort, and writes report a [`StorageError`] the session
//! store logs and survives.

use crate::session::{SessionStorage, StorageError};

/// localStorage-backed SessionStorage for the web platform.
#[derive(Clone, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn backing() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl SessionStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::backing()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage =
            Self::backing().ok_or_else(|| StorageError("localStorage unavailable".into()))?;
        storage
            .set_item(key, value)
            .map_err(|err| StorageError(format!("{err:?}")))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::backing() {
            let _ = storage.remove_item(key);
        }
    }
}
