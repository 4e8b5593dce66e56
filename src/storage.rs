//! Key-value persistence seam.
//!
//! `KeyValueStore` mirrors the synchronous string store the browser exposes
//! as `window.localStorage`. `BrowserStore` is the real adapter;
//! `MemoryStore` backs the native tests and doubles as the runtime fallback
//! when storage access is denied, keeping the game playable for the lifetime
//! of the page.

use std::cell::RefCell;
use std::collections::HashMap;

/// Synchronous, string-keyed durable store, shaped like `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store. Used in tests and as the degraded mode when the browser
/// blocks `localStorage` (private browsing, sandboxed iframe).
#[derive(Default)]
pub struct MemoryStore {
    map: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.map
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.map.borrow_mut().remove(key);
    }
}

/// `localStorage` adapter.
pub struct BrowserStore {
    storage: web_sys::Storage,
}

impl BrowserStore {
    /// Returns `None` when the browser denies storage access; callers fall
    /// back to a [`MemoryStore`].
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        // A quota error is not fatal; the current page keeps its in-memory
        // view and simply loses durability for this write.
        if self.storage.set_item(key, value).is_err() {
            web_sys::console::warn_1(&format!("failed to persist '{key}'").into());
        }
    }

    fn remove(&self, key: &str) {
        let _ = self.storage.remove_item(key);
    }
}
