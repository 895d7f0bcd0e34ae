use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

// 1. KeyValueStore Contract
/// KeyValueStore
///
/// The persistent client-side key-value storage the auth check reads from.
/// Navigation only ever reads; writers (login, logout) live outside this crate
/// and talk to the concrete stores directly.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value for `key`, if any.
    fn get_item(&self, key: &str) -> Option<String>;
}

// 2. In-Memory Store
/// MemoryStorage
///
/// A process-local store with browser-storage semantics: string keys, string
/// values, last write wins. Used by embedders driving a `Navigator` directly
/// and throughout the tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_item(&self, key: &str, value: &str) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    pub fn remove_item(&self, key: &str) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    pub fn clear(&self) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

// 3. Cookie-Backed Store
/// CookieStorage
///
/// A read-only view over the cookies sent with an HTTP request. On the server
/// this is what stands in for the browser's persistent storage. Values are
/// returned with surrounding double quotes removed, so `name=""` reads as empty.
#[derive(Debug, Clone)]
pub struct CookieStorage {
    jar: CookieJar,
}

impl CookieStorage {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            jar: CookieJar::from_headers(headers),
        }
    }
}

impl KeyValueStore for CookieStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.jar.get(key).map(Cookie::value_trimmed).map(str::to_string)
    }
}
