//! Cookie store infrastructure.
//!
//! A **cookie store** keeps one bucket of cookies per site and is consulted by
//! the client before every send (to merge stored cookies into the request) and
//! after every response (to persist `Set-Cookie` updates).
//!
//! This module exports three implementations:
//! - [`InMemoryCookieStore`]: process-local map, the default.
//! - [`NoopCookieStore`]: forgets everything, useful for stateless clients and tests.
//! - [`JsonCookieStore`]: in-memory map mirrored to a JSON file after each mutation.
//!
//! Unless a client is given its own store, all clients share the lazily created
//! instance returned by [`default_cookie_store`].
//!
//! ## Concurrency
//! Implementations are internally synchronized, but the client performs a
//! read-merge-write sequence per send. Two concurrent sends to the same site may
//! interleave and the last writer wins.
mod in_memory;
mod json;
mod noop;

use std::sync::Arc;

use lazy_static::lazy_static;

use crate::cookies::{CookieStoreHandle, Cookies};

pub use in_memory::InMemoryCookieStore;
pub use json::JsonCookieStore;
pub use noop::NoopCookieStore;

lazy_static! {
    static ref DEFAULT_COOKIE_STORE: CookieStoreHandle = Arc::new(InMemoryCookieStore::new());
}

/// Returns the process-wide in-memory store shared by clients built without an explicit store.
pub fn default_cookie_store() -> CookieStoreHandle {
    DEFAULT_COOKIE_STORE.clone()
}

/// A per-site cookie map.
///
/// Implementations must be `Send + Sync` and safe for concurrent use.
pub trait CookieStore: Send + Sync {
    /// Merges `cookies` into the bucket of `site`, creating the bucket when absent.
    ///
    /// Existing names are overwritten (last write wins).
    fn set(&self, site: &str, cookies: &Cookies);

    /// Returns a copy of the bucket of `site`, or an empty map.
    fn get(&self, site: &str) -> Cookies;

    /// Deletes the named cookies from the bucket of `site`, if that bucket exists.
    fn remove(&self, site: &str, names: &[String]);

    /// Drops every bucket.
    fn clear(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_store_is_shared() {
        let a = default_cookie_store();
        let b = default_cookie_store();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
