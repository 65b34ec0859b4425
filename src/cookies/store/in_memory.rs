use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::cookies::{CookieStore, Cookies};

/// In-memory cookie store (no persistence).
#[derive(Default)]
pub struct InMemoryCookieStore {
    /// Cookie buckets per site
    sites: RwLock<HashMap<String, Cookies>>,
}

impl InMemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `sites`.
    pub fn with_sites(sites: HashMap<String, Cookies>) -> Self {
        Self {
            sites: RwLock::new(sites),
        }
    }

    /// Copy of every bucket, keyed by site.
    pub fn snapshot(&self) -> HashMap<String, Cookies> {
        self.sites
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CookieStore for InMemoryCookieStore {
    fn set(&self, site: &str, cookies: &Cookies) {
        let mut sites = self.sites.write().unwrap_or_else(PoisonError::into_inner);
        let bucket = sites.entry(site.to_string()).or_default();
        for (name, value) in cookies {
            bucket.insert(name.clone(), value.clone());
        }
    }

    fn get(&self, site: &str) -> Cookies {
        self.sites
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(site)
            .cloned()
            .unwrap_or_default()
    }

    fn remove(&self, site: &str, names: &[String]) {
        let mut sites = self.sites.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(bucket) = sites.get_mut(site) {
            bucket.retain(|name, _| !names.contains(name));
        }
    }

    fn clear(&self) {
        self.sites
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
