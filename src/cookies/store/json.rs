//! JSON-backed cookie store.
//!
//! `JsonCookieStore` keeps **all sites'** cookies in memory and mirrors them to a
//! single JSON file on disk, so cookies survive process restarts.
//!
//! ### Design
//! - One file for all sites (`CookieStoreFile { sites: HashMap<String, Cookies> }`).
//! - Reads are served from memory; every mutation rewrites the whole file.
//!
//! ### I/O characteristics & caveats
//! - File writes are not atomic.
//! - Write failures after a mutation are logged and otherwise ignored: the
//!   in-memory state stays authoritative and the next successful write catches up.
//!   Call [`JsonCookieStore::persist`] to surface the error instead.
//!
//! ### Example
//! ```no_run
//! use std::sync::Arc;
//! use httpkit::Client;
//! use httpkit::cookies::JsonCookieStore;
//!
//! let store = JsonCookieStore::open("cookies.json").unwrap();
//! let client = Client::builder().cookie_store(Arc::new(store)).build();
//! ```
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::cookies::{CookieStore, Cookies};

/// On-disk representation of the store.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CookieStoreFile {
    sites: HashMap<String, Cookies>,
}

/// A JSON-based cookie store that persists cookies across sessions.
pub struct JsonCookieStore {
    /// Path to the JSON file where cookies are stored.
    path: PathBuf,

    /// Cookie buckets per site
    sites: RwLock<HashMap<String, Cookies>>,
}

impl JsonCookieStore {
    /// Opens the JSON cookie store at `path`.
    ///
    /// If the file does not exist, an empty structure is written to disk. A file
    /// that exists but cannot be parsed is an error.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();

        let sites = if path.exists() {
            load_file(&path)?.sites
        } else {
            save_file(&path, &CookieStoreFile::default())?;
            HashMap::new()
        };

        log::debug!("opened cookie store {} with {} site(s)", path.display(), sites.len());

        Ok(Self {
            path,
            sites: RwLock::new(sites),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the current state to disk.
    pub fn persist(&self) -> anyhow::Result<()> {
        let file = CookieStoreFile {
            sites: self
                .sites
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        };
        save_file(&self.path, &file)
    }

    fn persist_logged(&self) {
        if let Err(e) = self.persist() {
            log::warn!("cannot persist cookie store {}: {:#}", self.path.display(), e);
        }
    }
}

/// Loads and deserializes the full cookie store file.
fn load_file(path: &Path) -> anyhow::Result<CookieStoreFile> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading cookie store {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("parsing cookie store {}", path.display()))
}

/// Serializes and writes the full cookie store file (pretty-printed).
fn save_file(path: &Path, file: &CookieStoreFile) -> anyhow::Result<()> {
    let contents = serde_json::to_string_pretty(file)?;
    fs::write(path, contents).with_context(|| format!("writing cookie store {}", path.display()))
}

impl CookieStore for JsonCookieStore {
    fn set(&self, site: &str, cookies: &Cookies) {
        {
            let mut sites = self.sites.write().unwrap_or_else(PoisonError::into_inner);
            let bucket = sites.entry(site.to_string()).or_default();
            for (name, value) in cookies {
                bucket.insert(name.clone(), value.clone());
            }
        }
        self.persist_logged();
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
        {
            let mut sites = self.sites.write().unwrap_or_else(PoisonError::into_inner);
            match sites.get_mut(site) {
                Some(bucket) => bucket.retain(|name, _| !names.contains(name)),
                None => return,
            }
        }
        self.persist_logged();
    }

    fn clear(&self) {
        self.sites
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.persist_logged();
    }
}
