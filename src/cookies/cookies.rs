//! Cookie core types.
//!
//! Cookies are plain `name -> value` pairs bucketed per **site**, where the
//! site is the lower-cased host of the request URL. Scheme and port are not
//! part of the key, so `http://example.com` and `https://example.com:8443`
//! share their cookies.
//!
//! Attributes such as `Path`, `Domain` or `Expires` are not tracked. Only the
//! leading `name=value` pair of a `Set-Cookie` header is kept, and an empty value
//! means the cookie should be dropped.

use std::collections::BTreeMap;
use std::sync::Arc;

use url::Url;

use crate::cookies::CookieStore;
use crate::errors::ClientError;

/// Cookie name to value mapping.
pub type Cookies = BTreeMap<String, String>;

/// A handle to a cookie store trait.
///
/// Store implementations must be **`Send + Sync` and internally synchronized**,
/// since callers hold only `&self` when invoking trait methods.
pub type CookieStoreHandle = Arc<dyn CookieStore + Send + Sync>;

/// Returns the cookie partition key for `url`: its host, lower-cased.
pub fn site_of(url: &str) -> Result<String, ClientError> {
    let parsed = Url::parse(url).map_err(|e| ClientError::MalformedUrl(format!("{}: {}", url, e)))?;
    parsed
        .host_str()
        .map(|host| host.to_ascii_lowercase())
        .ok_or_else(|| ClientError::MalformedUrl(format!("{}: URL has no host", url)))
}

/// Extracts the leading `name=value` pair of a `Set-Cookie` header value.
///
/// Returns `None` when the first `;`-separated segment does not split into exactly
/// two parts on `=`, or when the name is blank (`=value`). An empty value is
/// returned as-is: it marks a removal.
pub fn parse_set_cookie(header: &str) -> Option<(String, String)> {
    let first = header.split(';').next()?;
    let parts: Vec<&str> = first.split('=').collect();
    match parts.as_slice() {
        [name, value] if !name.trim().is_empty() => {
            Some((name.trim().to_string(), value.trim().to_string()))
        }
        _ => None,
    }
}
