use crate::cookies::{CookieStore, Cookies};

/// A store that never remembers anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCookieStore;

impl NoopCookieStore {
    pub fn new() -> Self {
        Self
    }
}

impl CookieStore for NoopCookieStore {
    fn set(&self, _site: &str, _cookies: &Cookies) {}

    fn get(&self, _site: &str) -> Cookies {
        Cookies::new()
    }

    fn remove(&self, _site: &str, _names: &[String]) {}

    fn clear(&self) {}
}
