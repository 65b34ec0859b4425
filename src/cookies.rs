//! Cookies: the [`CookieStore`] trait, its backends and `Set-Cookie` parsing.

mod cookies;
mod store;

pub use cookies::parse_set_cookie;
pub use cookies::site_of;
pub use cookies::CookieStoreHandle;
pub use cookies::Cookies;

pub use store::default_cookie_store;
pub use store::CookieStore;
pub use store::InMemoryCookieStore;
pub use store::JsonCookieStore;
pub use store::NoopCookieStore;
