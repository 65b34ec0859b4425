//! A blocking HTTP client with a pluggable cookie store, listener-based
//! request/response interception, retries and redirect handling.
//!
//! ```no_run
//! use httpkit::listeners::Listener;
//! use httpkit::{Client, Request, Response};
//!
//! let client = Client::new();
//! client.listeners().write().unwrap().add(
//!     Listener::<Response>::new()
//!         .when(|r: &Response| r.status == 503)
//!         .retry_after_action(true),
//! );
//!
//! let response = client.send(Request::get("https://example.com/")).unwrap();
//! let title = response.html().unwrap().title();
//! ```

pub mod client;
pub mod config;
pub mod cookies;
pub mod errors;
pub mod listeners;
pub mod logging;
pub mod net;
pub mod parse;

#[cfg(test)]
mod test_utils;

pub use client::{Client, ClientBuilder, Outcome};
pub use config::ClientConfig;
pub use errors::{ClientError, ParseError};
pub use net::{Body, Headers, Method, Request, RequestBuilder, Response};
pub use parse::{parse_html, parse_json_to_list, parse_json_to_map};
