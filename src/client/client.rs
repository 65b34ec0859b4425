//! Client handle and public send surface.
//!
//! A [`Client`] ties together a configuration, a cookie store, a listener
//! registry and a transport. It holds no per-request state, so one client can
//! be shared between threads.
//!
//! ## Example
//! ```no_run
//! use httpkit::{Client, Request};
//!
//! let client = Client::builder().user_agent("my-tool/0.1").build();
//! let response = client.send(Request::get("https://example.com/")).unwrap();
//! println!("{} {}", response.status, response.status_text());
//! ```
use std::sync::Arc;

use crate::client::ClientBuilder;
use crate::config::ClientConfig;
use crate::cookies::CookieStoreHandle;
use crate::errors::ClientError;
use crate::listeners::{Cancellation, ListenerHandle};
use crate::net::transport::Transport;
use crate::net::{Request, Response};

/// How a send ended when it did not fail.
#[derive(Debug)]
pub enum Outcome {
    /// The final response, after any retries and redirects.
    Response(Response),
    /// A qualifying listener with `cancel` set stopped the send.
    Cancelled(Cancellation),
}

impl Outcome {
    pub fn response(self) -> Option<Response> {
        match self {
            Outcome::Response(response) => Some(response),
            Outcome::Cancelled(_) => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled(_))
    }
}

pub struct Client {
    pub(super) config: ClientConfig,
    pub(super) cookie_store: CookieStoreHandle,
    pub(super) listeners: ListenerHandle,
    pub(super) transport: Arc<dyn Transport>,
}

impl Client {
    /// Client with the default configuration, the shared in-memory cookie store,
    /// an empty listener registry and the reqwest transport.
    pub fn new() -> Self {
        ClientBuilder::new().build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn cookie_store(&self) -> &CookieStoreHandle {
        &self.cookie_store
    }

    /// The listener registry. Lock it for writing to register listeners.
    pub fn listeners(&self) -> &ListenerHandle {
        &self.listeners
    }

    /// Sends `request` and returns the final response.
    ///
    /// A listener cancellation is reported as [`ClientError::Cancelled`]. Use
    /// [`Client::execute`] to receive it as an [`Outcome`] instead.
    pub fn send(&self, request: Request) -> Result<Response, ClientError> {
        match self.execute(request)? {
            Outcome::Response(response) => Ok(response),
            Outcome::Cancelled(cancellation) => Err(cancellation.into()),
        }
    }

    /// Sends a GET request to `url`.
    pub fn get(&self, url: impl Into<String>) -> Result<Response, ClientError> {
        self.send(Request::get(url))
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
