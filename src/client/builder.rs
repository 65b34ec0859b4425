use std::sync::Arc;

use crate::client::Client;
use crate::config::ClientConfig;
use crate::cookies::{default_cookie_store, CookieStoreHandle};
use crate::listeners::{ListenerHandle, ListenerRegistry};
use crate::net::transport::{ReqwestTransport, Transport};

pub struct ClientBuilder {
    config: ClientConfig,
    cookie_store: Option<CookieStoreHandle>,
    listeners: Option<ListenerHandle>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            cookie_store: None,
            listeners: None,
            transport: None,
        }
    }

    pub fn config(mut self, cfg: ClientConfig) -> Self {
        self.config = cfg;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn max_redirects(mut self, max: usize) -> Self {
        self.config.max_redirects = Some(max);
        self
    }

    pub fn max_retries(mut self, max: usize) -> Self {
        self.config.max_retries = Some(max);
        self
    }

    /// Store used instead of the process-wide default.
    pub fn cookie_store(mut self, store: CookieStoreHandle) -> Self {
        self.cookie_store = Some(store);
        self
    }

    /// Registry shared with the caller. A fresh, empty one is created otherwise.
    pub fn listeners(mut self, listeners: ListenerHandle) -> Self {
        self.listeners = Some(listeners);
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Client {
        Client {
            config: self.config,
            cookie_store: self.cookie_store.unwrap_or_else(default_cookie_store),
            listeners: self
                .listeners
                .unwrap_or_else(|| ListenerRegistry::new().into_handle()),
            transport: self
                .transport
                .unwrap_or_else(|| Arc::new(ReqwestTransport::new())),
        }
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
