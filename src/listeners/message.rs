use std::fmt::Display;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::listeners::{AnyListener, Listener, ListenerId};
use crate::net::{Method, Request, Response};

/// Which side of the exchange a listener watches.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    Request,
    Response,
}

/// A message that listeners can intercept.
///
/// Ties a message type to its [`MessageKind`] and to the matching variant of
/// [`AnyListener`], so the registry can dispatch on the runtime tag.
pub trait Message: Sized + 'static {
    const KIND: MessageKind;

    /// Returns the listener if it watches this message kind.
    fn select(listener: &AnyListener) -> Option<&Listener<Self>>;

    /// Diagnostic summary of the message.
    fn snapshot(&self) -> MessageSnapshot;
}

impl Message for Request {
    const KIND: MessageKind = MessageKind::Request;

    fn select(listener: &AnyListener) -> Option<&Listener<Self>> {
        match listener {
            AnyListener::Request(l) => Some(l),
            AnyListener::Response(_) => None,
        }
    }

    fn snapshot(&self) -> MessageSnapshot {
        MessageSnapshot {
            kind: MessageKind::Request,
            url: self.url.clone(),
            header_names: self.headers.names().map(str::to_string).collect(),
            cookie_names: self.cookies.keys().cloned().collect(),
            method: Some(self.method),
            status: None,
            body_size: self.body.len(),
            redirects: Some(self.redirects),
            timeout: Some(self.timeout),
        }
    }
}

impl Message for Response {
    const KIND: MessageKind = MessageKind::Response;

    fn select(listener: &AnyListener) -> Option<&Listener<Self>> {
        match listener {
            AnyListener::Response(l) => Some(l),
            AnyListener::Request(_) => None,
        }
    }

    fn snapshot(&self) -> MessageSnapshot {
        MessageSnapshot {
            kind: MessageKind::Response,
            url: self.url.clone(),
            header_names: self.headers.names().map(str::to_string).collect(),
            cookie_names: self.cookies.keys().cloned().collect(),
            method: None,
            status: Some(self.status),
            body_size: self.body.len(),
            redirects: None,
            timeout: None,
        }
    }
}

/// What a cancelled message looked like, for diagnostics.
///
/// Request-only fields (`method`, `redirects`, `timeout`) are `None` for
/// responses, and `status` is `None` for requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSnapshot {
    pub kind: MessageKind,
    pub url: String,
    pub header_names: Vec<String>,
    pub cookie_names: Vec<String>,
    pub method: Option<Method>,
    pub status: Option<u16>,
    pub body_size: usize,
    pub redirects: Option<bool>,
    pub timeout: Option<Duration>,
}

/// A send stopped by a qualifying listener with `cancel` set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cancellation {
    pub listener_id: ListenerId,
    pub tag: String,
    pub message: MessageSnapshot,
}

impl Cancellation {
    pub fn new<M: Message>(listener: &Listener<M>, message: &M) -> Self {
        Self {
            listener_id: listener.id,
            tag: listener.tag.clone(),
            message: message.snapshot(),
        }
    }
}

impl Display for Cancellation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.message.kind {
            MessageKind::Request => "request",
            MessageKind::Response => "response",
        };
        write!(
            f,
            "{} to {} cancelled by listener {} (tag '{}')",
            kind, self.message.url, self.listener_id, self.tag
        )
    }
}
