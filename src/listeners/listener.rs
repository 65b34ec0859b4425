use std::fmt::{Debug, Display};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::net::{Request, Response};

/// A unique identifier for a listener, represented as a UUID.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(Uuid);

impl ListenerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ListenerId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

type Condition<M> = Arc<dyn Fn(&M) -> bool + Send + Sync>;
type Action<M> = Arc<dyn Fn(&M) + Send + Sync>;

/// An interception rule for messages of type `M`.
///
/// By default a listener qualifies for every message and does nothing.
pub struct Listener<M> {
    pub id: ListenerId,
    pub tag: String,
    condition: Condition<M>,
    action: Action<M>,
    /// Abort the send instead of running the action
    pub cancel: bool,
    /// Resend the request after the action ran (response listeners only)
    pub retry_after_action: bool,
}

impl<M: 'static> Listener<M> {
    pub fn new() -> Self {
        Self {
            id: ListenerId::new(),
            tag: String::new(),
            condition: Arc::new(|_: &M| true),
            action: Arc::new(|_: &M| {}),
            cancel: false,
            retry_after_action: false,
        }
    }

    pub fn id(mut self, id: ListenerId) -> Self {
        self.id = id;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Sets the qualification predicate.
    pub fn when<F>(mut self, condition: F) -> Self
    where
        F: Fn(&M) -> bool + Send + Sync + 'static,
    {
        self.condition = Arc::new(condition);
        self
    }

    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&M) + Send + Sync + 'static,
    {
        self.action = Arc::new(action);
        self
    }

    pub fn cancel(mut self, cancel: bool) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn retry_after_action(mut self, retry: bool) -> Self {
        self.retry_after_action = retry;
        self
    }

    pub fn qualifies(&self, message: &M) -> bool {
        (self.condition)(message)
    }

    pub fn run(&self, message: &M) {
        (self.action)(message)
    }
}

impl<M: 'static> Default for Listener<M> {
    fn default() -> Self {
        Self::new()
    }
}

// Manual impl: `M` itself does not need to be `Clone`.
impl<M> Clone for Listener<M> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            tag: self.tag.clone(),
            condition: self.condition.clone(),
            action: self.action.clone(),
            cancel: self.cancel,
            retry_after_action: self.retry_after_action,
        }
    }
}

impl<M> Debug for Listener<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .field("cancel", &self.cancel)
            .field("retry_after_action", &self.retry_after_action)
            .finish_non_exhaustive()
    }
}

/// A listener of either message kind, as kept in the registry.
#[derive(Debug, Clone)]
pub enum AnyListener {
    Request(Listener<Request>),
    Response(Listener<Response>),
}

impl AnyListener {
    pub fn id(&self) -> ListenerId {
        match self {
            AnyListener::Request(l) => l.id,
            AnyListener::Response(l) => l.id,
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            AnyListener::Request(l) => &l.tag,
            AnyListener::Response(l) => &l.tag,
        }
    }
}

impl From<Listener<Request>> for AnyListener {
    fn from(listener: Listener<Request>) -> Self {
        AnyListener::Request(listener)
    }
}

impl From<Listener<Response>> for AnyListener {
    fn from(listener: Listener<Response>) -> Self {
        AnyListener::Response(listener)
    }
}
