//! Interception rules: [`Listener`], [`AnyListener`] and the [`ListenerRegistry`].
//!
//! A listener watches exactly one kind of message (a [`Request`](crate::Request)
//! about to be sent, or a [`Response`](crate::Response) just received). When its
//! condition holds for a message it *qualifies*, and then it either cancels the
//! send or runs its action. Response listeners may also ask the client to send
//! the request again.
//!
//! # Example
//! ```no_run
//! use httpkit::{Client, Request, Response};
//! use httpkit::listeners::Listener;
//!
//! let client = Client::new();
//! client.listeners().write().unwrap().add(
//!     Listener::<Request>::new()
//!         .tag("block-ads")
//!         .when(|req| req.url.contains("ads."))
//!         .cancel(true),
//! );
//! client.listeners().write().unwrap().add(
//!     Listener::<Response>::new()
//!         .tag("log-errors")
//!         .when(|res| res.status >= 500)
//!         .action(|res| log::warn!("server error from {}", res.url)),
//! );
//! ```

mod listener;
mod message;
mod registry;

pub use listener::AnyListener;
pub use listener::Listener;
pub use listener::ListenerId;
pub use message::Cancellation;
pub use message::Message;
pub use message::MessageKind;
pub use message::MessageSnapshot;
pub use registry::ListenerHandle;
pub use registry::ListenerRegistry;
