//! The HTTP client: [`Client`], its [`ClientBuilder`] and the send pipeline.

mod builder;
mod client;
mod pipeline;
mod redirect;

pub use builder::ClientBuilder;
pub use client::Client;
pub use client::Outcome;
