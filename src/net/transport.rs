//! Transport adapter: the seam between the client pipeline and the network.
//!
//! The pipeline turns a [`Request`] into a [`WireRequest`] (everything the
//! network call needs, already serialized) and hands it to a [`Transport`]. The
//! transport returns the [`RawResponse`] exactly as received, or a typed
//! [`ClientError`]. It must not retry or follow redirects on its own.
//!
//! [`ReqwestTransport`] is the default implementation.

mod reqwest_transport;

use std::time::Duration;

use crate::errors::ClientError;
use crate::net::{Method, Request};

pub use reqwest_transport::ReqwestTransport;

/// Performs one blocking HTTP round trip.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &WireRequest) -> Result<RawResponse, ClientError>;
}

/// Any thread-safe closure with the right signature is a transport.
impl<F> Transport for F
where
    F: Fn(&WireRequest) -> Result<RawResponse, ClientError> + Send + Sync,
{
    fn execute(&self, request: &WireRequest) -> Result<RawResponse, ClientError> {
        self(request)
    }
}

/// A request ready to be written to the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireRequest {
    pub method: Method,
    /// URL including the appended query string.
    pub url: String,
    /// Header lines in sending order, including `Cookie` and `User-Agent`.
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
    /// Body bytes. `None` for empty bodies and HEAD requests.
    pub body: Option<Vec<u8>>,
}

impl WireRequest {
    /// Serializes `request` for the wire.
    ///
    /// - headers are copied verbatim, in order,
    /// - `User-Agent` is added from `user_agent` unless the request has one,
    /// - the cookies become one `Cookie: a=1; b=2` header,
    /// - `Content-Type` comes from the body unless the request has one,
    /// - the body is written only when non-empty and the method is not HEAD.
    pub fn assemble(request: &Request, user_agent: &str) -> Self {
        let mut headers: Vec<(String, String)> = request
            .headers
            .iter()
            .flat_map(|(name, values)| values.iter().map(move |v| (name.to_string(), v.clone())))
            .collect();

        if !request.headers.contains("user-agent") && !user_agent.is_empty() {
            headers.push(("User-Agent".to_string(), user_agent.to_string()));
        }

        if !request.cookies.is_empty() {
            let cookie = request
                .cookies
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("; ");
            headers.push(("Cookie".to_string(), cookie));
        }

        let send_body = !request.body.is_empty() && request.method != Method::Head;
        if send_body && !request.headers.contains("content-type") {
            if let Some(content_type) = request.body.content_type_header() {
                headers.push(("Content-Type".to_string(), content_type));
            }
        }

        Self {
            method: request.method,
            url: request.url_with_query(),
            headers,
            timeout: request.timeout,
            body: send_body.then(|| request.body.bytes.clone()),
        }
    }

    /// First value of header `name`, case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// What the transport received, before any normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// Final URL as reported by the transport
    pub url: String,
    /// Header lines as received, one entry per value
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}
