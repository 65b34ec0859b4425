//! Default transport over `reqwest::blocking`.
//!
//! Every call builds a fresh client with redirects disabled and idle pooling
//! turned off, so a send opens and closes its own connection. The request
//! timeout bounds connection establishment only.

use std::error::Error as StdError;
use std::io;

use crate::errors::ClientError;
use crate::net::transport::{RawResponse, Transport, WireRequest};

#[derive(Debug, Default, Clone, Copy)]
pub struct ReqwestTransport;

impl ReqwestTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: &WireRequest) -> Result<RawResponse, ClientError> {
        let client = reqwest::blocking::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .connect_timeout(request.timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(categorize)?;

        let mut builder = client.request(request.method.into(), request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let res = builder.send().map_err(categorize)?;

        let status = res.status().as_u16();
        let url = res.url().to_string();
        let headers = res
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
            .collect();

        // Note: a failed body read is reported as an empty body, not as an error
        let body = match res.bytes() {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                log::warn!("reading body of {} failed, using empty body: {}", url, e);
                Vec::new()
            }
        };

        Ok(RawResponse {
            status,
            url,
            headers,
            body,
        })
    }
}

/// Maps an I/O failure found in a reqwest error chain.
///
/// Connection and socket-level kinds get their own variants; anything else is
/// a generic I/O error.
fn categorize_io(kind: io::ErrorKind, message: String) -> ClientError {
    match kind {
        io::ErrorKind::TimedOut => ClientError::Timeout(message),
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::NotConnected => ClientError::ConnectionFailed(message),
        io::ErrorKind::BrokenPipe
        | io::ErrorKind::AddrInUse
        | io::ErrorKind::AddrNotAvailable
        | io::ErrorKind::UnexpectedEof => ClientError::Socket(message),
        _ => ClientError::Io(io::Error::new(kind, message)),
    }
}

fn sources(err: &reqwest::Error) -> impl Iterator<Item = &(dyn StdError + 'static)> {
    std::iter::successors(err.source(), |e| (*e).source())
}

fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    for cause in sources(err) {
        message.push_str(": ");
        message.push_str(&cause.to_string());
    }
    message
}

/// Maps a `reqwest::Error` onto the client error taxonomy.
fn categorize(err: reqwest::Error) -> ClientError {
    let message = describe(&err);

    if err.is_builder() {
        if sources(&err).any(|e| e.is::<http::Error>()) {
            return ClientError::Protocol(message);
        }
        return ClientError::MalformedUrl(message);
    }

    if err.is_timeout() {
        return ClientError::Timeout(message);
    }

    let io_kind = sources(&err)
        .find_map(|e| e.downcast_ref::<io::Error>())
        .map(io::Error::kind);

    if err.is_connect() {
        let lowered = message.to_ascii_lowercase();
        if lowered.contains("dns error") || lowered.contains("failed to lookup address") {
            return ClientError::HostUnresolved(message);
        }
        return match io_kind {
            Some(io::ErrorKind::TimedOut) => ClientError::Timeout(message),
            _ => ClientError::ConnectionFailed(message),
        };
    }

    if let Some(kind) = io_kind {
        return categorize_io(kind, message);
    }

    if err.is_request() || err.is_redirect() || err.is_decode() || err.is_body() {
        return ClientError::Protocol(message);
    }

    ClientError::Unknown(Box::new(err))
}
