//! HTTP response model.
//!
//! This struct represents a **fully buffered** HTTP response as handed to
//! listeners and returned to callers. It is assembled from the transport's
//! [`RawResponse`] by [`Response::from_raw`], which normalizes the data:
//!
//! - the final URL is lower-cased,
//! - header names are lower-cased,
//! - cookies are extracted from `Set-Cookie` (see [`parse_set_cookie`]) and
//!   their names lower-cased,
//! - the body charset comes from `Content-Type`, falling back to UTF-8.
//!
//! For text responses use [`Response::text`]; for JSON, [`Response::json`] or
//! the map/list helpers; for HTML, [`Response::html`].
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::cookies::{parse_set_cookie, Cookies};
use crate::errors::ParseError;
use crate::net::transport::RawResponse;
use crate::net::{Headers, ResponseBody};
use crate::parse::{self, Document};

/// Simple structure for HTTP responses.
#[derive(Debug, Clone)]
pub struct Response {
    /// Numeric HTTP status code (e.g., `200`, `404`).
    pub status: u16,

    /// Final URL of the response, lower-cased.
    pub url: String,

    /// Response headers with lower-cased names.
    pub headers: Headers,

    /// Cookies announced by `Set-Cookie`. An empty value marks a removal.
    pub cookies: Cookies,

    /// Raw and decoded body.
    pub body: ResponseBody,
}

/// Cookie changes carried by a response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieUpdates {
    /// Cookies to store
    pub set: Cookies,
    /// Cookie names to drop
    pub removed: Vec<String>,
}

impl Response {
    /// Assembles a response from what the transport received.
    pub fn from_raw(raw: RawResponse) -> Self {
        let headers = Headers::lowercased(raw.headers);

        let cookies = headers
            .get("set-cookie")
            .unwrap_or_default()
            .iter()
            .filter_map(|value| parse_set_cookie(value))
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();

        let body = ResponseBody::new(raw.body, headers.first("content-type"));

        Self {
            status: raw.status,
            url: raw.url.to_lowercase(),
            headers,
            cookies,
            body,
        }
    }

    /// Human-readable reason phrase (e.g., `"OK"`), or `"Unknown"` for non-standard codes.
    pub fn status_text(&self) -> &'static str {
        http::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("Unknown")
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }

    /// First `Location` header value, if any.
    pub fn location(&self) -> Option<&str> {
        self.headers.first("location")
    }

    pub fn text(&self) -> &str {
        self.body.text()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.body.bytes
    }

    /// Deserializes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ParseError> {
        Ok(serde_json::from_slice(&self.body.bytes)?)
    }

    pub fn json_map(&self) -> Result<Map<String, Value>, ParseError> {
        parse::parse_json_to_map(self.text())
    }

    pub fn json_list(&self) -> Result<Vec<Value>, ParseError> {
        parse::parse_json_to_list(self.text())
    }

    pub fn html(&self) -> Result<Document, ParseError> {
        parse::parse_html(self.text())
    }

    /// Splits the response cookies into values to store and names to remove.
    pub fn cookie_updates(&self) -> CookieUpdates {
        let mut updates = CookieUpdates::default();
        for (name, value) in &self.cookies {
            if value.is_empty() {
                updates.removed.push(name.clone());
            } else {
                updates.set.insert(name.clone(), value.clone());
            }
        }
        updates
    }
}
