//! Request and response bodies.
//!
//! A request [`Body`] is a fully buffered byte payload tagged with its content
//! type and text encoding. Builders for URL-encoded forms and multipart forms
//! live in the submodules and finish with an explicit `build()`.
//!
//! A [`ResponseBody`] keeps the raw bytes and decodes them to text on first
//! access, using the charset announced by the server. Unknown or missing
//! charsets fall back to UTF-8.

mod form;
mod multipart;

use std::path::Path;
use std::sync::OnceLock;

use serde::Serialize;

use crate::errors::ParseError;
use crate::net::content_type;

pub use form::FormBuilder;
pub use multipart::{MultipartBuilder, MULTIPART_BOUNDARY};

const DEFAULT_ENCODING: &str = "utf-8";

/// Outgoing body of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    pub bytes: Vec<u8>,
    /// Media type sent as `Content-Type` unless the request sets one itself.
    pub content_type: String,
    pub encoding: String,
}

impl Default for Body {
    fn default() -> Self {
        Self::empty()
    }
}

impl Body {
    pub fn empty() -> Self {
        Self {
            bytes: Vec::new(),
            content_type: String::new(),
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::with_type(text.into().into_bytes(), content_type::TEXT_PLAIN)
    }

    pub fn xml(xml: impl Into<String>) -> Self {
        Self::with_type(xml.into().into_bytes(), content_type::APPLICATION_XML)
    }

    /// Serializes `value` with `serde_json`.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ParseError> {
        let bytes = serde_json::to_vec(value)?;
        Ok(Self::with_type(bytes, content_type::APPLICATION_JSON))
    }

    /// Raw bytes sent as `application/octet-stream`.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::with_type(bytes.into(), content_type::OCTET_STREAM)
    }

    /// Reads a whole file into memory.
    pub fn file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::bytes(bytes))
    }

    pub fn with_type(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `Content-Type` header value, with the charset appended for text payloads.
    pub(crate) fn content_type_header(&self) -> Option<String> {
        if self.content_type.is_empty() {
            return None;
        }
        if self.content_type.starts_with("text/") && !self.content_type.contains("charset") {
            return Some(format!("{}; charset={}", self.content_type, self.encoding));
        }
        Some(self.content_type.clone())
    }
}

/// Fully buffered body of a response.
#[derive(Debug, Clone, Default)]
pub struct ResponseBody {
    pub bytes: Vec<u8>,
    /// Media type without parameters, lower-cased (empty when the server sent none)
    pub content_type: String,
    /// Canonical name of the charset used by [`ResponseBody::text`]
    pub encoding: String,
    text: OnceLock<String>,
}

impl ResponseBody {
    /// Builds a body from raw bytes and the `Content-Type` header value, if any.
    pub fn new(bytes: Vec<u8>, content_type_header: Option<&str>) -> Self {
        let (content_type, charset) = content_type_header
            .map(content_type::split)
            .unwrap_or_default();

        let encoding = charset
            .and_then(|label| encoding_rs::Encoding::for_label(label.as_bytes()))
            .unwrap_or(encoding_rs::UTF_8);

        Self {
            bytes,
            content_type,
            encoding: encoding.name().to_string(),
            text: OnceLock::new(),
        }
    }

    /// Body decoded as text. Decoding happens once; malformed sequences are replaced.
    pub fn text(&self) -> &str {
        self.text.get_or_init(|| {
            let encoding = encoding_rs::Encoding::for_label(self.encoding.as_bytes())
                .unwrap_or(encoding_rs::UTF_8);
            let (text, _, _) = encoding.decode(&self.bytes);
            text.into_owned()
        })
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}
