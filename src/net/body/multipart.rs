//! Fixed-boundary `multipart/form-data` encoding.
//!
//! The encoding is deliberately simple: every part carries only a
//! `Content-Disposition` header and the boundary never changes. Servers that
//! require a per-part `Content-Type` or a random boundary will not accept it.

use crate::net::content_type;
use crate::net::Body;

pub const MULTIPART_BOUNDARY: &str = "----HttpKitFormBoundary";

#[derive(Debug, Clone)]
struct Part {
    name: String,
    filename: Option<String>,
    data: Vec<u8>,
}

/// Builds a multipart form body with text and file parts.
#[derive(Debug, Clone, Default)]
pub struct MultipartBuilder {
    parts: Vec<Part>,
}

impl MultipartBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(Part {
            name: name.into(),
            filename: None,
            data: value.into().into_bytes(),
        });
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        self.parts.push(Part {
            name: name.into(),
            filename: Some(filename.into()),
            data: data.into(),
        });
        self
    }

    pub fn build(self) -> Body {
        let mut out = Vec::new();
        for part in &self.parts {
            out.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
            let disposition = match &part.filename {
                Some(filename) => format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\r\n",
                    part.name, filename
                ),
                None => format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name),
            };
            out.extend_from_slice(disposition.as_bytes());
            out.extend_from_slice(&part.data);
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(format!("--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());

        Body::with_type(
            out,
            format!("{}; boundary={}", content_type::MULTIPART_FORM_DATA, MULTIPART_BOUNDARY),
        )
    }
}
