//! Outgoing request model.
//!
//! A [`Request`] is a plain value: the client mutates its `cookies` while sending
//! (they are replaced with the merge of the cookie store and the request's own
//! cookies) but never pools or reuses it afterwards.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::DEFAULT_TIMEOUT;
use crate::cookies::Cookies;
use crate::net::{Body, Headers, Method};

/// Query parameters appended to the URL at send time.
pub type Query = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    /// Headers as supplied by the caller, sent verbatim.
    pub headers: Headers,
    /// Cookies for this request. Overwritten at send time with the store merge.
    pub cookies: Cookies,
    pub body: Body,
    pub query: Query,
    pub method: Method,
    /// Follow 3xx responses automatically
    pub redirects: bool,
    /// Connection-establishment timeout
    pub timeout: Duration,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Headers::new(),
            cookies: Cookies::new(),
            body: Body::empty(),
            query: Query::new(),
            method,
            redirects: true,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn builder(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder {
            request: Request::new(Method::Get, url),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn head(url: impl Into<String>) -> Self {
        Self::new(Method::Head, url)
    }

    pub fn post(url: impl Into<String>, body: Body) -> Self {
        Self {
            body,
            ..Self::new(Method::Post, url)
        }
    }

    pub fn put(url: impl Into<String>, body: Body) -> Self {
        Self {
            body,
            ..Self::new(Method::Put, url)
        }
    }

    pub fn patch(url: impl Into<String>, body: Body) -> Self {
        Self {
            body,
            ..Self::new(Method::Patch, url)
        }
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    /// The GET request that follows a redirect from `previous` to `location`.
    ///
    /// Cookies and timeout are inherited from the request that was sent; headers,
    /// query and body are not.
    pub(crate) fn follow(location: String, previous: &Request) -> Self {
        Self {
            cookies: previous.cookies.clone(),
            timeout: previous.timeout,
            ..Self::new(Method::Get, location)
        }
    }

    /// URL with the query parameters appended as `k=v` pairs joined by `&`.
    pub fn url_with_query(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.url, separator, query)
    }
}

/// Fluent construction of a [`Request`], finished with [`RequestBuilder::build`].
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    request: Request,
}

impl RequestBuilder {
    pub fn method(mut self, method: Method) -> Self {
        self.request.method = method;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.append(name, value);
        self
    }

    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.cookies.insert(name.into(), value.into());
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.query.insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, body: Body) -> Self {
        self.request.body = body;
        self
    }

    pub fn redirects(mut self, follow: bool) -> Self {
        self.request.redirects = follow;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request.timeout = timeout;
        self
    }

    pub fn build(self) -> Request {
        self.request
    }
}
