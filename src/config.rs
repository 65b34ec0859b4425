use std::time::Duration;

/// User agent sent when neither the client config nor the request supplies one.
pub const DEFAULT_USER_AGENT: &str = "HttpKit/1.0 (+https://crates.io/crates/httpkit)";

/// Connection-establishment timeout used for requests that do not set one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Client configuration.
///
/// Retry and redirect chains are unbounded unless a cap is configured. A
/// listener that always asks for a retry will loop forever with the default
/// configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// User agent string for HTTP requests
    pub user_agent: String,
    /// Maximum number of redirect hops followed for a single send
    pub max_redirects: Option<usize>,
    /// Maximum number of listener-triggered resends per hop
    pub max_retries: Option<usize>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: None,
            max_retries: None,
        }
    }
}
