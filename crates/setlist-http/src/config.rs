//! Client configuration.

use std::time::Duration;

use setlist_core::ApiUrl;

/// Base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";

/// Configuration for an [`ApiClient`](crate::ApiClient).
///
/// No request timeout is layered on top of the transport's own defaults
/// unless one is set with [`ClientConfig::timeout`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base address; endpoint paths are appended to it.
    pub base_url: ApiUrl,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Whole-request timeout, applied to refresh calls as well.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: ApiUrl) -> Self {
        Self {
            base_url,
            user_agent: concat!("setlist/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: None,
        }
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
