//! HTTP client utilities.

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Shared HTTP client with sensible defaults.
///
/// One client (and therefore one connection pool) is built at startup and
/// handed to all three provider clients.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a new HTTP client with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client: Arc::new(client),
        }
    }

    /// Clone the shared handle to the underlying client
    pub fn clone_inner(&self) -> Arc<Client> {
        Arc::clone(&self.client)
    }

    /// Unwrap into the shared handle
    pub fn into_inner(self) -> Arc<Client> {
        self.client
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}
