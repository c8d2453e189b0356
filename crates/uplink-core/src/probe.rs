//! HTTP reachability probing.
//!
//! A probe is a bounded-retry GET against the configured URL. Any completed
//! request counts as reachable; every failure mode (timeout, DNS error,
//! connection refused) is treated the same and only retried.

use crate::config::{MAX_ATTEMPTS, PROBE_TIMEOUT, RETRY_BACKOFF, TEST_URL};
use once_cell::sync::Lazy;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use thiserror::Error;

// Shared blocking client, built once so the connection pool and TLS setup
// survive across checks.
static HTTP_CLIENT: Lazy<reqwest::blocking::Client> = Lazy::new(|| {
    reqwest::blocking::Client::builder()
        .user_agent(concat!("uplink/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("default reqwest client")
});

/// Why a single reachability attempt failed.
///
/// Never surfaced past the prober: the cause is logged via `verbose!` and
/// retry exhaustion is a normal Disconnected determination, not an error.
#[derive(Debug, Error)]
pub enum ReachError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unreachable: {0}")]
    Other(String),
}

/// A single reachability attempt against a URL.
pub trait Reachability: Send + Sync {
    fn check(&self, url: &str, timeout: Duration) -> Result<(), ReachError>;
}

/// Production transport: HTTP GET via the shared blocking client.
///
/// The response status is deliberately ignored; a completed request is
/// proof enough that the network path works.
#[derive(Debug, Default)]
pub struct HttpReachability;

impl Reachability for HttpReachability {
    fn check(&self, url: &str, timeout: Duration) -> Result<(), ReachError> {
        HTTP_CLIENT.get(url).timeout(timeout).send()?;
        Ok(())
    }
}

/// Retry-bounded connectivity probe.
pub struct Prober {
    transport: Arc<dyn Reachability>,
    url: String,
    timeout: Duration,
    max_attempts: u32,
    backoff: Duration,
}

impl Prober {
    /// Prober with the built-in constants and the HTTP transport.
    pub fn new() -> Self {
        Self::with_transport(Arc::new(HttpReachability))
    }

    /// Prober with a custom transport (tests substitute fakes here).
    pub fn with_transport(transport: Arc<dyn Reachability>) -> Self {
        Self {
            transport,
            url: TEST_URL.to_string(),
            timeout: PROBE_TIMEOUT,
            max_attempts: MAX_ATTEMPTS,
            backoff: RETRY_BACKOFF,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Return true if any of the retry attempts succeeds.
    ///
    /// Sleeps the fixed backoff after every failed attempt; returns false
    /// only once `max_attempts` consecutive attempts have failed.
    pub fn probe(&self) -> bool {
        for attempt in 1..=self.max_attempts {
            match self.transport.check(&self.url, self.timeout) {
                Ok(()) => {
                    crate::verbose!("probe: attempt {attempt}/{} reachable", self.max_attempts);
                    return true;
                }
                Err(e) => {
                    crate::verbose!("probe: attempt {attempt}/{} failed: {e}", self.max_attempts);
                    thread::sleep(self.backoff);
                }
            }
        }
        false
    }
}

impl Default for Prober {
    fn default() -> Self {
        Self::new()
    }
}
