//! Outbound network helpers.
//!
//! Covers the two network needs of configuration resolution: fetching
//! `http://`/`https://` source locators and detecting the host's external
//! address. Both run against a shared client with a bounded timeout so an
//! unreachable endpoint cannot hang initialization.

use async_trait::async_trait;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default endpoint for external-IP detection. Responds with the caller's
/// public address as plain text.
pub const DEFAULT_IP_ENDPOINT: &str = "https://api.ipify.org";

fn client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            // Builder only fails on TLS backend misconfiguration; fall
            // back to the default client rather than poisoning startup.
            .unwrap_or_else(|_| reqwest::Client::new())
    })
}

/// Fetch a URL and return the response body text.
///
/// Non-2xx statuses are failures.
pub async fn fetch_text(url: &str) -> Result<String, reqwest::Error> {
    client()
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
}

/// Self-detection of the host's externally visible address.
///
/// A seam so resolution can be tested with a fixed address; the
/// production implementation asks an external echo service.
#[async_trait]
pub trait ExternalIpProbe: Send + Sync {
    /// The externally visible address, or `None` when detection fails.
    async fn external_ip(&self) -> Option<String>;
}

/// Probe that queries an external echo service over HTTPS.
pub struct HttpIpProbe {
    endpoint: String,
}

impl HttpIpProbe {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Default for HttpIpProbe {
    fn default() -> Self {
        Self::new(DEFAULT_IP_ENDPOINT)
    }
}

#[async_trait]
impl ExternalIpProbe for HttpIpProbe {
    async fn external_ip(&self) -> Option<String> {
        match fetch_text(&self.endpoint).await {
            Ok(body) => {
                let addr = body.trim().to_string();
                if addr.is_empty() { None } else { Some(addr) }
            }
            Err(err) => {
                debug!("external address detection failed: {}", err);
                None
            }
        }
    }
}

/// Probes with fixed behavior for tests.
pub mod testing {
    use super::*;

    /// Probe returning a fixed address.
    pub struct StaticIpProbe(pub &'static str);

    #[async_trait]
    impl ExternalIpProbe for StaticIpProbe {
        async fn external_ip(&self) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    /// Probe that always fails detection.
    pub struct FailingIpProbe;

    #[async_trait]
    impl ExternalIpProbe for FailingIpProbe {
        async fn external_ip(&self) -> Option<String> {
            None
        }
    }
}
