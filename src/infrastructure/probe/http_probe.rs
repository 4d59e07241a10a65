//! `reqwest`-based liveness probe.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, redirect::Policy};
use tracing::debug;
use url::Url;

use super::{ProbeError, UrlProbe};

/// Probes destinations with a single `HEAD` request.
///
/// Redirects are followed (up to reqwest's default limit) so a destination
/// that answers `301` and then `200` counts as alive.
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    /// Builds a probe with separate connect and total request timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Client`] if the HTTP client cannot be built.
    pub fn new(connect_timeout: Duration, timeout: Duration) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .redirect(Policy::limited(10))
            .user_agent(concat!("brief/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProbeError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl UrlProbe for HttpProbe {
    async fn check(&self, url: &Url) -> Result<(), ProbeError> {
        let response = self
            .client
            .head(url.as_str())
            .send()
            .await
            .map_err(|e| ProbeError::Unreachable(e.to_string()))?;

        let status = response.status();
        debug!(%url, status = status.as_u16(), "Probed destination");

        if status.is_success() {
            Ok(())
        } else {
            Err(ProbeError::BadStatus(status.as_u16()))
        }
    }
}
