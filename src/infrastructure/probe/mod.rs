//! Destination liveness probing.
//!
//! Before a link is stored, its destination is checked with an outbound
//! `HEAD` request. [`UrlProbe`] abstracts that check so services can be
//! tested without network access.

mod http_probe;

pub use http_probe::HttpProbe;

use async_trait::async_trait;
use url::Url;

/// Why a destination failed the liveness probe.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Destination unreachable: {0}")]
    Unreachable(String),
    #[error("Destination responded with status {0}")]
    BadStatus(u16),
    #[error("Probe client error: {0}")]
    Client(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlProbe: Send + Sync {
    /// Succeeds only when `url` answers with a 2xx status.
    async fn check(&self, url: &Url) -> Result<(), ProbeError>;
}
