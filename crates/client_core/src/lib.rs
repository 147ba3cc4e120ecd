use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::{ApiError, ApiException},
    protocol::DigestReport,
};
use tokio::sync::{broadcast, Mutex};
use tracing::debug;
use url::Url;

/// Display strings bound to the view for the console's lifetime.
pub const AWESOME_THINGS: [&str; 3] = ["HTML5 Boilerplate", "AngularJS", "Karma"];

/// Target sent on the initial fetch. The value is digested verbatim and
/// never rendered as markup anywhere in the system.
const INITIAL_TARGET: &str = "<script></script>";

#[async_trait]
pub trait DigestEndpoint: Send + Sync {
    async fn fetch_digest(&self, target: &str) -> Result<DigestReport>;
}

pub struct MissingDigestEndpoint;

#[async_trait]
impl DigestEndpoint for MissingDigestEndpoint {
    async fn fetch_digest(&self, _target: &str) -> Result<DigestReport> {
        Err(anyhow!("digest endpoint is unavailable"))
    }
}

pub struct HttpDigestEndpoint {
    http: Client,
    digest_url: Url,
}

impl HttpDigestEndpoint {
    pub fn new(server_url: &str) -> Result<Self> {
        let base = Url::parse(server_url)
            .with_context(|| format!("invalid server url: {server_url}"))?;
        let digest_url = base.join("/digest")?;
        Ok(Self {
            http: Client::new(),
            digest_url,
        })
    }
}

#[async_trait]
impl DigestEndpoint for HttpDigestEndpoint {
    async fn fetch_digest(&self, target: &str) -> Result<DigestReport> {
        debug!(%target, "requesting digest");
        let response = self
            .http
            .get(self.digest_url.clone())
            .query(&[("target", target)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            if let Ok(error) = response.json::<ApiError>().await {
                return Err(ApiException::new(error.code, error.message).into());
            }
            return Err(anyhow!("digest request failed with status {status}"));
        }

        Ok(response.json().await?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    ReportLoaded { raw: String, digest: String },
    DigestRefreshed { digest: String },
}

#[derive(Default)]
struct ConsoleState {
    raw: Option<String>,
    digest: Option<String>,
}

/// Mediates between a view and the digest endpoint: holds the fixed
/// display strings, the editable `raw` field, and the server-derived
/// `digest` field.
pub struct DigestConsole {
    endpoint: Arc<dyn DigestEndpoint>,
    inner: Mutex<ConsoleState>,
    changes: broadcast::Sender<ConsoleEvent>,
}

impl DigestConsole {
    pub fn new(endpoint: Arc<dyn DigestEndpoint>) -> Arc<Self> {
        let (changes, _) = broadcast::channel(64);
        Arc::new(Self {
            endpoint,
            inner: Mutex::new(ConsoleState::default()),
            changes,
        })
    }

    pub fn connect(server_url: &str) -> Result<Arc<Self>> {
        Ok(Self::new(Arc::new(HttpDigestEndpoint::new(server_url)?)))
    }

    pub fn awesome_things(&self) -> &'static [&'static str] {
        &AWESOME_THINGS
    }

    /// One fetch with the fixed probe target; on success both fields are
    /// assigned from the response. On failure neither field is touched.
    pub async fn initialize(&self) -> Result<()> {
        let report = self.endpoint.fetch_digest(INITIAL_TARGET).await?;
        {
            let mut state = self.inner.lock().await;
            state.raw = Some(report.raw.clone());
            state.digest = Some(report.digest.clone());
        }
        let _ = self.changes.send(ConsoleEvent::ReportLoaded {
            raw: report.raw,
            digest: report.digest,
        });
        Ok(())
    }

    /// The editable text binding.
    pub async fn set_raw(&self, value: impl Into<String>) {
        self.inner.lock().await.raw = Some(value.into());
    }

    pub async fn raw(&self) -> Option<String> {
        self.inner.lock().await.raw.clone()
    }

    pub async fn digest(&self) -> Option<String> {
        self.inner.lock().await.digest.clone()
    }

    /// Refetch the digest for the current `raw` value; an unset `raw` is
    /// sent as the empty string. Only `digest` is overwritten on success.
    /// Overlapping calls are not sequenced: each writes `digest` when its
    /// response resolves, so the last response to arrive wins.
    pub async fn get_digest(&self) -> Result<()> {
        let target = { self.inner.lock().await.raw.clone().unwrap_or_default() };
        let report = self.endpoint.fetch_digest(&target).await?;
        self.inner.lock().await.digest = Some(report.digest.clone());
        let _ = self.changes.send(ConsoleEvent::DigestRefreshed {
            digest: report.digest,
        });
        Ok(())
    }

    pub fn subscribe_changes(&self) -> broadcast::Receiver<ConsoleEvent> {
        self.changes.subscribe()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
