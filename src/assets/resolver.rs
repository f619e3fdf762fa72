use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::Context as _;
use async_trait::async_trait;
use futures::{stream, StreamExt, TryStreamExt};
use tokio::sync::{Mutex, OnceCell, Semaphore};

use crate::{
    foundation::error::{ReelError, ReelResult},
    foundation::math::fnv1a64,
    schema::normalize::NormalizedTracks,
};

/// Classification of a single fetch attempt, driving the retry decision.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// Worth retrying: timeouts, connection resets, 5xx responses.
    #[error("transient: {0}")]
    Transient(String),
    /// Not worth retrying: 4xx responses, malformed URLs, local IO failures.
    #[error("permanent: {0}")]
    Permanent(String),
}

/// The network collaborator: fetch one URL into a local destination file.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Download `url` to `dest`, classifying failures as transient or permanent.
    async fn fetch(&self, url: &str, dest: &Path) -> Result<(), FetchError>;
}

/// Production [`Fetcher`] backed by a shared [`reqwest::Client`].
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with a 30 second request timeout.
    pub fn new() -> ReelResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("build http client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<(), FetchError> {
        let response = self.client.get(url).send().await.map_err(classify)?;
        let status = response.status();
        if status.is_server_error() {
            return Err(FetchError::Transient(format!("server returned {status}")));
        }
        if !status.is_success() {
            return Err(FetchError::Permanent(format!("server returned {status}")));
        }
        let bytes = response.bytes().await.map_err(classify)?;
        tokio::fs::write(dest, &bytes)
            .await
            .map_err(|e| FetchError::Permanent(format!("write '{}': {e}", dest.display())))?;
        Ok(())
    }
}

fn classify(e: reqwest::Error) -> FetchError {
    if e.is_timeout() || e.is_connect() {
        FetchError::Transient(e.to_string())
    } else {
        FetchError::Permanent(e.to_string())
    }
}

#[derive(Clone, Debug)]
/// Retry and concurrency policy for a resolver instance.
pub struct ResolverConfig {
    /// Total fetch attempts per URL, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles after each transient failure.
    pub initial_backoff: Duration,
    /// Upper bound on concurrently in-flight fetches.
    pub max_concurrent_fetches: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(500),
            max_concurrent_fetches: 4,
        }
    }
}

/// Resolves remote media references into files under a staging directory.
///
/// Distinct URLs are fetched concurrently (bounded by
/// [`ResolverConfig::max_concurrent_fetches`]); a URL requested more than
/// once — within one request or across concurrent requests — is fetched at
/// most once, with later requests coalescing onto the in-flight fetch. The
/// per-URL cache is the only shared mutable state in the engine.
///
/// The staging directory is removed when the resolver is dropped, so staged
/// downloads never outlive the render request on either the success or the
/// failure path.
pub struct AssetResolver<F> {
    fetcher: F,
    config: ResolverConfig,
    staging: tempfile::TempDir,
    entries: Mutex<HashMap<String, Arc<OnceCell<PathBuf>>>>,
    permits: Semaphore,
}

impl<F: Fetcher> AssetResolver<F> {
    /// Create a resolver with a fresh staging directory.
    pub fn new(fetcher: F, config: ResolverConfig) -> ReelResult<Self> {
        let staging = tempfile::tempdir().context("create asset staging directory")?;
        let permits = Semaphore::new(config.max_concurrent_fetches.max(1));
        Ok(Self {
            fetcher,
            config,
            staging,
            entries: Mutex::new(HashMap::new()),
            permits,
        })
    }

    /// Directory staged downloads are written into.
    pub fn staging_dir(&self) -> &Path {
        self.staging.path()
    }

    /// Resolve every reference in `tracks`, applying the URL → local path
    /// mapping back onto the in-progress structures.
    ///
    /// Blocks until all references are resolved. On the first exhausted
    /// retry budget the remaining in-flight fetches are dropped and the
    /// request aborts — no partially resolved track set is ever scheduled.
    #[tracing::instrument(skip_all)]
    pub async fn resolve_all(&self, tracks: &mut NormalizedTracks) -> ReelResult<()> {
        let mut seen = HashSet::new();
        let distinct: Vec<String> = tracks
            .urls()
            .into_iter()
            .filter(|u| seen.insert(u.clone()))
            .collect();
        tracing::info!(
            references = tracks.references().len(),
            distinct = distinct.len(),
            "resolving media references"
        );

        let resolved: HashMap<String, PathBuf> = stream::iter(distinct)
            .map(|url| async move {
                let path = self.resolve_one(&url).await?;
                Ok::<_, ReelError>((url, path))
            })
            .buffer_unordered(self.config.max_concurrent_fetches.max(1))
            .try_collect()
            .await?;

        for reference in tracks.references_mut() {
            let path = resolved.get(reference.url()).ok_or_else(|| {
                ReelError::Other(anyhow::anyhow!(
                    "no resolution recorded for '{}'",
                    reference.url()
                ))
            })?;
            reference.mark_resolved(path.clone())?;
        }
        Ok(())
    }

    /// Resolve a single URL, coalescing concurrent callers onto one fetch.
    pub async fn resolve_one(&self, url: &str) -> ReelResult<PathBuf> {
        let cell = {
            let mut entries = self.entries.lock().await;
            entries.entry(url.to_string()).or_default().clone()
        };
        cell.get_or_try_init(|| self.fetch_with_retry(url))
            .await
            .cloned()
    }

    async fn fetch_with_retry(&self, url: &str) -> ReelResult<PathBuf> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| ReelError::Other(anyhow::anyhow!("fetch semaphore closed: {e}")))?;

        let dest = self.staging.path().join(staged_file_name(url));
        let mut backoff = self.config.initial_backoff;
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            match self.fetcher.fetch(url, &dest).await {
                Ok(()) => {
                    tracing::debug!(url, path = %dest.display(), attempts, "resolved");
                    return Ok(dest);
                }
                Err(FetchError::Permanent(reason)) => {
                    return Err(ReelError::resolution(url, attempts, reason));
                }
                Err(FetchError::Transient(reason)) => {
                    if attempts >= self.config.max_attempts.max(1) {
                        return Err(ReelError::resolution(url, attempts, reason));
                    }
                    tracing::warn!(url, attempts, backoff_ms = backoff.as_millis() as u64, %reason,
                        "transient fetch failure, retrying");
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
            }
        }
    }
}

/// Deterministic staging file name for a URL: FNV-1a of the full URL plus a
/// sanitized extension taken from the path segment.
fn staged_file_name(url: &str) -> String {
    let hash = fnv1a64(url.as_bytes());
    match url_extension(url) {
        Some(ext) => format!("asset_{hash:016x}.{ext}"),
        None => format!("asset_{hash:016x}.bin"),
    }
}

fn url_extension(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next()?;
    let segment = path.rsplit('/').next()?;
    let (_, ext) = segment.rsplit_once('.')?;
    if ext.is_empty() || ext.len() > 4 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
