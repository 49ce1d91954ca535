//! Logo cache and its background worker.

use crate::config::LogoConfig;
use crate::error::LogoError;
use crate::logos::{LogoLookup, RetryPolicy, Throttle};
use dexscan_domain::logo::{CdnLogoMap, LogoSnapshot};
use dexscan_domain::token::{Token, TokenAddress};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Lookup state of one token address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoStatus {
    /// Never requested.
    Unknown,
    /// Queued or being looked up.
    InFlight,
    /// Finished; `None` means no logo exists for the session.
    Resolved(Option<String>),
}

/// A queued lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoRequest {
    pub address: TokenAddress,
    pub symbol: String,
}

/// Emitted when a lookup finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoResolution {
    pub address: TokenAddress,
    pub symbol: String,
    pub url: Option<String>,
    /// Snapshot version after this resolution was recorded.
    pub version: u64,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<TokenAddress, LogoStatus>,
    snapshot: LogoSnapshot,
}

impl CacheState {
    fn complete(&mut self, address: &str, url: Option<String>) -> u64 {
        self.entries
            .insert(address.to_string(), LogoStatus::Resolved(url.clone()));
        if let Some(url) = url {
            Arc::make_mut(&mut self.snapshot.urls).insert(address.to_string(), url);
            self.snapshot.version += 1;
        }
        self.snapshot.version
    }
}

/// Cloneable handle to the logo cache.
///
/// Readers take synchronous [`LogoSnapshot`]s; missing logos are queued for
/// the [`LogoWorker`].
#[derive(Debug, Clone)]
pub struct LogoCache {
    state: Arc<RwLock<CacheState>>,
    cdn: Arc<CdnLogoMap>,
    requests: mpsc::UnboundedSender<LogoRequest>,
}

impl LogoCache {
    /// Creates a cache and the request queue its worker drains.
    pub fn new(cdn: CdnLogoMap) -> (Self, mpsc::UnboundedReceiver<LogoRequest>) {
        let (requests, rx) = mpsc::unbounded_channel();
        let cache = Self {
            state: Arc::new(RwLock::new(CacheState::default())),
            cdn: Arc::new(cdn),
            requests,
        };
        (cache, rx)
    }

    pub fn cdn(&self) -> &CdnLogoMap {
        &self.cdn
    }

    /// Current resolved logos.
    pub fn snapshot(&self) -> LogoSnapshot {
        self.state.read().snapshot.clone()
    }

    pub fn status(&self, address: &str) -> LogoStatus {
        self.state
            .read()
            .entries
            .get(address)
            .cloned()
            .unwrap_or(LogoStatus::Unknown)
    }

    /// Queues lookups for tokens with no static logo that are neither in
    /// flight nor resolved. Returns the number queued.
    pub fn request_missing<'a, I>(&self, tokens: I) -> usize
    where
        I: IntoIterator<Item = &'a Token>,
    {
        let mut queued = 0;
        let mut state = self.state.write();
        for token in tokens {
            if self.cdn.static_logo(token).is_some() || state.entries.contains_key(&token.address)
            {
                continue;
            }
            let request = LogoRequest {
                address: token.address.clone(),
                symbol: token.symbol.clone(),
            };
            if self.requests.send(request).is_err() {
                warn!(address = %token.address, "Logo worker is gone; using placeholder");
                state
                    .entries
                    .insert(token.address.clone(), LogoStatus::Resolved(None));
                continue;
            }
            state
                .entries
                .insert(token.address.clone(), LogoStatus::InFlight);
            queued += 1;
        }
        if queued > 0 {
            debug!(queued, "Queued logo lookups");
        }
        queued
    }

    /// Records a finished lookup and returns the new snapshot version.
    pub fn complete(&self, address: &str, url: Option<String>) -> u64 {
        self.state.write().complete(address, url)
    }
}

/// Counters for the worker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerStats {
    /// Network lookups performed, retries included.
    pub attempts: u64,
    /// Requests answered from the symbol cache.
    pub symbol_hits: u64,
    /// Lookups that ended without a logo.
    pub misses: u64,
}

/// Serially resolves queued requests through a [`LogoLookup`].
///
/// The worker shares the cache state but not its request sender, so it stops
/// once every [`LogoCache`] handle is dropped.
pub struct LogoWorker {
    lookup: Arc<dyn LogoLookup>,
    state: Arc<RwLock<CacheState>>,
    requests: mpsc::UnboundedReceiver<LogoRequest>,
    throttle: Throttle,
    retry: RetryPolicy,
    by_symbol: HashMap<String, Option<String>>,
    events_tx: mpsc::UnboundedSender<LogoResolution>,
    events_rx: Option<mpsc::UnboundedReceiver<LogoResolution>>,
    stats: WorkerStats,
}

impl LogoWorker {
    /// Worker draining `requests` into `cache` through `lookup`.
    pub fn new(
        lookup: Arc<dyn LogoLookup>,
        cache: &LogoCache,
        requests: mpsc::UnboundedReceiver<LogoRequest>,
        config: &LogoConfig,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            lookup,
            state: Arc::clone(&cache.state),
            requests,
            throttle: Throttle::new(config.request_delay),
            retry: config.retry.clone(),
            by_symbol: HashMap::new(),
            events_tx,
            events_rx: Some(events_rx),
            stats: WorkerStats::default(),
        }
    }

    /// Takes the resolution event receiver. Returns `None` after the first
    /// call.
    pub fn take_receiver(&mut self) -> Option<mpsc::UnboundedReceiver<LogoResolution>> {
        self.events_rx.take()
    }

    /// Drains requests until every cache handle is dropped.
    pub async fn run(mut self) -> WorkerStats {
        info!("Logo worker started");
        while let Some(request) = self.requests.recv().await {
            let url = self.resolve(&request.symbol).await;
            let version = self.state.write().complete(&request.address, url.clone());
            if url.is_none() {
                self.stats.misses += 1;
            }
            let event = LogoResolution {
                address: request.address,
                symbol: request.symbol,
                url,
                version,
            };
            if self.events_tx.send(event).is_err() {
                debug!("Logo resolution receiver dropped");
            }
        }
        info!(stats = ?self.stats, "Logo worker stopped");
        self.stats
    }

    async fn resolve(&mut self, symbol: &str) -> Option<String> {
        let key = symbol.to_ascii_uppercase();
        if let Some(cached) = self.by_symbol.get(&key) {
            self.stats.symbol_hits += 1;
            return cached.clone();
        }
        let url = self.lookup_with_retry(symbol).await;
        self.by_symbol.insert(key, url.clone());
        url
    }

    async fn lookup_with_retry(&mut self, symbol: &str) -> Option<String> {
        let mut attempt = 0;
        loop {
            self.throttle.acquire().await;
            self.stats.attempts += 1;
            match self.lookup.lookup(symbol).await {
                Ok(url) => return url,
                Err(e) if e.is_retryable() && attempt < self.retry.max_retries => {
                    let delay = self.retry.backoff(attempt);
                    debug!(symbol, attempt, delay_ms = delay.as_millis() as u64, error = %e, "Retrying logo lookup");
                    attempt += 1;
                    sleep(delay).await;
                }
                Err(e) => {
                    log_failure(symbol, attempt, &e);
                    return None;
                }
            }
        }
    }
}

fn log_failure(symbol: &str, attempt: u32, error: &LogoError) {
    warn!(symbol, attempts = attempt + 1, error = %error, "Logo lookup failed; using placeholder");
}
