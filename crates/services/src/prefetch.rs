//! Image prefetching around the session cursor.
//!
//! Prefetches are fire-and-forget: navigation never waits on them, failures
//! are logged and swallowed, and stale in-flight fetches are never aborted.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use quiz_core::Question;

use crate::error::PrefetchError;

/// Sets at or below this size are prefetched eagerly in full.
pub const PRELOAD_ALL_THRESHOLD: usize = 60;

/// Radius of the bidirectional prefetch window around the current index.
pub const PRELOAD_WINDOW: usize = 10;

//
// ─── FETCHER ──────────────────────────────────────────────────────────────────
//

/// Fetches a single image. The HTTP implementation talks to the image host;
/// tests swap in a counting fake.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, PrefetchError>;
}

/// Fetches images over HTTP.
#[derive(Clone, Default)]
pub struct HttpImageFetcher {
    client: reqwest::Client,
}

impl HttpImageFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, PrefetchError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(PrefetchError::HttpStatus(response.status()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

//
// ─── PREFETCHER ───────────────────────────────────────────────────────────────
//

/// Cache of loaded image bytes plus the bookkeeping that keeps every URL
/// fetched at most once per session.
///
/// Single-writer: only prefetch tasks insert, the renderer only reads, and
/// an insertion for a key is final.
#[derive(Clone)]
pub struct ImagePrefetcher {
    fetcher: Arc<dyn ImageFetcher>,
    requested: Arc<Mutex<HashSet<String>>>,
    images: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl ImagePrefetcher {
    #[must_use]
    pub fn new(fetcher: Arc<dyn ImageFetcher>) -> Self {
        Self {
            fetcher,
            requested: Arc::new(Mutex::new(HashSet::new())),
            images: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Prefetcher backed by a plain HTTP client.
    #[must_use]
    pub fn http() -> Self {
        Self::new(Arc::new(HttpImageFetcher::new()))
    }

    /// The image URLs worth fetching around `current`: the whole set when it
    /// is small enough, otherwise the clamped `±PRELOAD_WINDOW` window.
    #[must_use]
    pub fn plan(questions: &[Question], current: usize) -> Vec<String> {
        let (start, end) = if questions.len() <= PRELOAD_ALL_THRESHOLD {
            (0, questions.len())
        } else {
            (
                current.saturating_sub(PRELOAD_WINDOW),
                (current + PRELOAD_WINDOW + 1).min(questions.len()),
            )
        };

        questions[start..end]
            .iter()
            .filter_map(|q| q.image_url().map(str::to_string))
            .collect()
    }

    /// Kick off fire-and-forget preloads for the window around `current`.
    ///
    /// Spawns onto the ambient Tokio runtime; completion order is
    /// unspecified and the caller never waits.
    pub fn prefetch(&self, questions: &[Question], current: usize) {
        for url in Self::plan(questions, current) {
            let prefetcher = self.clone();
            tokio::spawn(async move {
                prefetcher.preload(&url).await;
            });
        }
    }

    /// Preload a single URL into the cache.
    ///
    /// Idempotent: a URL that was already requested returns immediately
    /// without a second fetch, even while the first is still in flight.
    /// Failures are logged at warn level and otherwise ignored; they are
    /// never retried.
    pub async fn preload(&self, url: &str) {
        {
            let mut requested = self
                .requested
                .lock()
                .expect("prefetch bookkeeping lock poisoned");
            if !requested.insert(url.to_string()) {
                return;
            }
        }

        match self.fetcher.fetch(url).await {
            Ok(bytes) => {
                self.images
                    .lock()
                    .expect("prefetch cache lock poisoned")
                    .insert(url.to_string(), bytes);
            }
            Err(err) => log::warn!("failed to preload image {url}: {err}"),
        }
    }

    /// True when the image bytes for `url` are already in the cache.
    #[must_use]
    pub fn is_cached(&self, url: &str) -> bool {
        self.images
            .lock()
            .expect("prefetch cache lock poisoned")
            .contains_key(url)
    }

    /// The cached bytes for `url`, if its preload has completed.
    #[must_use]
    pub fn image(&self, url: &str) -> Option<Vec<u8>> {
        self.images
            .lock()
            .expect("prefetch cache lock poisoned")
            .get(url)
            .cloned()
    }

    /// Number of images with completed preloads.
    #[must_use]
    pub fn cached_count(&self) -> usize {
        self.images
            .lock()
            .expect("prefetch cache lock poisoned")
            .len()
    }
}

//
// ─── TESTS ────────────────────────────────────────────────────────────────────
//
