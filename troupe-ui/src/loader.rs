//! Artist loading with a TTL-bounded snapshot
//!
//! The loader owns the only copy of the full artist list. A successful
//! fetch replaces the snapshot wholesale (single assignment), so readers
//! always see a fully-formed list; a failed fetch leaves the previous
//! snapshot untouched. The snapshot is an owned value threaded through
//! the controller rather than a module-global cache.

use crate::client::DirectoryClient;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{info, warn};
use troupe_common::{Artist, Result};

/// The full artist list plus the time it was fetched.
#[derive(Debug, Clone)]
pub struct Snapshot {
    artists: Vec<Artist>,
    fetched_at: Instant,
}

/// Loads the artist collection, serving a cached snapshot while it is
/// younger than the TTL.
#[derive(Debug)]
pub struct ArtistLoader {
    client: DirectoryClient,
    snapshot: Option<Snapshot>,
    ttl: Duration,
}

impl ArtistLoader {
    pub fn new(client: DirectoryClient, ttl: Duration) -> Self {
        Self {
            client,
            snapshot: None,
            ttl,
        }
    }

    /// Load the artist list, skipping the network when the snapshot is
    /// still fresh. On fetch failure the existing snapshot (if any) is
    /// left in place and the error is returned for the caller to surface.
    pub async fn load(&mut self) -> Result<Vec<Artist>> {
        if let Some(snapshot) = &self.snapshot {
            if snapshot.fetched_at.elapsed() < self.ttl {
                return Ok(snapshot.artists.clone());
            }
        }

        let artists = self.client.artists().await?;
        info!(count = artists.len(), "Loaded artist collection");
        self.snapshot = Some(Snapshot {
            artists: artists.clone(),
            fetched_at: Instant::now(),
        });
        Ok(artists)
    }

    /// Startup load loop: retry on a fixed delay until a load succeeds or
    /// the optional attempt cap is exhausted.
    pub async fn load_with_retry(
        &mut self,
        delay: Duration,
        max_retries: Option<u32>,
    ) -> Result<Vec<Artist>> {
        let mut attempt: u32 = 0;
        loop {
            match self.load().await {
                Ok(artists) => return Ok(artists),
                Err(e) => {
                    attempt += 1;
                    if let Some(cap) = max_retries {
                        if attempt > cap {
                            warn!(attempts = attempt, "Giving up on artist load: {}", e);
                            return Err(e);
                        }
                    }
                    warn!(
                        attempt,
                        retry_in_secs = delay.as_secs(),
                        "Artist load failed: {}",
                        e
                    );
                    sleep(delay).await;
                }
            }
        }
    }

    /// Drop the snapshot so the next `load()` hits the network.
    /// Used after a successful `POST /api/refresh-cache`.
    pub fn invalidate(&mut self) {
        self.snapshot = None;
    }

    /// Whether a snapshot exists and is younger than the TTL.
    #[cfg(test)]
    fn has_fresh_snapshot(&self) -> bool {
        self.snapshot
            .as_ref()
            .map(|s| s.fetched_at.elapsed() < self.ttl)
            .unwrap_or(false)
    }

    /// Access to the client for secondary endpoints.
    pub fn client(&self) -> &DirectoryClient {
        &self.client
    }

    #[cfg(test)]
    fn seed(&mut self, artists: Vec<Artist>, fetched_at: Instant) {
        self.snapshot = Some(Snapshot {
            artists,
            fetched_at,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader(ttl: Duration) -> ArtistLoader {
        ArtistLoader::new(DirectoryClient::new("http://localhost:1", 100), ttl)
    }

    #[test]
    fn test_no_snapshot_is_not_fresh() {
        let loader = loader(Duration::from_secs(300));
        assert!(!loader.has_fresh_snapshot());
    }

    #[test]
    fn test_snapshot_freshness_tracks_ttl() {
        let mut loader = loader(Duration::from_secs(300));
        loader.seed(vec![], Instant::now());
        assert!(loader.has_fresh_snapshot());

        loader.seed(vec![], Instant::now() - Duration::from_secs(600));
        assert!(!loader.has_fresh_snapshot());
    }

    #[test]
    fn test_invalidate_drops_snapshot() {
        let mut loader = loader(Duration::from_secs(300));
        loader.seed(vec![], Instant::now());
        loader.invalidate();
        assert!(!loader.has_fresh_snapshot());
    }

    #[tokio::test]
    async fn test_fresh_snapshot_skips_network() {
        // Client points at an unroutable port; a network hit would error.
        let mut loader = loader(Duration::from_secs(300));
        loader.seed(vec![], Instant::now());
        let artists = loader.load().await.unwrap();
        assert!(artists.is_empty());
    }

    #[tokio::test]
    async fn test_failed_load_keeps_stale_snapshot() {
        let mut loader = loader(Duration::from_secs(0));
        loader.seed(vec![], Instant::now() - Duration::from_secs(10));
        assert!(loader.load().await.is_err());
        // Stale snapshot still present, just not fresh
        assert!(loader.snapshot.is_some());
    }
}
