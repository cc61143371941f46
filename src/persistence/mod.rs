//! Persistence bridge: seeds the document at startup and mirrors committed
//! mutations to the local cache and the remote store.
//!
//! DESIGN
//! ======
//! The in-memory document is the source of truth for the running session.
//! The cache is written synchronously on every commit with the full list.
//! Remote writes are spawned and forgotten: no retry, no queue, no ordering
//! between in-flight writes, and no cancellation. The last write to complete
//! wins on the remote side.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here returns an error to the caller. A failed remote fetch falls
//! back to the cache, an unreadable cache falls back to an empty document,
//! and failed writes are logged and dropped.


pub mod cache;
pub mod remote;

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::doc::Shape;
use cache::{LocalCache, SHAPES_CACHE_KEY};
use remote::RemoteStore;

/// Where the startup snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Remote,
    Cache,
    Empty,
}

/// A remote write to fire after a commit.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteWrite {
    /// `POST /shapes` for a newly created shape.
    Create(Shape),
    /// `PUT /shapes/{id}` for a changed shape.
    Update(Shape),
}

impl RemoteWrite {
    fn shape(&self) -> &Shape {
        match self {
            Self::Create(shape) | Self::Update(shape) => shape,
        }
    }
}

/// Mirrors the document to a local cache and a remote store.
pub struct PersistenceBridge<C> {
    cache: C,
    remote: Arc<dyn RemoteStore>,
}

impl<C: LocalCache> PersistenceBridge<C> {
    #[must_use]
    pub fn new(cache: C, remote: Arc<dyn RemoteStore>) -> Self {
        Self { cache, remote }
    }

    /// The local cache backend.
    #[must_use]
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Load the startup snapshot for `page_id`.
    ///
    /// Remote first; on success the cache is overwritten with the result.
    /// Any remote failure falls back to the cache, then to an empty list.
    pub async fn load(&self, page_id: &str) -> (Vec<Shape>, LoadSource) {
        match self.remote.fetch_shapes(page_id).await {
            Ok(shapes) => {
                info!(page_id, count = shapes.len(), "loaded shapes from remote");
                self.write_cache(&shapes);
                return (shapes, LoadSource::Remote);
            }
            Err(e) => warn!(page_id, error = %e, "remote load failed; falling back to cache"),
        }
        match self.read_cache() {
            Some(shapes) => {
                info!(page_id, count = shapes.len(), "loaded shapes from cache");
                (shapes, LoadSource::Cache)
            }
            None => (Vec::new(), LoadSource::Empty),
        }
    }

    /// Mirror a committed mutation.
    ///
    /// `shapes` is the full document after the commit; it replaces the
    /// cached list before this returns. The remote write runs on its own
    /// task; the returned handle may be awaited or dropped.
    pub fn mirror(&self, shapes: &[Shape], write: RemoteWrite) -> JoinHandle<()> {
        self.write_cache(shapes);
        let remote = Arc::clone(&self.remote);
        tokio::spawn(async move {
            let result = match &write {
                RemoteWrite::Create(shape) => remote.create_shape(shape).await,
                RemoteWrite::Update(shape) => remote.update_shape(shape).await,
            };
            match result {
                Ok(()) => debug!(id = %write.shape().id, "remote write stored"),
                Err(e) => debug!(id = %write.shape().id, error = %e, "remote write ignored"),
            }
        })
    }

    /// Read the cached list. Missing, unreadable, or corrupt caches read as `None`.
    #[must_use]
    pub fn read_cache(&self) -> Option<Vec<Shape>> {
        let raw = match self.cache.get(SHAPES_CACHE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "cache read failed");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(shapes) => Some(shapes),
            Err(e) => {
                warn!(error = %e, "cached shapes are corrupt; ignoring");
                None
            }
        }
    }

    /// Overwrite the cached list. Failures are logged.
    pub fn write_cache(&self, shapes: &[Shape]) {
        let encoded = match serde_json::to_string(shapes) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(error = %e, "failed to encode shapes for cache");
                return;
            }
        };
        if let Err(e) = self.cache.set(SHAPES_CACHE_KEY, &encoded) {
            warn!(error = %e, "cache write failed");
        }
    }
}
