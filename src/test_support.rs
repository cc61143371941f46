//! Shared fixtures for unit tests.

use std::sync::Mutex;

use crate::doc::Shape;
use crate::persistence::RemoteWrite;
use crate::persistence::remote::{RemoteError, RemoteStore};

/// In-process stand-in for the remote shape store.
///
/// Serves a fixed snapshot (or fails every fetch) and records each write it
/// is asked to perform, including ones it then rejects.
#[derive(Default)]
pub(crate) struct MockRemote {
    snapshot: Option<Vec<Shape>>,
    fail_writes: bool,
    writes: Mutex<Vec<RemoteWrite>>,
}

impl MockRemote {
    /// Fetches succeed with `shapes`; writes succeed.
    pub(crate) fn serving(shapes: Vec<Shape>) -> Self {
        Self { snapshot: Some(shapes), ..Self::default() }
    }

    /// Every call fails with a 503.
    pub(crate) fn offline() -> Self {
        Self { snapshot: None, fail_writes: true, ..Self::default() }
    }

    /// Writes attempted so far, in call order.
    pub(crate) fn writes(&self) -> Vec<RemoteWrite> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }

    fn record(&self, write: RemoteWrite) -> Result<(), RemoteError> {
        if let Ok(mut writes) = self.writes.lock() {
            writes.push(write);
        }
        if self.fail_writes { Err(RemoteError::Status(503)) } else { Ok(()) }
    }
}

#[async_trait::async_trait]
impl RemoteStore for MockRemote {
    async fn fetch_shapes(&self, _page_id: &str) -> Result<Vec<Shape>, RemoteError> {
        self.snapshot.clone().ok_or(RemoteError::Status(503))
    }

    async fn create_shape(&self, shape: &Shape) -> Result<(), RemoteError> {
        self.record(RemoteWrite::Create(shape.clone()))
    }

    async fn update_shape(&self, shape: &Shape) -> Result<(), RemoteError> {
        self.record(RemoteWrite::Update(shape.clone()))
    }
}
