//! Remote shape store client.
//!
//! The remote service is best-effort: the bridge reads from it once at
//! startup and fires writes at it without waiting on the outcome. The
//! [`RemoteStore`] trait keeps that contract narrow so tests can substitute
//! an in-process mock.
//!
//! Endpoints (relative to the configured base URL):
//! - `GET  /pages/{page_id}/shapes` → `Shape[]`
//! - `POST /shapes` with a full shape → 201
//! - `PUT  /shapes/{id}` with a full shape → 200, or 404 if unknown

#[cfg(test)]
#[path = "remote_test.rs"]
mod remote_test;

use std::time::Duration;

use reqwest::Url;

use crate::doc::Shape;

const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Errors from a remote call. Never surfaced past the bridge.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("http client build failed: {0}")]
    ClientBuild(String),
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("remote returned status {0}")]
    Status(u16),
}

/// Async access to the remote shape store. Enables mocking in tests.
#[async_trait::async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch every shape on `page_id`.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] on transport failure, a non-success status,
    /// or an undecodable body.
    async fn fetch_shapes(&self, page_id: &str) -> Result<Vec<Shape>, RemoteError>;

    /// Store a newly created shape.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] on transport failure or a non-success status.
    async fn create_shape(&self, shape: &Shape) -> Result<(), RemoteError>;

    /// Overwrite an existing shape.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] on transport failure or a non-success status.
    async fn update_shape(&self, shape: &Shape) -> Result<(), RemoteError>;
}

/// HTTP/JSON client for the remote shape store.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpRemote {
    /// Build a client rooted at `base_url` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::InvalidBaseUrl`] if `base_url` is not a
    /// hierarchical URL, or [`RemoteError::ClientBuild`] if the TLS backend
    /// cannot be set up.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| RemoteError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(RemoteError::InvalidBaseUrl(base_url.into()));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
            .build()
            .map_err(|e| RemoteError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base_url })
    }

    /// Base URL with any trailing slash removed.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn page_shapes_url(&self, page_id: &str) -> Result<Url, RemoteError> {
        self.endpoint(&["pages", page_id, "shapes"])
    }

    fn shapes_url(&self) -> Result<Url, RemoteError> {
        self.endpoint(&["shapes"])
    }

    fn shape_url(&self, id: &str) -> Result<Url, RemoteError> {
        self.endpoint(&["shapes", id])
    }

    /// Append path segments to the base URL. Each segment is percent-encoded,
    /// so ids containing `/`, `?` or `#` stay one segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, RemoteError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RemoteError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn check_status(resp: &reqwest::Response) -> Result<(), RemoteError> {
    let status = resp.status();
    if status.is_success() { Ok(()) } else { Err(RemoteError::Status(status.as_u16())) }
}

#[async_trait::async_trait]
impl RemoteStore for HttpRemote {
    async fn fetch_shapes(&self, page_id: &str) -> Result<Vec<Shape>, RemoteError> {
        let resp = self.http.get(self.page_shapes_url(page_id)?).send().await?;
        check_status(&resp)?;
        Ok(resp.json::<Vec<Shape>>().await?)
    }

    async fn create_shape(&self, shape: &Shape) -> Result<(), RemoteError> {
        let resp = self.http.post(self.shapes_url()?).json(shape).send().await?;
        check_status(&resp)
    }

    async fn update_shape(&self, shape: &Shape) -> Result<(), RemoteError> {
        let resp = self.http.put(self.shape_url(&shape.id)?).json(shape).send().await?;
        check_status(&resp)
    }
}
