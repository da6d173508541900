//! Resource fetching for embedded and downloaded images.
//!
//! The pipeline only needs `fetch(url) -> bytes`; [`ResourceFetcher`] is that
//! seam. [`HttpFetcher`] streams over HTTP with a timeout and a size cap,
//! [`OfflineFetcher`] refuses every request so images keep their URLs.

use std::time::Duration;

use base64::Engine;
use futures::StreamExt;
use reqwest::Client;

use crate::error::{ClipError, ClipResult};
use crate::utils::constants::{DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MAX_RESOURCE_BYTES};

const USER_AGENT: &str = concat!("marksnip/", env!("CARGO_PKG_VERSION"));

/// Bytes of a fetched resource and the content type the server reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedResource {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl FetchedResource {
    #[must_use]
    pub fn new(bytes: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            bytes,
            content_type,
        }
    }

    /// Encode as a `data:` URI.
    ///
    /// Without a reported content type the type is guessed from `url`'s extension.
    #[must_use]
    pub fn to_data_uri(&self, url: &str) -> String {
        let content_type = self
            .content_type
            .as_deref()
            .map(|value| value.split(';').next().unwrap_or(value).trim())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| guess_content_type(url));

        let encoded_capacity = base64::encoded_len(self.bytes.len(), true).unwrap_or(0);
        let mut encoded = String::with_capacity(encoded_capacity + 13 + content_type.len());
        encoded.push_str("data:");
        encoded.push_str(content_type);
        encoded.push_str(";base64,");
        base64::engine::general_purpose::STANDARD.encode_string(&self.bytes, &mut encoded);
        encoded
    }
}

/// Content type implied by the extension of the last path segment.
#[must_use]
pub fn guess_content_type(url: &str) -> &'static str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let extension = path
        .rsplit('/')
        .next()
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, extension)| extension.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("avif") => "image/avif",
        Some("bmp") => "image/bmp",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

/// Retrieves remote resources.
#[allow(async_fn_in_trait)]
pub trait ResourceFetcher {
    async fn fetch(&self, url: &str) -> ClipResult<FetchedResource>;
}

/// HTTP fetcher with streaming, size limit and timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
    max_bytes: usize,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

impl HttpFetcher {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            client,
            timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            max_bytes: DEFAULT_MAX_RESOURCE_BYTES,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> ClipResult<FetchedResource> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "image/avif,image/webp,image/apng,image/*,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| ClipError::fetch(url, e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClipError::fetch(
                url,
                format!("download failed with status: {}", response.status()),
            ));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        // Enforce the limit before downloading when the size is announced
        let expected_size = response.content_length().unwrap_or(0);
        if expected_size > self.max_bytes as u64 {
            return Err(ClipError::fetch(
                url,
                format!(
                    "resource too large: {expected_size} bytes exceeds limit of {} bytes",
                    self.max_bytes
                ),
            ));
        }

        let mut buffer = Vec::with_capacity(usize::try_from(expected_size).unwrap_or(0));
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| ClipError::fetch(url, e.to_string()))?;
            if buffer.len() + chunk.len() > self.max_bytes {
                return Err(ClipError::fetch(
                    url,
                    format!("resource exceeded size limit of {} bytes", self.max_bytes),
                ));
            }
            buffer.extend_from_slice(&chunk);
        }

        tracing::debug!(url, bytes = buffer.len(), "fetched resource");
        Ok(FetchedResource::new(buffer, content_type))
    }
}

/// Fetcher for offline runs: every request fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineFetcher;

impl ResourceFetcher for OfflineFetcher {
    async fn fetch(&self, url: &str) -> ClipResult<FetchedResource> {
        Err(ClipError::fetch(url, "network access is disabled"))
    }
}
