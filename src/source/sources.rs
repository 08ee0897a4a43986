//! Data source implementations

use crate::decode::{JsonDecoder, RecordDecoder};
use crate::error::{Error, Result, ResultExt};
use crate::http::HttpClient;
use crate::types::Record;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Something that can produce the ordered record sequence
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Retrieve and decode all records
    async fn fetch(&self) -> Result<Vec<Record>>;

    /// Human-readable description for logs
    fn describe(&self) -> String;
}

// ============================================================================
// HTTP Source
// ============================================================================

/// Fetches the record document from a URL
pub struct HttpSource {
    client: HttpClient,
    url: String,
    decoder: Arc<dyn RecordDecoder>,
}

impl HttpSource {
    /// Create a source that decodes the document as a top-level array
    pub fn new(client: HttpClient, url: impl Into<String>) -> Self {
        Self::with_decoder(client, url, Arc::new(JsonDecoder::new()))
    }

    /// Create a source with a custom decoder
    pub fn with_decoder(
        client: HttpClient,
        url: impl Into<String>,
        decoder: Arc<dyn RecordDecoder>,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            decoder,
        }
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<Record>> {
        debug!(url = %self.url, "Fetching records");
        let body = self.client.get_text(&self.url).await?;
        self.decoder.decode(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

impl std::fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSource")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// File Source
// ============================================================================

/// Reads the record document from a local JSON file
pub struct FileSource {
    path: PathBuf,
    decoder: Arc<dyn RecordDecoder>,
}

impl FileSource {
    /// Create a file source decoding a top-level array
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_decoder(path, Arc::new(JsonDecoder::new()))
    }

    /// Create a file source with a custom decoder
    pub fn with_decoder(path: impl AsRef<Path>, decoder: Arc<dyn RecordDecoder>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            decoder,
        }
    }
}

#[async_trait]
impl DataSource for FileSource {
    async fn fetch(&self) -> Result<Vec<Record>> {
        let body = match tokio::fs::read_to_string(&self.path).await {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::FileNotFound {
                    path: self.path.display().to_string(),
                });
            }
            other => other.with_context(|| format!("Failed to read {}", self.path.display()))?,
        };
        self.decoder.decode(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

impl std::fmt::Debug for FileSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSource")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Static Source
// ============================================================================

/// Serves a fixed, in-memory record list
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<Record>,
}

impl StaticSource {
    /// Create a source that always yields `records`
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl DataSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<Record>> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("static ({} records)", self.records.len())
    }
}
