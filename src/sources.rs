pub mod file;
pub mod http;

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::cache::{CatalogCache, DEFAULT_CACHE_TTL};
use crate::quota::QuotaCatalog;

pub use file::FileSource;
pub use http::HttpSource;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no quota source configured: pass --catalog or --catalog-url")]
    NoSource,

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("request to {url} failed with status {status}")]
    Http { status: u16, url: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Something that can enumerate quota definitions.
#[async_trait]
pub trait QuotaSource: Send + Sync {
    fn name(&self) -> &str;
    async fn load(&self) -> Result<QuotaCatalog, SourceError>;
}

#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub catalogs: Vec<PathBuf>,
    pub catalog_url: Option<String>,
    pub refresh: bool,
    pub cache_ttl: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            catalogs: Vec::new(),
            catalog_url: None,
            refresh: false,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

/// Local catalogs win over a remote URL.
pub fn get_source(config: &SourceConfig) -> Result<Box<dyn QuotaSource>, SourceError> {
    if !config.catalogs.is_empty() {
        return Ok(Box::new(FileSource::new(config.catalogs.clone())));
    }

    match &config.catalog_url {
        Some(url) => {
            let cache = CatalogCache::new(config.cache_ttl);
            if cache.is_none() {
                tracing::warn!("no platform cache directory, remote catalog will not be cached");
            }
            let source = HttpSource::new(url.clone())?
                .with_cache(cache)
                .refresh(config.refresh);
            Ok(Box::new(source))
        }
        None => Err(SourceError::NoSource),
    }
}
