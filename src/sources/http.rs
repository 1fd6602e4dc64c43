use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

use super::{QuotaSource, SourceError};
use crate::cache::CatalogCache;
use crate::quota::QuotaCatalog;

/// Fetches a JSON catalog over HTTP, optionally through a [`CatalogCache`].
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
    cache: Option<CatalogCache>,
    refresh: bool,
}

impl HttpSource {
    pub fn new(url: String) -> Result<Self, SourceError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url,
            cache: None,
            refresh: false,
        })
    }

    pub fn with_cache(mut self, cache: Option<CatalogCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Skip reading the cache. A successful fetch is still stored.
    pub fn refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    async fn cached(&self) -> Option<QuotaCatalog> {
        if self.refresh {
            return None;
        }
        let cache = self.cache.as_ref()?;
        match cache.load(&self.url).await {
            Ok(hit) => hit,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable cache entry");
                None
            }
        }
    }

    async fn fetch(&self) -> Result<QuotaCatalog, SourceError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.text().await?;
        QuotaCatalog::from_json(&body).map_err(|source| SourceError::Parse {
            origin: self.url.clone(),
            source,
        })
    }
}

#[async_trait]
impl QuotaSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn load(&self) -> Result<QuotaCatalog, SourceError> {
        if let Some(catalog) = self.cached().await {
            tracing::info!(url = %self.url, count = catalog.len(), "using cached catalog");
            return Ok(catalog);
        }

        let catalog = self.fetch().await?;
        tracing::info!(url = %self.url, count = catalog.len(), "catalog fetched");

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.store(&self.url, &catalog).await {
                tracing::warn!(error = %e, "failed to cache catalog");
            }
        }

        Ok(catalog)
    }
}
