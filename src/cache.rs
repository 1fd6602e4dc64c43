use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;

use crate::quota::QuotaCatalog;
use crate::terraform::templates::sanitize_identifier;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache entry is not a valid catalog: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    url: String,
    catalog: QuotaCatalog,
}

/// On-disk cache of remote catalogs, one JSON file per URL.
#[derive(Debug, Clone)]
pub struct CatalogCache {
    dir: PathBuf,
    ttl: Duration,
}

impl CatalogCache {
    /// Rooted at the platform cache dir (`$XDG_CACHE_HOME/tfquota` on Linux).
    pub fn new(ttl: Duration) -> Option<Self> {
        dirs::cache_dir().map(|dir| Self::with_dir(dir.join("tfquota"), ttl))
    }

    pub fn with_dir(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    /// Readable sanitized prefix plus a hash of the exact URL, since
    /// sanitizing alone maps `a-b` and `a_b` to the same name.
    pub fn entry_path(&self, url: &str) -> PathBuf {
        let mut hasher = DefaultHasher::new();
        url.hash(&mut hasher);
        self.dir.join(format!(
            "{}-{:016x}.json",
            sanitize_identifier(url),
            hasher.finish()
        ))
    }

    /// Returns `None` for a missing or expired entry, or one stored for another URL.
    pub async fn load(&self, url: &str) -> Result<Option<QuotaCatalog>, CacheError> {
        let path = self.entry_path(url);
        let metadata = match fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let age = SystemTime::now()
            .duration_since(metadata.modified()?)
            .unwrap_or_default();
        if age > self.ttl {
            tracing::debug!(path = %path.display(), age_secs = age.as_secs(), "cache entry expired");
            return Ok(None);
        }

        let contents = fs::read_to_string(&path).await?;
        let entry: CacheEntry = serde_json::from_str(&contents)?;
        if entry.url != url {
            tracing::debug!(path = %path.display(), cached_url = %entry.url, "cache entry belongs to another url");
            return Ok(None);
        }
        Ok(Some(entry.catalog))
    }

    pub async fn store(&self, url: &str, catalog: &QuotaCatalog) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.entry_path(url);
        let entry = CacheEntry {
            url: url.to_string(),
            catalog: catalog.clone(),
        };
        fs::write(&path, serde_json::to_string_pretty(&entry)?).await?;
        tracing::debug!(path = %path.display(), count = catalog.len(), "cached catalog");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quota::QuotaDefinition;

    const URL: &str = "https://quotas.example.com/catalog.json";

    fn catalog() -> QuotaCatalog {
        QuotaCatalog::new(vec![QuotaDefinition::new(
            "ec2",
            "Running On-Demand Instances",
            "L-1216C47A",
        )])
    }

    #[test]
    fn test_entry_path_keeps_sanitized_prefix() {
        let cache = CatalogCache::with_dir("/tmp/tfquota", DEFAULT_CACHE_TTL);
        let path = cache.entry_path(URL);
        let file_name = path.file_name().unwrap().to_str().unwrap();

        assert_eq!(path.parent().unwrap(), std::path::Path::new("/tmp/tfquota"));
        assert!(file_name.starts_with("https_quotas_example_com_catalog_json-"));
        assert!(file_name.ends_with(".json"));
        assert_eq!(cache.entry_path(URL), path);
    }

    #[test]
    fn test_entry_path_distinguishes_punctuation() {
        let cache = CatalogCache::with_dir("/tmp/tfquota", DEFAULT_CACHE_TTL);
        assert_ne!(
            cache.entry_path("https://example.com/ec2-quotas.json"),
            cache.entry_path("https://example.com/ec2_quotas.json")
        );
    }

    #[tokio::test]
    async fn test_load_missing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CatalogCache::with_dir(dir.path(), DEFAULT_CACHE_TTL);
        assert!(cache.load(URL).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CatalogCache::with_dir(dir.path().join("cache"), DEFAULT_CACHE_TTL);

        cache.store(URL, &catalog()).await.unwrap();

        assert_eq!(cache.load(URL).await.unwrap(), Some(catalog()));
    }

    #[tokio::test]
    async fn test_similar_urls_do_not_share_entries() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CatalogCache::with_dir(dir.path(), DEFAULT_CACHE_TTL);

        cache
            .store("https://example.com/ec2-quotas.json", &catalog())
            .await
            .unwrap();

        let other = cache.load("https://example.com/ec2_quotas.json").await.unwrap();
        assert!(other.is_none());
    }

    #[tokio::test]
    async fn test_entry_for_other_url_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CatalogCache::with_dir(dir.path(), DEFAULT_CACHE_TTL);
        let foreign = serde_json::json!({
            "url": "https://elsewhere.example.com/catalog.json",
            "catalog": {"quotas": []}
        });
        std::fs::write(cache.entry_path(URL), foreign.to_string()).unwrap();

        assert!(cache.load(URL).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_entry_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let writer = CatalogCache::with_dir(dir.path(), DEFAULT_CACHE_TTL);
        writer.store(URL, &catalog()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        let reader = CatalogCache::with_dir(dir.path(), Duration::ZERO);

        assert!(reader.load(URL).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CatalogCache::with_dir(dir.path(), DEFAULT_CACHE_TTL);
        std::fs::write(cache.entry_path(URL), "not json").unwrap();

        assert!(matches!(cache.load(URL).await, Err(CacheError::Json(_))));
    }
}
