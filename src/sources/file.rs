use std::path::PathBuf;

use async_trait::async_trait;

use super::{QuotaSource, SourceError};
use crate::quota::QuotaCatalog;

/// Reads local JSON catalogs and merges them in the order given.
pub struct FileSource {
    paths: Vec<PathBuf>,
}

impl FileSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

#[async_trait]
impl QuotaSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn load(&self) -> Result<QuotaCatalog, SourceError> {
        let mut catalog = QuotaCatalog::default();

        for path in &self.paths {
            let contents =
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| SourceError::Read {
                        path: path.clone(),
                        source,
                    })?;

            let loaded =
                QuotaCatalog::from_json(&contents).map_err(|source| SourceError::Parse {
                    origin: path.display().to_string(),
                    source,
                })?;

            tracing::info!(path = %path.display(), count = loaded.len(), "catalog loaded");
            catalog.merge(loaded);
        }

        Ok(catalog)
    }
}
